//! Homepage carousel slides.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use uuid::Uuid;

use crate::auth::require_session;
use crate::errors::AppError;
use crate::models::slide::HeroSlide;
use crate::state::AppState;

/// GET /api/v1/slides
pub async fn handle_list_slides(
    State(state): State<AppState>,
) -> Result<Json<Vec<HeroSlide>>, AppError> {
    let slides: Vec<HeroSlide> = sqlx::query_as("SELECT * FROM slides ORDER BY title")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(slides))
}

/// POST /api/v1/slides
/// Create-or-replace keyed by id.
pub async fn handle_upsert_slide(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut slide): Json<HeroSlide>,
) -> Result<Json<HeroSlide>, AppError> {
    require_session(&state.db, &headers).await?;

    if slide.id.trim().is_empty() {
        slide.id = Uuid::new_v4().to_string();
    }

    let saved: HeroSlide = sqlx::query_as(
        r#"
        INSERT INTO slides
            (id, title, subtitle, promo_tag, tag_color, image_url, cta_text, cta_link)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (id) DO UPDATE SET
            title = EXCLUDED.title,
            subtitle = EXCLUDED.subtitle,
            promo_tag = EXCLUDED.promo_tag,
            tag_color = EXCLUDED.tag_color,
            image_url = EXCLUDED.image_url,
            cta_text = EXCLUDED.cta_text,
            cta_link = EXCLUDED.cta_link
        RETURNING *
        "#,
    )
    .bind(&slide.id)
    .bind(&slide.title)
    .bind(&slide.subtitle)
    .bind(&slide.promo_tag)
    .bind(&slide.tag_color)
    .bind(&slide.image_url)
    .bind(&slide.cta_text)
    .bind(&slide.cta_link)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(saved))
}

/// DELETE /api/v1/slides/:id
pub async fn handle_delete_slide(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    require_session(&state.db, &headers).await?;

    let result = sqlx::query("DELETE FROM slides WHERE id = $1")
        .bind(&id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Slide {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
