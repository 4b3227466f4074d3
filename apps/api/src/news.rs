//! News bulletins — homepage announcements, newest first, optionally linked
//! to a hotel.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use uuid::Uuid;

use crate::auth::require_session;
use crate::errors::AppError;
use crate::models::news::{NewsItem, NewsRow};
use crate::state::AppState;

/// GET /api/v1/news
pub async fn handle_list_news(
    State(state): State<AppState>,
) -> Result<Json<Vec<NewsItem>>, AppError> {
    let rows: Vec<NewsRow> =
        sqlx::query_as("SELECT * FROM news ORDER BY publish_date DESC NULLS LAST")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(rows.into_iter().map(NewsItem::from).collect()))
}

/// POST /api/v1/news
/// Create-or-replace keyed by id.
pub async fn handle_upsert_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(item): Json<NewsItem>,
) -> Result<Json<NewsItem>, AppError> {
    require_session(&state.db, &headers).await?;

    if item.title.trim().is_empty() {
        return Err(AppError::Validation("La noticia necesita un título".into()));
    }
    let mut item = item.normalized();
    if item.id.trim().is_empty() {
        item.id = Uuid::new_v4().to_string();
    }

    let row: NewsRow = sqlx::query_as(
        r#"
        INSERT INTO news
            (id, category, tag_color, title, content, related_hotel_id,
             destination, publish_date, expiration_date, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (id) DO UPDATE SET
            category = EXCLUDED.category,
            tag_color = EXCLUDED.tag_color,
            title = EXCLUDED.title,
            content = EXCLUDED.content,
            related_hotel_id = EXCLUDED.related_hotel_id,
            destination = EXCLUDED.destination,
            publish_date = EXCLUDED.publish_date,
            expiration_date = EXCLUDED.expiration_date,
            is_active = EXCLUDED.is_active
        RETURNING *
        "#,
    )
    .bind(&item.id)
    .bind(&item.category)
    .bind(&item.tag_color)
    .bind(&item.title)
    .bind(&item.content)
    .bind(&item.related_hotel_id)
    .bind(&item.destination)
    .bind(item.publish_date)
    .bind(item.expiration_date)
    .bind(item.is_active)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row.into()))
}

/// DELETE /api/v1/news/:id
pub async fn handle_delete_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    require_session(&state.db, &headers).await?;

    let result = sqlx::query("DELETE FROM news WHERE id = $1")
        .bind(&id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("News item {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
