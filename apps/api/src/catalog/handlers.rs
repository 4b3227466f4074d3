use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use uuid::Uuid;

use crate::auth::require_session;
use crate::catalog::repo;
use crate::errors::AppError;
use crate::models::hotel::Hotel;
use crate::state::AppState;

/// GET /api/v1/hotels
pub async fn handle_list_hotels(
    State(state): State<AppState>,
) -> Result<Json<Vec<Hotel>>, AppError> {
    Ok(Json(repo::fetch_hotels(&state.db).await?))
}

/// GET /api/v1/hotels/:id
pub async fn handle_get_hotel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Hotel>, AppError> {
    let hotel = repo::fetch_hotel(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Hotel {id} not found")))?;
    Ok(Json(hotel))
}

/// POST /api/v1/hotels
/// Create-or-replace keyed by id. An empty id gets a fresh UUID (manual form
/// entry for a new property).
pub async fn handle_upsert_hotel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut hotel): Json<Hotel>,
) -> Result<Json<Hotel>, AppError> {
    require_session(&state.db, &headers).await?;

    if hotel.name.trim().is_empty() {
        return Err(AppError::Validation("El hotel necesita un nombre".into()));
    }
    if hotel.id.trim().is_empty() {
        hotel.id = Uuid::new_v4().to_string();
    }

    let saved = repo::upsert_hotel(&state.db, &hotel).await?;
    Ok(Json(saved))
}

/// DELETE /api/v1/hotels/:id
pub async fn handle_delete_hotel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    require_session(&state.db, &headers).await?;

    if !repo::delete_hotel(&state.db, &id).await? {
        return Err(AppError::NotFound(format!("Hotel {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
