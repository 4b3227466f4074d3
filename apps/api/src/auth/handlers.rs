use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{bearer_token, password_digest, require_admin, require_session};
use crate::errors::AppError;
use crate::models::user::{User, UserRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: Uuid,
    pub user: User,
}

/// POST /api/v1/auth/signup
/// New accounts start with the non-admin role; an admin promotes them later.
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<User>, AppError> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("Email inválido".into()));
    }
    if req.password.len() < 8 {
        return Err(AppError::Validation(
            "La contraseña debe tener al menos 8 caracteres".into(),
        ));
    }

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("El email ya está registrado".into()));
    }

    let row: UserRow = sqlx::query_as(
        r#"
        INSERT INTO users (email, password_digest, display_name, role, is_active)
        VALUES ($1, $2, $3, 'user', TRUE)
        RETURNING *
        "#,
    )
    .bind(&email)
    .bind(password_digest(&req.password))
    .bind(req.display_name.trim())
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row.into()))
}

/// POST /api/v1/auth/signin
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let email = req.email.trim().to_lowercase();

    let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;

    let row = match row {
        Some(r) if r.password_digest == password_digest(&req.password) => r,
        _ => return Err(AppError::Unauthorized),
    };
    if !row.is_active {
        return Err(AppError::Forbidden);
    }

    let token = Uuid::new_v4();
    sqlx::query("INSERT INTO sessions (token, user_id) VALUES ($1, $2)")
        .bind(token)
        .bind(row.id)
        .execute(&state.db)
        .await?;

    Ok(Json(SessionResponse {
        token,
        user: row.into(),
    }))
}

/// POST /api/v1/auth/signout
pub async fn handle_sign_out(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    if let Some(token) = bearer_token(&headers) {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&state.db)
            .await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<User>, AppError> {
    Ok(Json(require_session(&state.db, &headers).await?))
}

/// GET /api/v1/users (admin)
pub async fn handle_list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<User>>, AppError> {
    require_admin(&state.db, &headers).await?;

    let rows: Vec<UserRow> = sqlx::query_as("SELECT * FROM users ORDER BY created_at")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(User::from).collect()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveToggle {
    pub is_active: bool,
}

/// PATCH /api/v1/users/:id/active (admin)
/// Deactivation also drops the account's sessions immediately.
pub async fn handle_set_active(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(req): Json<ActiveToggle>,
) -> Result<Json<User>, AppError> {
    let admin = require_admin(&state.db, &headers).await?;
    if admin.id == id && !req.is_active {
        return Err(AppError::Validation(
            "No puedes desactivar tu propia cuenta".into(),
        ));
    }

    let row: Option<UserRow> =
        sqlx::query_as("UPDATE users SET is_active = $1 WHERE id = $2 RETURNING *")
            .bind(req.is_active)
            .bind(id)
            .fetch_optional(&state.db)
            .await?;
    let row = row.ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;

    if !req.is_active {
        sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(id)
            .execute(&state.db)
            .await?;
    }

    Ok(Json(row.into()))
}
