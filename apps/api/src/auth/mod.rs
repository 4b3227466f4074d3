//! Session-based staff authentication. Tokens are opaque UUIDs stored in the
//! `sessions` table; deactivating an account force-terminates its sessions
//! the next time one of them is presented.

use axum::http::{header, HeaderMap};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{Role, User, UserRow};

pub mod handlers;

/// Hex-encoded SHA-256 of the password.
pub fn password_digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Pulls the session token out of an `Authorization: Bearer <uuid>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|v| v.trim().parse().ok())
}

/// Resolves the current session to its user, or `Unauthorized`.
/// An inactive account has its sessions deleted here and is rejected.
pub async fn require_session(pool: &PgPool, headers: &HeaderMap) -> Result<User, AppError> {
    let token = bearer_token(headers).ok_or(AppError::Unauthorized)?;

    let row: Option<UserRow> = sqlx::query_as(
        "SELECT u.* FROM users u JOIN sessions s ON s.user_id = u.id WHERE s.token = $1",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    let row = row.ok_or(AppError::Unauthorized)?;

    if !row.is_active {
        sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(row.id)
            .execute(pool)
            .await?;
        return Err(AppError::Unauthorized);
    }

    Ok(row.into())
}

/// Like `require_session`, but also requires the admin role.
pub async fn require_admin(pool: &PgPool, headers: &HeaderMap) -> Result<User, AppError> {
    let user = require_session(pool, headers).await?;
    if user.role != Role::Admin {
        return Err(AppError::Forbidden);
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_password_digest_is_stable_hex() {
        let digest = password_digest("admin123");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, password_digest("admin123"));
        assert_ne!(digest, password_digest("admin124"));
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_bearer_token_parses_uuid() {
        let token = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        assert_eq!(bearer_token(&headers), Some(token));
    }

    #[test]
    fn test_bearer_token_rejects_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer not-a-uuid"),
        );
        assert_eq!(bearer_token(&headers), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
