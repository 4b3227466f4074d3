use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use sqlx::PgPool;

use crate::chat::ChatAssistant;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable assistant backend. `GeminiChat` when a key is configured,
    /// `DisabledChat` otherwise.
    pub chat: Arc<dyn ChatAssistant>,
    /// Shared HTTP client used for remote sheet downloads (30 s timeout).
    pub http: reqwest::Client,
    /// True while a bulk import is running. Imports are serialized: the
    /// second caller gets 409 instead of racing the first.
    pub import_in_flight: Arc<AtomicBool>,
}
