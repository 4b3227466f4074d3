mod auth;
mod catalog;
mod chat;
mod config;
mod db;
mod errors;
mod importer;
mod models;
mod news;
mod routes;
mod slides;
mod state;

use std::net::SocketAddr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::{build_http_client, ChatAssistant, DisabledChat, GeminiChat};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("dgd_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting DGD Hoteles API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and apply migrations
    let db = db::init(&config).await?;

    // Shared HTTP client (assistant calls + remote sheet downloads)
    let http = build_http_client()?;

    // Assistant backend: disabled when no key is configured, so the rest of
    // the CMS keeps working without one.
    let chat: Arc<dyn ChatAssistant> =
        if config.gemini_api_key.is_empty() || config.gemini_api_key.contains("...") {
            warn!("GEMINI_API_KEY missing or placeholder; chat assistant disabled");
            Arc::new(DisabledChat)
        } else {
            info!("Assistant client initialized (model: {})", chat::MODEL);
            Arc::new(GeminiChat::new(http.clone(), config.gemini_api_key.clone()))
        };

    // Build app state
    let state = AppState {
        db,
        chat,
        http,
        import_in_flight: Arc::new(AtomicBool::new(false)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
