use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;

/// Connects to PostgreSQL and brings the catalog schema up to date.
/// Returns the pool shared by every handler.
pub async fn init(config: &Config) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!(
        "PostgreSQL ready (pool size {}, migrations applied)",
        config.db_max_connections
    );
    Ok(pool)
}
