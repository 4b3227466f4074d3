use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails with a descriptive error if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DB_MAX_CONNECTIONS.to_string())
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            // Optional: with no key the assistant runs in disabled mode
            // instead of blocking startup.
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global; this is the only test that touches them.
    #[test]
    fn test_from_env_pool_size_default_and_override() {
        std::env::set_var("DATABASE_URL", "postgres://localhost/dgd_test");
        std::env::remove_var("DB_MAX_CONNECTIONS");
        let config = Config::from_env().unwrap();
        assert_eq!(config.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);

        std::env::set_var("DB_MAX_CONNECTIONS", "3");
        let config = Config::from_env().unwrap();
        assert_eq!(config.db_max_connections, 3);

        std::env::set_var("DB_MAX_CONNECTIONS", "many");
        assert!(Config::from_env().is_err());
        std::env::remove_var("DB_MAX_CONNECTIONS");
    }
}
