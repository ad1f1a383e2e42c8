//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::MongoConfig;

/// Application configuration.
///
/// Every variable has a default suitable for local development:
/// `HOST` (127.0.0.1), `PORT` (3000), `MONGODB_URI`
/// (mongodb://localhost:27017), `DB_NAME` (quill).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: MongoConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = MongoConfig::default();
        let database = MongoConfig {
            uri: env::var("MONGODB_URI").unwrap_or(defaults.uri),
            db_name: env::var("DB_NAME").unwrap_or(defaults.db_name),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database,
        }
    }
}
