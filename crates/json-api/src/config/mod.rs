//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig, db::DatabaseConfig, observability::LoggingConfig,
    server::ServerRuntimeConfig, storage::StorageConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod storage;

pub(crate) use observability::LogFormat;

/// ReadItAgain JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "readitagain-json", about = "ReadItAgain JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Access token settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Upload storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_apply_when_only_required_values_are_given() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "readitagain-json",
            "--database-url",
            "postgres://localhost/readitagain",
            "--jwt-secret",
            "secret",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.database.max_connections, 10);
        assert!(!config.database.run_migrations, "migrations are opt-in");
        assert_eq!(config.auth.token_ttl_minutes, 30);
        assert_eq!(config.logging.slow_request_threshold_ms, 1_000);
        assert_eq!(config.storage.upload_dir.to_str(), Some("./uploads"));

        Ok(())
    }
}
