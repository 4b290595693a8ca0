//! PostgreSQL pool.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use quickdesk_core::config::DatabaseConfig;
use quickdesk_core::error::{AppError, ErrorKind};

/// A connected pool plus the host it points at, for health reports.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
    host: String,
}

impl DatabasePool {
    /// Parses `config.url` and opens the pool. Credentials never reach the
    /// log.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let options = PgConnectOptions::from_str(&config.url).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid database URL", e)
        })?;
        let host = options.get_host().to_string();

        info!(
            %host,
            port = options.get_port(),
            database = options.get_database().unwrap_or_default(),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Cannot reach {host}: {e}"), e)
            })?;

        info!(%host, "PostgreSQL pool ready");
        Ok(Self { pool, host })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}
