//! Schema migrations embedded from the workspace `migrations/` directory.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use quickdesk_core::error::{AppError, ErrorKind};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Applies every migration the database has not seen yet.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!(available = MIGRATOR.iter().count(), "Applying schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
    })?;

    info!("Schema is up to date");
    Ok(())
}
