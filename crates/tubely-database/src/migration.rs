//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use tubely_core::error::{AppError, ErrorKind};

/// Apply all pending migrations embedded from the workspace `migrations/`
/// directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database migrations applied");
    Ok(())
}
