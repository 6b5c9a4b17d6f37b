//! Schema migrations for accounts, roles, revoked tokens and settings.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use libris_core::error::{AppError, ErrorKind};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Applies every bundled migration not yet recorded in the database.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Schema migration failed", e)
    })?;

    info!(known = MIGRATOR.iter().count(), "Schema is up to date");
    Ok(())
}
