//! Database migration command.

use libris_core::config::AppConfig;
use libris_core::error::AppError;

use crate::output;

/// Run all pending migrations
pub async fn execute(config_path: &str, env: &str) -> Result<(), AppError> {
    let config = AppConfig::load(config_path, env)?;
    let db = crate::context::connect(&config).await?;

    println!("Running database migrations...");
    db.migrate().await?;
    output::print_success("All migrations applied successfully.");
    Ok(())
}
