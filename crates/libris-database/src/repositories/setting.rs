//! System settings repository, home of the maintenance-mode flag.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use libris_core::error::{AppError, ErrorKind};
use libris_core::result::AppResult;
use libris_core::traits::MaintenanceFlag;

/// Settings key holding the maintenance-mode switch.
pub const MAINTENANCE_MODE_KEY: &str = "maintenance_mode";

/// Repository for the `system_settings` key/value table.
#[derive(Debug, Clone)]
pub struct SettingRepository {
    pool: PgPool,
}

impl SettingRepository {
    /// Create a new settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Read a raw setting value.
    pub async fn get(&self, key: &str) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT value FROM system_settings WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read setting", e))
    }

    /// Insert or overwrite a setting value.
    pub async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO system_settings (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = $2, updated_at = NOW()",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to write setting", e))?;
        Ok(())
    }

    /// Turn maintenance mode on or off.
    pub async fn set_maintenance(&self, enabled: bool) -> AppResult<()> {
        self.set(MAINTENANCE_MODE_KEY, if enabled { "true" } else { "false" })
            .await?;
        info!(enabled, "Maintenance mode updated");
        Ok(())
    }
}

#[async_trait]
impl MaintenanceFlag for SettingRepository {
    async fn is_enabled(&self) -> AppResult<bool> {
        Ok(self
            .get(MAINTENANCE_MODE_KEY)
            .await?
            .as_deref()
            .is_some_and(parse_flag))
    }
}

/// Interpret a stored flag value.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "on" | "yes"
    )
}
