//! System-wide maintenance mode flag.

use async_trait::async_trait;

use crate::result::AppResult;

/// Read access to the maintenance-mode switch.
#[async_trait]
pub trait MaintenanceFlag: Send + Sync + 'static {
    /// Whether maintenance mode is currently active.
    async fn is_enabled(&self) -> AppResult<bool>;
}
