//! Account lookup and activation contract.

use async_trait::async_trait;
use uuid::Uuid;

use libris_core::result::AppResult;

use super::snapshot::AccountSnapshot;

/// Account store as seen by the authentication subsystem.
#[async_trait]
pub trait AccountDirectory: Send + Sync + 'static {
    /// Load an account and its role graph by login email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<AccountSnapshot>>;

    /// Load an account and its role graph by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AccountSnapshot>>;

    /// Persist the account's `active` flag.
    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<()>;
}
