//! Revoked token persistence contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::result::AppResult;

/// Persisted set of revoked token identifiers.
///
/// Implementations must tolerate concurrent inserts of the same `jti`:
/// the first writer wins and later inserts succeed without effect.
#[async_trait]
pub trait RevocationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Record `jti` as revoked, retained at least until `expires_at`.
    ///
    /// Returns `true` if this call inserted the record, `false` if it was already present.
    async fn insert(&self, jti: Uuid, expires_at: DateTime<Utc>) -> AppResult<bool>;

    /// Check whether `jti` has been revoked.
    async fn contains(&self, jti: Uuid) -> AppResult<bool>;

    /// Delete records whose retention deadline is strictly before `before`.
    ///
    /// Returns the number of records deleted.
    async fn purge_expired(&self, before: DateTime<Utc>) -> AppResult<u64>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
