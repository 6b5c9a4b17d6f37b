//! Revocation registry over a pluggable store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use libris_core::result::AppResult;
use libris_core::traits::RevocationStore;

/// The set of token ids that must never verify again.
///
/// Inserts are idempotent and safe under concurrency; the store decides
/// the winner when two requests revoke the same id at once.
#[derive(Debug, Clone)]
pub struct RevocationRegistry {
    store: Arc<dyn RevocationStore>,
}

impl RevocationRegistry {
    /// Creates a registry over the given store.
    pub fn new(store: Arc<dyn RevocationStore>) -> Self {
        Self { store }
    }

    /// Revokes `jti`, keeping the record until at least `expiry`.
    ///
    /// Returns `true` if this call revoked the token, `false` if it was
    /// already revoked. Neither case is an error.
    pub async fn revoke(&self, jti: Uuid, expiry: DateTime<Utc>) -> AppResult<bool> {
        let inserted = self.store.insert(jti, expiry).await?;
        if inserted {
            info!(jti = %jti, expiry = %expiry, "Token revoked");
        } else {
            debug!(jti = %jti, "Token was already revoked");
        }
        Ok(inserted)
    }

    /// Checks whether `jti` has been revoked.
    pub async fn is_revoked(&self, jti: Uuid) -> AppResult<bool> {
        self.store.contains(jti).await
    }

    /// Deletes records whose retention deadline passed before `now`.
    pub async fn sweep(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let purged = self.store.purge_expired(now).await?;
        if purged > 0 {
            info!(purged, "Swept expired revocation records");
        }
        Ok(purged)
    }

    /// Checks that the backing store is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.store.health_check().await
    }
}
