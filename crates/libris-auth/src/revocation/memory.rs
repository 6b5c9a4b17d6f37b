//! In-memory revocation store for single-node deployments and tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use libris_core::result::AppResult;
use libris_core::traits::RevocationStore;
use libris_entity::token::RevokedTokenRecord;

/// Revoked token ids held in a concurrent map.
///
/// Records are lost on restart, so previously revoked tokens become valid
/// again until they expire. Use the PostgreSQL store when that matters.
#[derive(Debug, Clone, Default)]
pub struct MemoryRevocationStore {
    records: Arc<DashMap<Uuid, RevokedTokenRecord>>,
}

impl MemoryRevocationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn insert(&self, jti: Uuid, expires_at: DateTime<Utc>) -> AppResult<bool> {
        match self.records.entry(jti) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(RevokedTokenRecord {
                    id: jti,
                    expiry_time: expires_at,
                });
                Ok(true)
            }
        }
    }

    async fn contains(&self, jti: Uuid) -> AppResult<bool> {
        Ok(self.records.contains_key(&jti))
    }

    async fn purge_expired(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let mut purged = 0u64;
        self.records.retain(|_, record| {
            let keep = !record.is_sweepable(before);
            if !keep {
                purged += 1;
            }
            keep
        });
        Ok(purged)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_insert_and_contains() {
        let store = MemoryRevocationStore::new();
        let jti = Uuid::new_v4();

        assert!(!store.contains(jti).await.unwrap());
        assert!(store.insert(jti, Utc::now()).await.unwrap());
        assert!(store.contains(jti).await.unwrap());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_second_insert_keeps_first_expiry() {
        let store = MemoryRevocationStore::new();
        let jti = Uuid::new_v4();
        let first = Utc::now() + Duration::hours(2);

        store.insert(jti, first).await.unwrap();
        assert!(!store.insert(jti, Utc::now()).await.unwrap());

        // Sweeping at +1h must keep the record because the first expiry wins.
        let purged = store.purge_expired(Utc::now() + Duration::hours(1)).await.unwrap();
        assert_eq!(purged, 0);
        assert!(store.contains(jti).await.unwrap());
    }

    #[tokio::test]
    async fn test_purge_removes_only_past_deadline() {
        let store = MemoryRevocationStore::new();
        let now = Utc::now();
        let old = Uuid::new_v4();
        let live = Uuid::new_v4();

        store.insert(old, now - Duration::minutes(5)).await.unwrap();
        store.insert(live, now + Duration::minutes(5)).await.unwrap();

        assert_eq!(store.purge_expired(now).await.unwrap(), 1);
        assert!(!store.contains(old).await.unwrap());
        assert!(store.contains(live).await.unwrap());
    }
}
