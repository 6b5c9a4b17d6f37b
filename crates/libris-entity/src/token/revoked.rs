//! Revoked token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A token id that must never pass verification again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RevokedTokenRecord {
    /// The revoked token's `jti`.
    pub id: Uuid,
    /// Earliest instant at which the record may be swept.
    pub expiry_time: DateTime<Utc>,
}

impl RevokedTokenRecord {
    /// Whether the record may be deleted at `now`.
    pub fn is_sweepable(&self, now: DateTime<Utc>) -> bool {
        self.expiry_time < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_sweepable_only_after_expiry() {
        let now = Utc::now();
        let record = RevokedTokenRecord {
            id: Uuid::new_v4(),
            expiry_time: now,
        };
        assert!(!record.is_sweepable(now));
        assert!(record.is_sweepable(now + Duration::seconds(1)));
    }

    #[test]
    fn test_serializes_expiry_time() {
        let record = RevokedTokenRecord {
            id: Uuid::nil(),
            expiry_time: DateTime::from_timestamp(0, 0).unwrap(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["expiry_time"], "1970-01-01T00:00:00Z");
    }
}
