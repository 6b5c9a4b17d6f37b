//! Revocation registry configuration.

use serde::{Deserialize, Serialize};

/// Where revoked token identifiers are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationBackend {
    /// The `revoked_tokens` table in PostgreSQL.
    Postgres,
    /// An in-process map. Single-node only; lost on restart.
    Memory,
}

/// Revocation store and sweep settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevocationConfig {
    /// Storage backend for revoked token ids.
    #[serde(default = "default_backend")]
    pub backend: RevocationBackend,
    /// Whether the background sweep of expired records runs.
    #[serde(default = "default_true")]
    pub sweep_enabled: bool,
    /// Seconds between two sweeps.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            sweep_enabled: default_true(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_backend() -> RevocationBackend {
    RevocationBackend::Postgres
}

fn default_true() -> bool {
    true
}

fn default_sweep_interval() -> u64 {
    3600
}
