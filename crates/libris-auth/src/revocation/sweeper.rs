//! Periodic removal of revocation records past their retention deadline.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{error, info};

use libris_core::config::RevocationConfig;
use libris_core::result::AppResult;
use libris_core::traits::Clock;

use super::registry::RevocationRegistry;

/// Background task that sweeps the revocation registry on an interval.
#[derive(Debug, Clone)]
pub struct RevocationSweeper {
    registry: Arc<RevocationRegistry>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl RevocationSweeper {
    /// Creates a sweeper using the configured interval.
    pub fn new(
        registry: Arc<RevocationRegistry>,
        clock: Arc<dyn Clock>,
        config: &RevocationConfig,
    ) -> Self {
        Self {
            registry,
            clock,
            interval: Duration::from_secs(config.sweep_interval_seconds.max(1)),
        }
    }

    /// Runs one sweep now.
    pub async fn sweep_once(&self) -> AppResult<u64> {
        self.registry.sweep(self.clock.now()).await
    }

    /// Sweeps on every tick until `shutdown` flips to `true`.
    ///
    /// A failed sweep is logged and retried on the next tick.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(interval_seconds = self.interval.as_secs(), "Revocation sweeper started");

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.sweep_once().await {
                        error!(error = %e, "Revocation sweep failed");
                    }
                }
            }
        }

        info!("Revocation sweeper stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    use libris_core::traits::{RevocationStore, SystemClock};

    use crate::revocation::MemoryRevocationStore;

    fn sweeper(store: MemoryRevocationStore) -> RevocationSweeper {
        let registry = Arc::new(RevocationRegistry::new(Arc::new(store)));
        RevocationSweeper::new(
            registry,
            Arc::new(SystemClock),
            &RevocationConfig {
                sweep_interval_seconds: 1,
                ..RevocationConfig::default()
            },
        )
    }

    #[tokio::test]
    async fn test_sweep_once_purges_expired() {
        let store = MemoryRevocationStore::new();
        let past: DateTime<Utc> = DateTime::from_timestamp(1_000, 0).unwrap();
        store.insert(Uuid::new_v4(), past).await.unwrap();

        assert_eq!(sweeper(store.clone()).sweep_once().await.unwrap(), 1);
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_on_shutdown() {
        let sweeper = sweeper(MemoryRevocationStore::new());
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move { sweeper.run(rx).await });
        time::sleep(Duration::from_secs(3)).await;
        tx.send(true).unwrap();

        time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("sweeper did not stop")
            .unwrap();
    }
}
