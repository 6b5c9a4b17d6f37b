//! Libris authentication server.
//!
//! Wires the auth crates together, refuses to start on a bad signing key,
//! runs migrations and keeps the revocation sweeper alive until shutdown.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use libris_auth::{MemoryRevocationStore, RevocationRegistry, RevocationSweeper};
use libris_core::config::{AppConfig, RevocationBackend};
use libris_core::error::AppError;
use libris_core::traits::{Clock, RevocationStore, SystemClock};
use libris_database::DatabasePool;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(kind = %e.kind, "Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file, environment overlay and variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("LIBRIS_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("LIBRIS_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Libris v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Refuse to start on a bad signing key ─────────────
    config.validate()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // ── Step 2: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    db.migrate().await?;

    // ── Step 3: Revocation registry ──────────────────────────────
    let store: Arc<dyn RevocationStore> = match config.revocation.backend {
        RevocationBackend::Postgres => Arc::new(db.revoked_tokens()),
        RevocationBackend::Memory => {
            tracing::warn!("Using in-memory revocation store; revocations are lost on restart");
            Arc::new(MemoryRevocationStore::new())
        }
    };
    let registry = Arc::new(RevocationRegistry::new(store));
    if !registry.health_check().await? {
        return Err(AppError::database("Revocation store is not reachable"));
    }

    // ── Step 4: Revocation sweeper ───────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper_handle = if config.revocation.sweep_enabled {
        let sweeper = RevocationSweeper::new(registry.clone(), clock.clone(), &config.revocation);
        Some(tokio::spawn(async move { sweeper.run(shutdown_rx).await }))
    } else {
        tracing::info!("Revocation sweeper disabled");
        None
    };

    // ── Step 5: Wait for shutdown ────────────────────────────────
    shutdown_signal().await?;
    tracing::info!("Shutdown signal received, stopping...");
    let _ = shutdown_tx.send(true);

    if let Some(handle) = sweeper_handle {
        let _ = tokio::time::timeout(std::time::Duration::from_secs(10), handle).await;
    }
    db.close().await;

    tracing::info!("Libris shut down gracefully");
    Ok(())
}

async fn shutdown_signal() -> Result<(), AppError> {
    #[cfg(unix)]
    {
        let mut terminate =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result?,
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    Ok(())
}
