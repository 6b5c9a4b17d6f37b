//! Wires configuration, database and auth components for a CLI invocation.

use std::sync::Arc;

use tracing::debug;

use libris_auth::{
    Argon2CredentialVerifier, AuthOrchestrator, MemoryRevocationStore, RevocationRegistry,
    TokenIssuer, TokenVerifier,
};
use libris_core::config::{AppConfig, RevocationBackend};
use libris_core::error::AppError;
use libris_core::traits::{Clock, RevocationStore, SystemClock};
use libris_database::DatabasePool;

use crate::output;

/// Everything a command may need, built once per invocation.
pub struct CliContext {
    pub config: AppConfig,
    pub db: DatabasePool,
    pub orchestrator: AuthOrchestrator,
    pub registry: Arc<RevocationRegistry>,
    pub clock: Arc<dyn Clock>,
}

/// Load and validate configuration.
pub fn load_config(config_path: &str, env: &str) -> Result<AppConfig, AppError> {
    let config = AppConfig::load(config_path, env)?;
    config.validate()?;
    Ok(config)
}

/// Connect to the configured database.
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

impl CliContext {
    /// Builds the full auth stack against the configured database.
    pub async fn build(config_path: &str, env: &str) -> Result<Self, AppError> {
        let config = load_config(config_path, env)?;
        let db = connect(&config).await?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let store: Arc<dyn RevocationStore> = match config.revocation.backend {
            RevocationBackend::Postgres => Arc::new(db.revoked_tokens()),
            RevocationBackend::Memory => {
                output::print_warning(
                    "Memory revocation backend: revocations end with this process",
                );
                Arc::new(MemoryRevocationStore::new())
            }
        };
        debug!(backend = ?config.revocation.backend, "Revocation store selected");

        let registry = Arc::new(RevocationRegistry::new(store));
        let issuer = Arc::new(TokenIssuer::new(&config.auth, clock.clone())?);
        let verifier = Arc::new(TokenVerifier::new(
            &config.auth,
            registry.clone(),
            clock.clone(),
        )?);

        let accounts = Arc::new(db.accounts());
        let credentials = Arc::new(Argon2CredentialVerifier::new(accounts.clone()));

        let orchestrator = AuthOrchestrator::new(
            issuer,
            verifier,
            registry.clone(),
            accounts,
            credentials,
            Arc::new(db.settings()),
            config.auth.user_role_name.clone(),
        );

        Ok(Self {
            config,
            db,
            orchestrator,
            registry,
            clock,
        })
    }
}
