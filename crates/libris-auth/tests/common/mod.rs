//! Shared fixtures for the authentication integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use libris_auth::{
    AuthOrchestrator, MemoryRevocationStore, RevocationRegistry, TokenIssuer, TokenVerifier,
};
use libris_core::config::AuthConfig;
use libris_core::error::AppError;
use libris_core::result::AppResult;
use libris_core::traits::{Clock, CredentialVerifier, MaintenanceFlag};
use libris_entity::account::{
    Account, AccountDirectory, AccountSnapshot, Permission, Role, RoleGraph,
};

pub const ACCESS_TTL: i64 = 300;
pub const REFRESH_TTL: i64 = 3600;
pub const START: i64 = 1_800_000_000;

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn at(ts: i64) -> Arc<Self> {
        Arc::new(Self(Mutex::new(
            DateTime::from_timestamp(ts, 0).expect("valid timestamp"),
        )))
    }

    pub fn advance(&self, seconds: i64) {
        *self.0.lock().unwrap() += Duration::seconds(seconds);
    }

    pub fn set(&self, ts: i64) {
        *self.0.lock().unwrap() = DateTime::from_timestamp(ts, 0).expect("valid timestamp");
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Accounts keyed by id, with email lookup by scan.
#[derive(Debug, Default)]
pub struct InMemoryAccounts {
    accounts: DashMap<Uuid, AccountSnapshot>,
}

impl InMemoryAccounts {
    pub fn insert(&self, snapshot: AccountSnapshot) {
        self.accounts.insert(snapshot.account.id, snapshot);
    }

    pub fn remove(&self, id: Uuid) {
        self.accounts.remove(&id);
    }

    pub fn is_active(&self, id: Uuid) -> bool {
        self.accounts
            .get(&id)
            .map(|s| s.account.active)
            .unwrap_or(false)
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccounts {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<AccountSnapshot>> {
        Ok(self
            .accounts
            .iter()
            .find(|entry| entry.account.email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AccountSnapshot>> {
        Ok(self.accounts.get(&id).map(|entry| entry.value().clone()))
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<()> {
        let mut entry = self
            .accounts
            .get_mut(&id)
            .ok_or_else(|| AppError::account_not_found("Account not found"))?;
        entry.account.active = active;
        Ok(())
    }
}

/// Plaintext email/password pairs.
#[derive(Debug, Default)]
pub struct FakeCredentials {
    passwords: DashMap<String, String>,
}

impl FakeCredentials {
    pub fn set(&self, email: &str, password: &str) {
        self.passwords.insert(email.to_string(), password.to_string());
    }
}

#[async_trait]
impl CredentialVerifier for FakeCredentials {
    async fn verify(&self, email: &str, password: &str) -> AppResult<bool> {
        Ok(self
            .passwords
            .get(email)
            .is_some_and(|stored| stored.as_str() == password))
    }
}

#[derive(Debug, Default)]
pub struct ToggleMaintenance(AtomicBool);

impl ToggleMaintenance {
    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::SeqCst);
    }
}

#[async_trait]
impl MaintenanceFlag for ToggleMaintenance {
    async fn is_enabled(&self) -> AppResult<bool> {
        Ok(self.0.load(Ordering::SeqCst))
    }
}

/// A fully wired orchestrator over in-memory collaborators.
pub struct TestApp {
    pub orchestrator: AuthOrchestrator,
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
    pub registry: Arc<RevocationRegistry>,
    pub store: MemoryRevocationStore,
    pub accounts: Arc<InMemoryAccounts>,
    pub credentials: Arc<FakeCredentials>,
    pub maintenance: Arc<ToggleMaintenance>,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    pub fn new() -> Self {
        let config = AuthConfig {
            jwt_secret: "integration-test-signing-secret-0123456789".to_string(),
            access_ttl_seconds: ACCESS_TTL as u64,
            refresh_ttl_seconds: REFRESH_TTL as u64,
            ..AuthConfig::default()
        };

        let clock = ManualClock::at(START);
        let store = MemoryRevocationStore::new();
        let registry = Arc::new(RevocationRegistry::new(Arc::new(store.clone())));
        let issuer = Arc::new(TokenIssuer::new(&config, clock.clone()).expect("issuer"));
        let verifier = Arc::new(
            TokenVerifier::new(&config, registry.clone(), clock.clone()).expect("verifier"),
        );
        let accounts = Arc::new(InMemoryAccounts::default());
        let credentials = Arc::new(FakeCredentials::default());
        let maintenance = Arc::new(ToggleMaintenance::default());

        let orchestrator = AuthOrchestrator::new(
            issuer.clone(),
            verifier.clone(),
            registry.clone(),
            accounts.clone(),
            credentials.clone(),
            maintenance.clone(),
            config.user_role_name.clone(),
        );

        Self {
            orchestrator,
            issuer,
            verifier,
            registry,
            store,
            accounts,
            credentials,
            maintenance,
            clock,
        }
    }

    /// Adds an account holding `roles`, each granted one `<ROLE>_ACCESS` permission.
    pub fn add_account(&self, email: &str, password: &str, active: bool, roles: &[&str]) -> Uuid {
        let mut role_list = Vec::new();
        let mut permissions = Vec::new();
        for name in roles {
            let permission = Permission {
                id: Uuid::new_v4(),
                name: format!("{name}_ACCESS"),
                description: None,
            };
            role_list.push(Role {
                id: Uuid::new_v4(),
                name: name.to_string(),
                permission_ids: vec![permission.id],
            });
            permissions.push(permission);
        }

        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: String::new(),
            active,
            first_login: false,
            created_at: now,
            updated_at: now,
        };
        let id = account.id;

        self.accounts
            .insert(AccountSnapshot::new(account, RoleGraph::new(role_list, permissions)));
        self.credentials.set(email, password);
        id
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub async fn snapshot(&self, email: &str) -> AccountSnapshot {
        self.accounts
            .find_by_email(email)
            .await
            .unwrap()
            .expect("account exists")
    }
}
