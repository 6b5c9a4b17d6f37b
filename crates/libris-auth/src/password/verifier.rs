//! Credential verification against stored Argon2 hashes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use libris_core::result::AppResult;
use libris_core::traits::CredentialVerifier;
use libris_entity::account::AccountDirectory;

use super::hasher::PasswordHasher;

/// Checks passwords against the hash stored on the account record.
#[derive(Clone)]
pub struct Argon2CredentialVerifier {
    accounts: Arc<dyn AccountDirectory>,
    hasher: PasswordHasher,
}

impl std::fmt::Debug for Argon2CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2CredentialVerifier").finish()
    }
}

impl Argon2CredentialVerifier {
    /// Creates a verifier reading hashes from `accounts`.
    pub fn new(accounts: Arc<dyn AccountDirectory>) -> Self {
        Self {
            accounts,
            hasher: PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for Argon2CredentialVerifier {
    async fn verify(&self, email: &str, password: &str) -> AppResult<bool> {
        let Some(snapshot) = self.accounts.find_by_email(email).await? else {
            debug!("Credential check for unknown email");
            return Ok(false);
        };

        self.hasher
            .verify_password(password, &snapshot.account.password_hash)
    }
}
