//! Password verification contract.

use async_trait::async_trait;

use crate::result::AppResult;

/// Checks an email/password pair against stored credentials.
///
/// Implementations return `Ok(false)` for a mismatch, including an unknown
/// email; `Err` is reserved for infrastructure failures.
#[async_trait]
pub trait CredentialVerifier: Send + Sync + 'static {
    /// Returns whether `password` matches the credentials stored for `email`.
    async fn verify(&self, email: &str, password: &str) -> AppResult<bool>;
}
