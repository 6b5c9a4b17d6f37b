//! Login, logout, refresh, introspection and activation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use libris_core::error::AppError;
use libris_core::traits::{CredentialVerifier, MaintenanceFlag};
use libris_entity::account::AccountDirectory;

use crate::jwt::{IssuedToken, TokenIssuer, TokenType, TokenVerifier, VerifyMode};
use crate::revocation::RevocationRegistry;

use super::outcome::{Introspection, LoginResult, TokenPair};

/// Runs each authentication operation to a single terminal outcome.
///
/// Holds no per-request state; every call reads its collaborators and
/// returns. The only shared mutable resource is the revocation registry.
#[derive(Clone)]
pub struct AuthOrchestrator {
    /// Signs new tokens.
    issuer: Arc<TokenIssuer>,
    /// Checks presented tokens.
    verifier: Arc<TokenVerifier>,
    /// Revoked token ids.
    registry: Arc<RevocationRegistry>,
    /// Account lookup and activation.
    accounts: Arc<dyn AccountDirectory>,
    /// Password checks.
    credentials: Arc<dyn CredentialVerifier>,
    /// System-wide maintenance switch.
    maintenance: Arc<dyn MaintenanceFlag>,
    /// The plain role that maintenance mode locks out.
    user_role_name: String,
}

impl std::fmt::Debug for AuthOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthOrchestrator")
            .field("issuer", &self.issuer)
            .field("verifier", &self.verifier)
            .field("user_role_name", &self.user_role_name)
            .finish()
    }
}

impl AuthOrchestrator {
    /// Wires the orchestrator to its collaborators.
    pub fn new(
        issuer: Arc<TokenIssuer>,
        verifier: Arc<TokenVerifier>,
        registry: Arc<RevocationRegistry>,
        accounts: Arc<dyn AccountDirectory>,
        credentials: Arc<dyn CredentialVerifier>,
        maintenance: Arc<dyn MaintenanceFlag>,
        user_role_name: impl Into<String>,
    ) -> Self {
        Self {
            issuer,
            verifier,
            registry,
            accounts,
            credentials,
            maintenance,
            user_role_name: user_role_name.into(),
        }
    }

    /// Checks credentials and issues an access/refresh token pair.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    ///
    /// 1. Password match (`CredentialMismatch`)
    /// 2. Account exists (`AccountNotFound`)
    /// 3. Maintenance gate (`MaintenanceBlocked`)
    /// 4. Account active (`AccountInactive`)
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        if !self.credentials.verify(email, password).await? {
            warn!(email = %email, "Login failed: credential mismatch");
            return Err(AppError::credential_mismatch("Invalid email or password"));
        }

        let snapshot = self.accounts.find_by_email(email).await?.ok_or_else(|| {
            warn!(email = %email, "Login failed: account not found");
            AppError::account_not_found("Account not found")
        })?;
        let account_id = snapshot.account.id;

        if self.maintenance.is_enabled().await?
            && !snapshot.graph.has_role_other_than(&self.user_role_name)
        {
            warn!(account_id = %account_id, "Login blocked by maintenance mode");
            return Err(AppError::maintenance_blocked(
                "The system is under maintenance",
            ));
        }

        if !snapshot.account.can_login() {
            warn!(account_id = %account_id, "Login failed: account inactive");
            return Err(AppError::account_inactive("Account has not been activated"));
        }

        let access = self.issuer.issue_access_token(&snapshot)?;
        let refresh = self.issuer.issue_refresh_token(&snapshot)?;

        info!(
            account_id = %account_id,
            access_jti = %access.claims.jti,
            refresh_jti = %refresh.claims.jti,
            "Login successful"
        );

        Ok(LoginResult {
            access_token: access.token,
            refresh_token: refresh.token,
            first_login: snapshot.account.first_login.then_some(true),
        })
    }

    /// Revokes a refresh token. Never fails.
    ///
    /// An invalid, expired or already revoked token has nothing left to
    /// revoke, an access token is ignored, and a registry failure is only
    /// logged.
    pub async fn logout(&self, refresh_token: &str) {
        let claims = match self.verifier.verify(refresh_token, VerifyMode::Refresh).await {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Logout with unusable token ignored");
                return;
            }
        };

        if claims.token_type != TokenType::Refresh {
            debug!(jti = %claims.jti, token_type = %claims.token_type, "Logout with non-refresh token ignored");
            return;
        }

        let deadline = self.verifier.retention_deadline(&claims);
        match self.registry.revoke(claims.jti, deadline).await {
            Ok(_) => info!(jti = %claims.jti, sub = %claims.sub, "Logout successful"),
            Err(e) => warn!(jti = %claims.jti, error = %e, "Logout could not revoke token"),
        }
    }

    /// Exchanges a refresh token for a new access token and a rotated refresh token.
    ///
    /// The presented token is revoked before the new pair is issued. If
    /// another request already revoked it, this call loses and fails.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self
            .verifier
            .verify(refresh_token, VerifyMode::Refresh)
            .await?;

        if claims.token_type != TokenType::Refresh {
            warn!(jti = %claims.jti, token_type = %claims.token_type, "Refresh with non-refresh token");
            return Err(AppError::wrong_token_type("A refresh token is required"));
        }

        let deadline = self.verifier.retention_deadline(&claims);
        if !self.registry.revoke(claims.jti, deadline).await? {
            warn!(jti = %claims.jti, "Refresh token reused concurrently");
            return Err(AppError::unauthenticated("Invalid or expired token"));
        }

        let snapshot = self.accounts.find_by_email(claims.email()).await?.ok_or_else(|| {
            warn!(jti = %claims.jti, "Refresh for an account that no longer exists");
            AppError::unauthenticated("Invalid or expired token")
        })?;

        let access = self.issuer.issue_access_token(&snapshot)?;
        let rotated = self.issuer.rotate_refresh_token(refresh_token)?;

        info!(
            account_id = %snapshot.account.id,
            access_jti = %access.claims.jti,
            "Tokens refreshed"
        );

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: rotated.token,
        })
    }

    /// Reports whether an access token currently verifies.
    ///
    /// A refresh token is never a valid access token. Registry failures
    /// still propagate; only verification failures map to `valid: false`.
    pub async fn introspect(&self, access_token: &str) -> Result<Introspection, AppError> {
        match self.verifier.inspect(access_token, VerifyMode::Access).await? {
            Ok(claims) if claims.token_type == TokenType::Access => {
                Ok(Introspection { valid: true })
            }
            Ok(claims) => {
                debug!(jti = %claims.jti, token_type = %claims.token_type, "Introspected token is not an access token");
                Ok(Introspection { valid: false })
            }
            Err(rejection) => {
                debug!(reason = %rejection, "Introspected token is not valid");
                Ok(Introspection { valid: false })
            }
        }
    }

    /// Consumes a single-use activation token and marks its account active.
    pub async fn activate(&self, activation_token: &str) -> Result<(), AppError> {
        let claims = self
            .verifier
            .verify(activation_token, VerifyMode::Access)
            .await?;

        if claims.token_type != TokenType::Access {
            warn!(jti = %claims.jti, "Activation with a refresh token");
            return Err(AppError::wrong_token_type(
                "An activation token is required",
            ));
        }

        let account_id = claims.account_id()?;
        let snapshot = self.accounts.find_by_id(account_id).await?.ok_or_else(|| {
            warn!(account_id = %account_id, "Activation for unknown account");
            AppError::account_not_found("Account not found")
        })?;

        let deadline = self.verifier.retention_deadline(&claims);
        if !self.registry.revoke(claims.jti, deadline).await? {
            warn!(jti = %claims.jti, "Activation token reused concurrently");
            return Err(AppError::unauthenticated("Invalid or expired token"));
        }

        self.accounts.set_active(snapshot.account.id, true).await?;
        info!(account_id = %snapshot.account.id, "Account activated");
        Ok(())
    }

    /// Mints the access-style token that [`activate`](Self::activate) consumes.
    pub async fn issue_activation_token(&self, email: &str) -> Result<IssuedToken, AppError> {
        let snapshot = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::account_not_found("Account not found"))?;

        let issued = self.issuer.issue_access_token(&snapshot)?;
        info!(
            account_id = %snapshot.account.id,
            jti = %issued.claims.jti,
            "Activation token issued"
        );
        Ok(issued)
    }
}
