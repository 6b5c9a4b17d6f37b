//! Token validation and revocation checking.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use libris_core::config::AuthConfig;
use libris_core::error::AppError;
use libris_core::traits::Clock;

use crate::revocation::RevocationRegistry;

use super::claims::Claims;
use super::rejection::TokenRejection;

/// Which expiry rule a verification applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyMode {
    /// Effective expiry is the token's stored `exp` claim.
    Access,
    /// Effective expiry is `iat` plus the currently configured refresh lifetime.
    Refresh,
}

/// Validates tokens: structure, signature, effective expiry, then revocation.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Signature-only validation; expiry is judged here, not by the library.
    validation: Validation,
    /// Configured refresh lifetime.
    refresh_ttl: Duration,
    /// Revoked token ids.
    registry: Arc<RevocationRegistry>,
    /// Time source for expiry checks.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(
        config: &AuthConfig,
        registry: Arc<RevocationRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        config.validate()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims =
            ["exp", "iat", "sub", "iss"].iter().map(|c| c.to_string()).collect();

        let refresh_ttl = i64::try_from(config.refresh_ttl_seconds).map_err(|_| {
            AppError::configuration("auth.refresh_ttl_seconds is out of range")
        })?;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            refresh_ttl: Duration::seconds(refresh_ttl),
            registry,
            clock,
        })
    }

    /// Verifies a token and returns its claims.
    ///
    /// Every verification failure is reported as the same `Unauthenticated`
    /// error. Revocation store failures propagate unchanged.
    pub async fn verify(&self, token: &str, mode: VerifyMode) -> Result<Claims, AppError> {
        match self.inspect(token, mode).await? {
            Ok(claims) => Ok(claims),
            Err(rejection) => {
                debug!(reason = %rejection, mode = ?mode, "Token rejected");
                Err(AppError::unauthenticated("Invalid or expired token"))
            }
        }
    }

    /// Runs every check and reports the specific rejection reason.
    ///
    /// The outer `Result` carries infrastructure failures, the inner one the
    /// verdict. Not for use at a caller-facing boundary.
    pub async fn inspect(
        &self,
        token: &str,
        mode: VerifyMode,
    ) -> Result<Result<Claims, TokenRejection>, AppError> {
        let claims = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                let rejection = match e.kind() {
                    JwtErrorKind::InvalidSignature => TokenRejection::BadSignature,
                    _ => TokenRejection::Malformed,
                };
                return Ok(Err(rejection));
            }
        };

        if self.effective_expiry(&claims, mode) <= self.clock.now().timestamp() {
            return Ok(Err(TokenRejection::Expired));
        }

        if self.registry.is_revoked(claims.jti).await? {
            return Ok(Err(TokenRejection::Revoked));
        }

        Ok(Ok(claims))
    }

    /// Expiry timestamp a token is judged against under `mode`.
    pub fn effective_expiry(&self, claims: &Claims, mode: VerifyMode) -> i64 {
        match mode {
            VerifyMode::Access => claims.exp,
            VerifyMode::Refresh => claims.iat.saturating_add(self.refresh_ttl.num_seconds()),
        }
    }

    /// How long a revocation record for this token must be kept.
    ///
    /// The later of the stored `exp` and the refresh-window expiry, so a
    /// swept record can never let the token verify again under either mode.
    pub fn retention_deadline(&self, claims: &Claims) -> DateTime<Utc> {
        let deadline = claims
            .exp
            .max(self.effective_expiry(claims, VerifyMode::Refresh));
        DateTime::from_timestamp(deadline, 0).unwrap_or_else(|| claims.expires_at())
    }
}
