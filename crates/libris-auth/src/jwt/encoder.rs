//! Token creation and refresh-token rotation.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::{error, info};
use uuid::Uuid;

use libris_core::config::AuthConfig;
use libris_core::error::{AppError, ErrorKind};
use libris_core::traits::Clock;
use libris_entity::account::AccountSnapshot;

use crate::scope::ScopeBuilder;

use super::claims::{Claims, TokenType};

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact `header.claims.signature` string.
    pub token: String,
    /// The signed claims.
    pub claims: Claims,
}

/// Creates signed access and refresh tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token lifetime.
    access_ttl: Duration,
    /// Refresh token lifetime.
    refresh_ttl: Duration,
    /// Scope derivation for the `scope` claim.
    scope_builder: ScopeBuilder,
    /// Time source for `iat`.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    ///
    /// Fails with `SigningMisconfigured` if the key is unusable, so a bad key
    /// stops startup instead of failing individual requests.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        config.validate()?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::seconds(ttl_seconds(config.access_ttl_seconds)?),
            refresh_ttl: Duration::seconds(ttl_seconds(config.refresh_ttl_seconds)?),
            scope_builder: ScopeBuilder::new(),
            clock,
        })
    }

    /// Issues an access token for the account.
    pub fn issue_access_token(&self, snapshot: &AccountSnapshot) -> Result<IssuedToken, AppError> {
        self.issue(snapshot, TokenType::Access, self.access_ttl)
    }

    /// Issues a refresh token for the account.
    pub fn issue_refresh_token(
        &self,
        snapshot: &AccountSnapshot,
    ) -> Result<IssuedToken, AppError> {
        self.issue(snapshot, TokenType::Refresh, self.refresh_ttl)
    }

    /// Re-signs a refresh token with a new `iat` and `jti`.
    ///
    /// Subject, issuer, scope and the original `exp` are carried over, so the
    /// absolute lifetime of a refresh chain never grows. The old token is
    /// parsed without checking its signature or revocation status; callers
    /// must have verified it first.
    pub fn rotate_refresh_token(&self, old_token: &str) -> Result<IssuedToken, AppError> {
        let old = read_unverified(old_token)?;

        let claims = Claims {
            sub: old.sub,
            iss: old.iss,
            iat: self.clock.now().timestamp(),
            exp: old.exp,
            jti: Uuid::new_v4(),
            token_type: TokenType::Refresh,
            scope: old.scope,
        };

        let token = self.sign(&claims)?;
        info!(
            old_jti = %old.jti,
            jti = %claims.jti,
            "Refresh token rotated"
        );
        Ok(IssuedToken { token, claims })
    }

    fn issue(
        &self,
        snapshot: &AccountSnapshot,
        token_type: TokenType,
        ttl: Duration,
    ) -> Result<IssuedToken, AppError> {
        let now = self.clock.now();
        let claims = Claims {
            sub: snapshot.account.email.clone(),
            iss: snapshot.account.id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4(),
            token_type,
            scope: self.scope_builder.build(&snapshot.graph),
        };

        let token = self.sign(&claims)?;
        Ok(IssuedToken { token, claims })
    }

    fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, token_type = %claims.token_type, "Token signing failed");
            AppError::with_source(
                ErrorKind::SigningMisconfigured,
                format!("Failed to sign {} token", claims.token_type),
                e,
            )
        })
    }
}

/// Decodes the claims section without checking signature, expiry or revocation.
fn read_unverified(token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|_| AppError::unauthenticated("Token could not be parsed"))
}

fn ttl_seconds(value: u64) -> Result<i64, AppError> {
    i64::try_from(value)
        .map_err(|_| AppError::configuration(format!("Token lifetime {value}s is out of range")))
}
