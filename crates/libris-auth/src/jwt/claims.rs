//! Claims structure carried by access, refresh and activation tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use libris_core::error::AppError;

/// Claims payload embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account email.
    pub sub: String,
    /// Issuer: the account id.
    pub iss: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token id, the revocation key.
    pub jti: Uuid,
    /// Token type: "access" or "refresh".
    pub token_type: TokenType,
    /// Flattened role/permission string.
    pub scope: String,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived token for API requests and account activation.
    Access,
    /// Long-lived token for obtaining new access tokens.
    Refresh,
}

impl TokenType {
    /// Return the type as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Claims {
    /// Returns the account email from the subject claim.
    pub fn email(&self) -> &str {
        &self.sub
    }

    /// Parses the account id carried in the issuer claim.
    pub fn account_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.iss)
            .map_err(|_| AppError::unauthenticated("Token issuer is not an account id"))
    }

    /// Returns the issue time as a `DateTime<Utc>`.
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or_default()
    }

    /// Returns the stored expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}
