//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Placeholder shipped in sample configuration files; never accepted at startup.
pub const PLACEHOLDER_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Minimum HMAC key length in bytes (HS256 block-size guidance).
pub const MIN_SECRET_BYTES: usize = 32;

/// Token signing and lifetime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_seconds: u64,
    /// Refresh token lifetime in seconds.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_seconds: u64,
    /// Name of the plain, unprivileged role blocked during maintenance.
    #[serde(default = "default_user_role")]
    pub user_role_name: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_ttl_seconds: default_access_ttl(),
            refresh_ttl_seconds: default_refresh_ttl(),
            user_role_name: default_user_role(),
        }
    }
}

impl AuthConfig {
    /// Checks that the signing key and lifetimes are usable.
    ///
    /// Any failure here is fatal: the subsystem must not start.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(AppError::signing_misconfigured("auth.jwt_secret is empty"));
        }
        if self.jwt_secret == PLACEHOLDER_SECRET {
            return Err(AppError::signing_misconfigured(
                "auth.jwt_secret still holds the placeholder value",
            ));
        }
        if self.jwt_secret.len() < MIN_SECRET_BYTES {
            return Err(AppError::signing_misconfigured(format!(
                "auth.jwt_secret must be at least {MIN_SECRET_BYTES} bytes, got {}",
                self.jwt_secret.len()
            )));
        }
        if self.access_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "auth.access_ttl_seconds must be greater than zero",
            ));
        }
        if self.refresh_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "auth.refresh_ttl_seconds must be greater than zero",
            ));
        }
        if self.user_role_name.trim().is_empty() {
            return Err(AppError::configuration("auth.user_role_name is empty"));
        }
        Ok(())
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_SECRET.to_string()
}

fn default_access_ttl() -> u64 {
    900
}

fn default_refresh_ttl() -> u64 {
    86_400
}

fn default_user_role() -> String {
    "USER".to_string()
}
