//! Results returned by the authentication flows.

use serde::{Deserialize, Serialize};

/// Tokens handed out by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    /// Short-lived access token.
    pub access_token: String,
    /// Refresh token for obtaining new access tokens.
    pub refresh_token: String,
    /// Present only when the account still has its first-login flag set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_login: Option<bool>,
}

/// A new access token and the rotated refresh token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Fresh access token.
    pub access_token: String,
    /// Rotated refresh token, keeping the original absolute expiry.
    pub refresh_token: String,
}

/// Whether an access token currently verifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Introspection {
    pub valid: bool,
}
