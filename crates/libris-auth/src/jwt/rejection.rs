//! Reasons a presented token is refused.

use thiserror::Error;

/// Why verification failed. Never shown to callers; logged and folded into
/// a single unauthenticated error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    /// The token is not a well-formed signed structure or its claims do not parse.
    #[error("token is malformed")]
    Malformed,
    /// The signature does not match the configured key.
    #[error("token signature is invalid")]
    BadSignature,
    /// The effective expiry is not after the current time.
    #[error("token has expired")]
    Expired,
    /// The token id is in the revocation registry.
    #[error("token has been revoked")]
    Revoked,
}
