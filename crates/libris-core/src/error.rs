//! Unified application error types for Libris.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The supplied password does not match the stored credentials.
    CredentialMismatch,
    /// No account exists for the supplied identity.
    AccountNotFound,
    /// The account exists but has not been activated.
    AccountInactive,
    /// Maintenance mode is on and the account holds no privileged role.
    MaintenanceBlocked,
    /// A token failed verification (malformed, bad signature, expired, or revoked).
    Unauthenticated,
    /// A token of the wrong type was presented (access where refresh is required).
    WrongTokenType,
    /// The signing key is missing or unusable.
    SigningMisconfigured,
    /// Input validation failed.
    Validation,
    /// A configuration error occurred.
    Configuration,
    /// A database error occurred.
    Database,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl ErrorKind {
    /// Whether this kind describes a caller mistake rather than an infrastructure failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::CredentialMismatch
                | Self::AccountNotFound
                | Self::AccountInactive
                | Self::MaintenanceBlocked
                | Self::Unauthenticated
                | Self::WrongTokenType
                | Self::Validation
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CredentialMismatch => write!(f, "CREDENTIAL_MISMATCH"),
            Self::AccountNotFound => write!(f, "ACCOUNT_NOT_FOUND"),
            Self::AccountInactive => write!(f, "ACCOUNT_INACTIVE"),
            Self::MaintenanceBlocked => write!(f, "MAINTENANCE_BLOCKED"),
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::WrongTokenType => write!(f, "WRONG_TOKEN_TYPE"),
            Self::SigningMisconfigured => write!(f, "SIGNING_MISCONFIGURED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Database => write!(f, "DATABASE"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Libris.
///
/// Every operation of the authentication subsystem returns this type so
/// callers branch on [`ErrorKind`] instead of unwinding.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a credential-mismatch error.
    pub fn credential_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialMismatch, message)
    }

    /// Create an account-not-found error.
    pub fn account_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccountNotFound, message)
    }

    /// Create an account-inactive error.
    pub fn account_inactive(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccountInactive, message)
    }

    /// Create a maintenance-blocked error.
    pub fn maintenance_blocked(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MaintenanceBlocked, message)
    }

    /// Create an unauthenticated error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Create a wrong-token-type error.
    pub fn wrong_token_type(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::WrongTokenType, message)
    }

    /// Create a signing-misconfigured error.
    pub fn signing_misconfigured(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SigningMisconfigured, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether the error was caused by the caller rather than the infrastructure.
    pub fn is_client_error(&self) -> bool {
        self.kind.is_client_error()
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind() {
        let err = AppError::wrong_token_type("expected refresh token");
        assert_eq!(err.to_string(), "WRONG_TOKEN_TYPE: expected refresh token");
    }

    #[test]
    fn test_client_error_partition() {
        assert!(AppError::credential_mismatch("x").is_client_error());
        assert!(AppError::unauthenticated("x").is_client_error());
        assert!(!AppError::database("x").is_client_error());
        assert!(!AppError::signing_misconfigured("x").is_client_error());
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("disk");
        let err: AppError = io.into();
        assert!(std::error::Error::source(&err).is_some());
        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::Internal);
        assert!(cloned.source.is_none());
    }
}
