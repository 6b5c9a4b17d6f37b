//! Password hashing and credential checks.

pub mod hasher;
pub mod verifier;

pub use hasher::PasswordHasher;
pub use verifier::Argon2CredentialVerifier;
