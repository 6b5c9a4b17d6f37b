//! # libris-auth
//!
//! Token-based authentication and session lifecycle for Libris.
//!
//! ## Modules
//!
//! - `scope`: flattening an account's role/permission graph into a scope string
//! - `jwt`: signed token issuance, rotation and verification
//! - `revocation`: the revoked-token registry, its in-memory store and sweeper
//! - `password`: Argon2id hashing and credential verification
//! - `session`: the authenticate / logout / refresh / introspect / activate flows

pub mod jwt;
pub mod password;
pub mod revocation;
pub mod scope;
pub mod session;

pub use jwt::{Claims, IssuedToken, TokenIssuer, TokenType, TokenVerifier, VerifyMode};
pub use password::{Argon2CredentialVerifier, PasswordHasher};
pub use revocation::{MemoryRevocationStore, RevocationRegistry, RevocationSweeper};
pub use scope::ScopeBuilder;
pub use session::{AuthOrchestrator, Introspection, LoginResult, TokenPair};
