//! Token bookkeeping entities.

pub mod revoked;

pub use revoked::RevokedTokenRecord;
