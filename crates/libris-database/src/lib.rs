//! # libris-database
//!
//! PostgreSQL connection management and the repositories backing the
//! account directory, the revocation store and the maintenance flag.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
