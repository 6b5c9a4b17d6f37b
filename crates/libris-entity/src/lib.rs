//! # libris-entity
//!
//! Domain entity models for the Libris authentication subsystem. Database
//! entities derive `sqlx::FromRow`; the role/permission graph is held as
//! flat id-keyed collections so nothing here owns a back-reference.

pub mod account;
pub mod token;

pub use account::{Account, AccountDirectory, AccountSnapshot, Permission, Role, RoleGraph};
pub use token::RevokedTokenRecord;
