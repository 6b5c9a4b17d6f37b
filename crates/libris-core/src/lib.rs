//! # libris-core
//!
//! Core crate for the Libris authentication subsystem. Contains the
//! configuration schemas, the collaborator traits implemented by the
//! storage and auth crates, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Libris crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
