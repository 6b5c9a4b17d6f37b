//! Authorization scope derivation.

pub mod builder;

pub use builder::ScopeBuilder;
