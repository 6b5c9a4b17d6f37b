//! Repository implementations for Libris entities.

pub mod account;
pub mod revoked_token;
pub mod setting;

pub use account::AccountRepository;
pub use revoked_token::RevokedTokenRepository;
pub use setting::SettingRepository;
