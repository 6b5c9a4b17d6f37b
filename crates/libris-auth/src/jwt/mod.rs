//! Signed token encoding, decoding, and claims management.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod rejection;

pub use claims::{Claims, TokenType};
pub use decoder::{TokenVerifier, VerifyMode};
pub use encoder::{IssuedToken, TokenIssuer};
pub use rejection::TokenRejection;
