//! Authentication flows over issued tokens.

pub mod orchestrator;
pub mod outcome;

pub use orchestrator::AuthOrchestrator;
pub use outcome::{Introspection, LoginResult, TokenPair};
