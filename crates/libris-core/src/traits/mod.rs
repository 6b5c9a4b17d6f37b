//! Collaborator traits defined in `libris-core` and implemented by other crates.

pub mod clock;
pub mod credential;
pub mod maintenance;
pub mod revocation;

pub use clock::{Clock, SystemClock};
pub use credential::CredentialVerifier;
pub use maintenance::MaintenanceFlag;
pub use revocation::RevocationStore;
