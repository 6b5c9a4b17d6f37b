//! Account domain entities.

pub mod directory;
pub mod model;
pub mod role;
pub mod snapshot;

pub use directory::AccountDirectory;
pub use model::Account;
pub use role::{Permission, Role, RoleGraph};
pub use snapshot::AccountSnapshot;
