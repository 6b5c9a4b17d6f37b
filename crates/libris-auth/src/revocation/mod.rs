//! Revoked token registry, its in-memory backend, and the expiry sweeper.

pub mod memory;
pub mod registry;
pub mod sweeper;

pub use memory::MemoryRevocationStore;
pub use registry::RevocationRegistry;
pub use sweeper::RevocationSweeper;
