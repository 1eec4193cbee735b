//! Reference booking store
//!
//! - [`MemoryStore`] - in-memory catalog + bookings, atomic create
//! - [`CatalogSeed`] - JSON catalog loaded at startup

pub mod memory;
pub mod seed;

pub use memory::MemoryStore;
pub use seed::{CatalogSeed, SeedError};
