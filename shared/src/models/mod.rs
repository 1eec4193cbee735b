//! Data models
//!
//! Shared between the booking engine, the store API and the REST client.
//! All IDs are `i64`; JSON field names are camelCase.

pub mod booking;
pub mod dining_table;
pub mod restaurant;
pub mod service_item;

// Re-exports
pub use booking::*;
pub use dining_table::*;
pub use restaurant::*;
pub use service_item::*;
