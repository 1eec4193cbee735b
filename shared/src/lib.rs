//! Shared types for the table-reservation workspace
//!
//! Common types used across the booking engine and the REST client:
//! wire models, booking rules, the unified error system and the
//! collaborator interfaces (catalog + booking store).

pub mod error;
pub mod models;
pub mod rules;
pub mod store;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use store::{BookingRepository, CatalogGateway, StoreError, StoreResult};
