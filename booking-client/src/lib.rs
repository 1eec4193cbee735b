//! Booking Client - HTTP client for the booking store
//!
//! [`HttpClient`] implements [`CatalogGateway`](shared::CatalogGateway) and
//! [`BookingRepository`](shared::BookingRepository) over the store's REST
//! resources, so a `BookingEngine` can run against a remote store.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::{ApiResponse, AppError, BookingRepository, CatalogGateway, StoreError};
