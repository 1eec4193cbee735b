//! Client error types

use shared::{AppError, StoreError};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with an error envelope
    #[error("API error: {0}")]
    Api(AppError),

    /// Server error without a usable body
    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Map to the store error seen by the booking engine.
    ///
    /// `timeout_ms` is the client's configured bound, reported on timeouts.
    pub fn into_store_error(self, timeout_ms: u64) -> StoreError {
        match self {
            ClientError::Http(e) if e.is_timeout() => StoreError::Timeout(timeout_ms),
            ClientError::Http(e) if e.is_decode() => StoreError::Decode(e.to_string()),
            ClientError::Http(e) => StoreError::Transport(e.to_string()),
            ClientError::Api(err) => err.into(),
            ClientError::Server { status, body } => {
                StoreError::Transport(format!("HTTP {status}: {body}"))
            }
            ClientError::InvalidResponse(msg) => StoreError::Decode(msg),
        }
    }
}
