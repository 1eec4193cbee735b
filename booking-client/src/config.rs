//! Client configuration

use std::time::Duration;

/// Default bound on a single request
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Client configuration for connecting to the booking store
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Store base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// `STORE_URL` and `REQUEST_TIMEOUT_MS`, with defaults
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("STORE_URL").unwrap_or_else(|_| "http://localhost:3000".into());
        let timeout_ms = std::env::var("REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        Self {
            base_url,
            timeout_ms,
        }
    }

    /// Set the request timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}
