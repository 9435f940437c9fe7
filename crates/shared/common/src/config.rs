//! Shared configuration structures.

use std::time::Duration;

use domain::DEV_BACKEND_URL;
use serde::{Deserialize, Serialize};

/// HTTP client connection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HttpClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:3001"); empty for same-origin
    pub base_url: String,
    /// Origin a same-origin request resolves against
    pub origin: Option<String>,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl HttpClientConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEV_BACKEND_URL.to_string(),
            origin: None,
            connect_timeout_ms: 5000,
            request_timeout_ms: 30000,
        }
    }
}

/// Cache freshness configuration.
///
/// `None` means the entry never goes stale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CachePolicyConfig {
    /// Lifetime of a successfully fetched value, in seconds
    pub max_age_seconds: Option<u64>,
    /// Delay before a failed fetch may be attempted again, in seconds
    pub retry_failed_seconds: Option<u64>,
}
