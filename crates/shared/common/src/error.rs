//! Unified error handling.
//!
//! Provides a single error type for fetching and loading the runtime
//! environment. Fetch failures are recovered by the cache; the remaining
//! variants surface from configuration and the command line.

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Fetch failures
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected response status {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    // Configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    // Input
    #[error("{0}")]
    Validation(String),

    #[error("{0} is not set")]
    NotFound(String),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Get a stable error code
    pub fn code(&self) -> &'static str {
        match self {
            #[cfg(feature = "http")]
            AppError::Request(_) => "REQUEST_FAILED",
            AppError::Status { .. } => "BAD_STATUS",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this error means the configuration fetch failed
    pub fn is_fetch_failure(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            AppError::Request(_) => true,
            AppError::Status { .. } | AppError::Decode(_) => true,
            _ => false,
        }
    }

    /// Get a message safe to print (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnknownKey(key) => {
                AppError::Validation(format!("Unknown runtime environment key: {}", key))
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, what: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, what: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(what.into()))
    }
}

/// Convenience constructors
impl AppError {
    pub fn status(status: u16, reason: impl Into<String>) -> Self {
        AppError::Status {
            status,
            reason: reason.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        AppError::Decode(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
