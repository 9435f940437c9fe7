//! Domain-level errors.
//!
//! These errors represent invalid input against the runtime environment model.
//! They are independent of infrastructure concerns (HTTP, configuration).

use thiserror::Error;

/// Domain-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Key name is not part of the runtime environment
    #[error("Unknown runtime environment key: {0}")]
    UnknownKey(String),
}

impl DomainError {
    /// Create an unknown key error
    pub fn unknown_key(key: impl Into<String>) -> Self {
        DomainError::UnknownKey(key.into())
    }
}
