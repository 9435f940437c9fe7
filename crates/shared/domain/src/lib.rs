//! Domain layer - Runtime environment model.
//!
//! This crate contains pure domain types with no infrastructure dependencies.
//! The loader and any consumer share the key set defined here.

pub mod constants;
pub mod env;
pub mod error;

pub use constants::*;
pub use env::{EnvKey, RuntimeEnv};
pub use error::DomainError;
