//! Commands module - CLI command implementations.

pub mod get;
pub mod keys;
pub mod show;
