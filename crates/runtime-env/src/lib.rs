//! Runtime environment loader.
//!
//! Fetches the runtime environment mapping from the backend once, caches it
//! in an explicitly owned [`RuntimeEnvCache`] and serves accessors to the
//! rest of the application.
//!
//! ```no_run
//! use runtime_env::{RuntimeEnvCache, RuntimeEnvConfig};
//! use domain::EnvKey;
//!
//! # async fn example() -> common::AppResult<()> {
//! let cache = RuntimeEnvCache::from_config(&RuntimeEnvConfig::from_env())?;
//! let region = cache.get_config_value(EnvKey::AwsRegion).await;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod loader;
pub mod source;

pub use cache::{CachePolicy, RuntimeEnvCache};
pub use config::{Mode, RuntimeEnvConfig};
pub use loader::{Expiring, MemoizedLoader};
pub use source::{EnvSource, HttpEnvSource};
