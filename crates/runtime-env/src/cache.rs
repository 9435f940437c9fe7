//! Runtime environment cache.
//!
//! Owns the memoized mapping for the lifetime of the application. Construct
//! it once at startup and share it by `Arc` or reference.
//!
//! Fetch failures never reach callers: they are logged and replaced with an
//! empty mapping (fail-open). How long either outcome is kept is decided by
//! [`CachePolicy`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use common::{AppResult, CachePolicyConfig};
use domain::{EnvKey, RuntimeEnv};

use crate::config::RuntimeEnvConfig;
use crate::loader::{Expiring, MemoizedLoader};
use crate::source::{EnvSource, HttpEnvSource};

/// How long fetched mappings are kept.
///
/// The default keeps both a successful mapping and the empty fallback for
/// the lifetime of the cache, so a backend that is down at startup leaves
/// the application with an empty mapping until [`RuntimeEnvCache::refresh`]
/// is called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CachePolicy {
    /// Lifetime of a successfully fetched mapping
    pub max_age: Option<Duration>,
    /// Delay after a failure before the next access fetches again
    pub retry_failed_after: Option<Duration>,
}

impl CachePolicy {
    /// Keep every outcome until explicitly refreshed.
    pub fn forever() -> Self {
        Self::default()
    }
}

impl From<&CachePolicyConfig> for CachePolicy {
    fn from(config: &CachePolicyConfig) -> Self {
        Self {
            max_age: config.max_age_seconds.map(Duration::from_secs),
            retry_failed_after: config.retry_failed_seconds.map(Duration::from_secs),
        }
    }
}

/// Memoized accessor for the runtime environment mapping.
pub struct RuntimeEnvCache {
    source: Arc<dyn EnvSource>,
    loader: MemoizedLoader<RuntimeEnv>,
    policy: CachePolicy,
}

impl RuntimeEnvCache {
    /// Create a cache over any source.
    pub fn new(source: Arc<dyn EnvSource>, policy: CachePolicy) -> Self {
        Self {
            source,
            loader: MemoizedLoader::new(),
            policy,
        }
    }

    /// Create a cache fetching over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend endpoint is misconfigured.
    pub fn from_config(config: &RuntimeEnvConfig) -> AppResult<Self> {
        let source = HttpEnvSource::new(&config.http)?;
        info!("Runtime environment endpoint: {}", source.endpoint());
        Ok(Self::new(Arc::new(source), CachePolicy::from(&config.cache)))
    }

    /// Get the runtime environment mapping.
    ///
    /// Fetches on first use and memoizes the result. Concurrent callers
    /// before the first fetch settles share that fetch and receive the same
    /// `Arc`. Resolves to an empty mapping when the fetch fails.
    pub async fn get_config(&self) -> Arc<RuntimeEnv> {
        let source = Arc::clone(&self.source);
        let policy = self.policy;

        self.loader
            .get_or_load(move || async move {
                match source.fetch().await {
                    Ok(env) => {
                        info!("Runtime environment loaded ({} keys set)", env.iter().count());
                        Expiring::new(env, policy.max_age)
                    }
                    Err(e) => {
                        error!("Error fetching runtime environment variables: {}", e);
                        Expiring::new(RuntimeEnv::default(), policy.retry_failed_after)
                    }
                }
            })
            .await
    }

    /// Get a single value from the runtime environment mapping.
    pub async fn get_config_value(&self, key: EnvKey) -> Option<String> {
        self.get_config().await.get(key).map(str::to_string)
    }

    /// Cached mapping, if one is present and fresh. Never fetches.
    pub fn cached(&self) -> Option<Arc<RuntimeEnv>> {
        self.loader.peek()
    }

    /// Forget the cached mapping; the next access fetches again.
    pub fn invalidate(&self) {
        self.loader.invalidate();
    }

    /// Drop the cached mapping and fetch a new one.
    pub async fn refresh(&self) -> Arc<RuntimeEnv> {
        self.invalidate();
        self.get_config().await
    }
}
