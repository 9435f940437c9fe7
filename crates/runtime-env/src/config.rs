//! Runtime environment client configuration.

use std::env;

use common::{CachePolicyConfig, HttpClientConfig};
use domain::{DEV_BACKEND_URL, PROD_BACKEND_URL};

pub const ENV_MODE: &str = "RUNTIME_ENV_MODE";
pub const ENV_BACKEND_URL: &str = "RUNTIME_ENV_BACKEND_URL";
pub const ENV_ORIGIN: &str = "RUNTIME_ENV_ORIGIN";
pub const ENV_CONNECT_TIMEOUT_MS: &str = "RUNTIME_ENV_CONNECT_TIMEOUT_MS";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "RUNTIME_ENV_REQUEST_TIMEOUT_MS";
pub const ENV_MAX_AGE_SECONDS: &str = "RUNTIME_ENV_MAX_AGE_SECONDS";
pub const ENV_RETRY_FAILED_SECONDS: &str = "RUNTIME_ENV_RETRY_FAILED_SECONDS";

/// Deployment mode, selecting the default backend address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Mode::Development),
            "production" | "prod" => Some(Mode::Production),
            _ => None,
        }
    }

    /// Backend address for this mode; empty means same-origin.
    pub fn default_backend_url(&self) -> &'static str {
        match self {
            Mode::Development => DEV_BACKEND_URL,
            Mode::Production => PROD_BACKEND_URL,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Mode::Development
        } else {
            Mode::Production
        }
    }
}

/// Runtime environment client configuration.
#[derive(Debug, Clone)]
pub struct RuntimeEnvConfig {
    /// Deployment mode
    pub mode: Mode,
    /// Endpoint and timeouts
    pub http: HttpClientConfig,
    /// Freshness of cached values
    pub cache: CachePolicyConfig,
}

impl RuntimeEnvConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup(ENV_MODE) {
            Some(value) => Mode::parse(&value).unwrap_or_else(|| {
                tracing::warn!("Unrecognized {} {:?}, using default", ENV_MODE, value);
                Mode::default()
            }),
            None => Mode::default(),
        };

        let defaults = HttpClientConfig::default();
        let http = HttpClientConfig {
            base_url: lookup(ENV_BACKEND_URL)
                .unwrap_or_else(|| mode.default_backend_url().to_string()),
            origin: lookup(ENV_ORIGIN).filter(|origin| !origin.trim().is_empty()),
            connect_timeout_ms: parse_number(&lookup, ENV_CONNECT_TIMEOUT_MS)
                .unwrap_or(defaults.connect_timeout_ms),
            request_timeout_ms: parse_number(&lookup, ENV_REQUEST_TIMEOUT_MS)
                .unwrap_or(defaults.request_timeout_ms),
        };

        let cache = CachePolicyConfig {
            max_age_seconds: parse_number(&lookup, ENV_MAX_AGE_SECONDS),
            retry_failed_seconds: parse_number(&lookup, ENV_RETRY_FAILED_SECONDS),
        };

        Self { mode, http, cache }
    }

    /// Development configuration pointed at an explicit backend.
    pub fn for_backend(base_url: impl Into<String>) -> Self {
        Self {
            mode: Mode::Development,
            http: HttpClientConfig {
                base_url: base_url.into(),
                ..HttpClientConfig::default()
            },
            cache: CachePolicyConfig::default(),
        }
    }
}

impl Default for RuntimeEnvConfig {
    fn default() -> Self {
        let mode = Mode::default();
        Self {
            mode,
            http: HttpClientConfig {
                base_url: mode.default_backend_url().to_string(),
                ..HttpClientConfig::default()
            },
            cache: CachePolicyConfig::default(),
        }
    }
}

fn parse_number<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {} {:?}", key, raw);
            None
        }
    }
}
