//! Sources of the runtime environment mapping.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use common::{AppError, AppResult, HttpClientConfig};
use domain::{RuntimeEnv, RUNTIME_ENV_PATH};

use crate::config::ENV_ORIGIN;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Something that can produce the runtime environment mapping.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EnvSource: Send + Sync {
    /// Fetch the current mapping.
    async fn fetch(&self) -> AppResult<RuntimeEnv>;
}

/// Fetches the mapping with `GET {backend}/api/runtime-env`.
pub struct HttpEnvSource {
    client: Client,
    endpoint: Url,
}

impl HttpEnvSource {
    /// Build the HTTP client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when the endpoint cannot be resolved or
    /// the client cannot be constructed.
    pub fn new(config: &HttpClientConfig) -> AppResult<Self> {
        let endpoint = endpoint_url(config)?;
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    /// Resolved endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl EnvSource for HttpEnvSource {
    async fn fetch(&self) -> AppResult<RuntimeEnv> {
        debug!("Fetching runtime environment from {}", self.endpoint);

        let response = self.client.get(self.endpoint.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
            ));
        }

        let body = response.bytes().await?;
        let env = serde_json::from_slice(&body)?;
        Ok(env)
    }
}

/// Resolve the runtime environment endpoint.
///
/// The path is appended to the backend URL, keeping any prefix it carries.
/// An empty backend URL means a same-origin request, which resolves against
/// the configured origin.
pub fn endpoint_url(config: &HttpClientConfig) -> AppResult<Url> {
    let base = match config.base_url.trim() {
        "" => config.origin.as_deref().map(str::trim).ok_or_else(|| {
            AppError::config(format!("Same-origin request requires {} to be set", ENV_ORIGIN))
        })?,
        base => base,
    };

    let mut url = Url::parse(base)
        .map_err(|e| AppError::config(format!("Invalid backend URL {:?}: {}", base, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::config(format!(
            "Backend URL {:?} must use http or https",
            base
        )));
    }

    let path = format!("{}{}", url.path().trim_end_matches('/'), RUNTIME_ENV_PATH);
    url.set_path(&path);
    url.set_query(None);
    Ok(url)
}
