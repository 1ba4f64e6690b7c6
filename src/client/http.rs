//! HTTP client for the greeting API.

use std::time::Duration;

use tracing::{debug, instrument};
use url::Url;

use crate::config::Config;
use crate::error::FetchError;

/// Client for the greeting API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL; the greeting lives at its root.
    base_url: Url,
}

impl ApiClient {
    /// Create a client for `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url).map_err(|source| FetchError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http, base_url })
    }

    /// Create a client from config.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(
            &config.api_base_url,
            Duration::from_millis(config.http_timeout_ms),
        )
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the root route and return its body as text.
    #[instrument(skip(self), fields(url = %self.base_url))]
    pub async fn fetch_root(&self) -> Result<String, FetchError> {
        let response = self.http.get(self.base_url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: self.base_url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!(len = body.len(), "fetched root");

        Ok(body)
    }
}
