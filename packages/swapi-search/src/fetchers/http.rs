//! HTTP-based fetcher implementation.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult, SearchError, SearchResult};
use crate::traits::fetcher::Fetcher;
use crate::types::config::SearchConfig;

/// Fetcher that performs a GET and parses the body as JSON.
///
/// Non-2xx responses, transport failures and timeouts all map to a
/// [`FetchError`]; there are no retries.
///
/// # Example
///
/// ```rust,ignore
/// use swapi_search::{HttpFetcher, SearchConfig};
///
/// let fetcher = HttpFetcher::from_config(&SearchConfig::default())?;
/// let root = fetcher.fetch("https://swapi.dev/api/").await?;
/// ```
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given timeout and user agent.
    pub fn new(timeout: Duration, user_agent: &str) -> SearchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| SearchError::Config {
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }

    /// Create a fetcher from search configuration.
    pub fn from_config(config: &SearchConfig) -> SearchResult<Self> {
        Self::new(config.request_timeout, &config.user_agent)
    }

    /// Use a pre-built client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn transport_error(url: &str, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                source: Box::new(e),
            }
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<Value> {
        let parsed = url::Url::parse(url).map_err(|_| FetchError::InvalidUrl {
            url: url.to_string(),
        })?;

        debug!(url = %url, "HTTP fetch starting");
        let response = self.client.get(parsed).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            Self::transport_error(url, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::transport_error(url, e))?;

        let value = serde_json::from_slice(&body).map_err(|source| FetchError::Parse {
            url: url.to_string(),
            source,
        })?;

        debug!(url = %url, bytes = body.len(), "HTTP fetch complete");
        Ok(value)
    }

    fn name(&self) -> &str {
        "http"
    }
}
