//! Testing utilities including a mock fetcher.
//!
//! Useful for exercising the search pipeline without network calls.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::Fetcher;

/// Canned outcome for one URL.
#[derive(Debug, Clone)]
enum MockResponse {
    Json(Value),
    Status(u16),
    Transport(String),
    RawBody(String),
}

/// A mock fetcher for testing.
///
/// Unregistered URLs answer with HTTP 404.
///
/// # Example
///
/// ```rust
/// use swapi_search::testing::MockFetcher;
/// use serde_json::json;
///
/// let mock = MockFetcher::new()
///     .with_json("https://swapi.dev/api/films/1/", json!({ "title": "A New Hope" }))
///     .with_status("https://swapi.dev/api/films/2/", 500);
/// ```
#[derive(Default, Clone)]
pub struct MockFetcher {
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create a new empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, url: impl Into<String>, response: MockResponse) {
        self.responses.write().unwrap().insert(url.into(), response);
    }

    /// Respond to `url` with a JSON body.
    pub fn add_json(&self, url: impl Into<String>, body: Value) {
        self.insert(url, MockResponse::Json(body));
    }

    /// Respond to `url` with a JSON body (builder pattern).
    pub fn with_json(self, url: impl Into<String>, body: Value) -> Self {
        self.add_json(url, body);
        self
    }

    /// Respond to `url` with a non-2xx status.
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.insert(url, MockResponse::Status(status));
        self
    }

    /// Fail `url` as if the network were unreachable.
    pub fn with_transport_error(self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.insert(url, MockResponse::Transport(message.into()));
        self
    }

    /// Respond to `url` with a raw body that is parsed as JSON on fetch.
    pub fn with_raw_body(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(url, MockResponse::RawBody(body.into()));
        self
    }

    /// Delay every response for `url`.
    pub fn with_delay(self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.write().unwrap().insert(url.into(), delay);
        self
    }

    /// URLs fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Total number of fetches.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Number of fetches of one URL.
    pub fn calls_to(&self, url: &str) -> usize {
        self.calls.read().unwrap().iter().filter(|u| *u == url).count()
    }

    /// Clear recorded calls.
    pub fn reset_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<Value> {
        self.calls.write().unwrap().push(url.to_string());

        let delay = self.delays.read().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let response = self.responses.read().unwrap().get(url).cloned();
        match response {
            Some(MockResponse::Json(value)) => Ok(value),
            Some(MockResponse::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
            Some(MockResponse::Transport(message)) => Err(FetchError::Transport {
                url: url.to_string(),
                source: message.into(),
            }),
            Some(MockResponse::RawBody(body)) => {
                serde_json::from_str(&body).map_err(|source| FetchError::Parse {
                    url: url.to_string(),
                    source,
                })
            }
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
