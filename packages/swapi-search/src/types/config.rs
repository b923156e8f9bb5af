//! Configuration for the search pipeline and session.

use std::time::Duration;

use crate::error::{SearchError, SearchResult};

/// Public Star Wars API root.
pub const DEFAULT_API_ROOT: &str = "https://swapi.dev/api/";

/// Configuration for a search run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Root index URL.
    pub api_root: String,

    /// Pause after each enriched item within a category.
    ///
    /// Default: 100ms. Zero disables pacing.
    pub rate_limit: Duration,

    /// Quiet window before a typed query is executed.
    ///
    /// Default: 300ms.
    pub debounce: Duration,

    /// Per-request timeout. Exceeding it is a fetch failure like any other.
    ///
    /// Default: 30s.
    pub request_timeout: Duration,

    /// User agent sent with every request.
    pub user_agent: String,

    /// Scan categories concurrently instead of one after another.
    ///
    /// Output order is unaffected; only the outbound request rate changes.
    /// Default: false.
    pub parallel_categories: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            rate_limit: Duration::from_millis(100),
            debounce: Duration::from_millis(300),
            request_timeout: Duration::from_secs(30),
            user_agent: format!("swapi-search/{}", env!("CARGO_PKG_VERSION")),
            parallel_categories: false,
        }
    }
}

impl SearchConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `.env` if present. Unset variables keep their defaults:
    /// `SWAPI_ROOT`, `SEARCH_RATE_LIMIT_MS`, `SEARCH_DEBOUNCE_MS`,
    /// `SEARCH_REQUEST_TIMEOUT_SECS`, `SEARCH_PARALLEL_CATEGORIES`.
    pub fn from_env() -> SearchResult<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SearchResult<Self> {
        let mut config = Self::default();

        if let Some(root) = lookup("SWAPI_ROOT") {
            config = config.with_api_root(root);
        }
        if let Some(ms) = lookup("SEARCH_RATE_LIMIT_MS") {
            config.rate_limit = Duration::from_millis(parse_number("SEARCH_RATE_LIMIT_MS", &ms)?);
        }
        if let Some(ms) = lookup("SEARCH_DEBOUNCE_MS") {
            config.debounce = Duration::from_millis(parse_number("SEARCH_DEBOUNCE_MS", &ms)?);
        }
        if let Some(secs) = lookup("SEARCH_REQUEST_TIMEOUT_SECS") {
            config.request_timeout =
                Duration::from_secs(parse_number("SEARCH_REQUEST_TIMEOUT_SECS", &secs)?);
        }
        if let Some(flag) = lookup("SEARCH_PARALLEL_CATEGORIES") {
            config.parallel_categories = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(SearchError::Config {
                        reason: format!("SEARCH_PARALLEL_CATEGORIES must be a boolean, got {other:?}"),
                    })
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the API root is an absolute http(s) URL.
    pub fn validate(&self) -> SearchResult<()> {
        let parsed = url::Url::parse(&self.api_root).map_err(|e| SearchError::Config {
            reason: format!("api_root {:?} is not a valid URL: {e}", self.api_root),
        })?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SearchError::Config {
                reason: format!("api_root must be http(s), got {scheme}"),
            }),
        }
    }

    /// Set the root index URL.
    pub fn with_api_root(mut self, root: impl Into<String>) -> Self {
        self.api_root = root.into();
        self
    }

    /// Set the pause between enriched items.
    pub fn with_rate_limit(mut self, interval: Duration) -> Self {
        self.rate_limit = interval;
        self
    }

    /// Set the debounce window.
    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debounce = window;
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Scan categories concurrently.
    pub fn with_parallel_categories(mut self, parallel: bool) -> Self {
        self.parallel_categories = parallel;
        self
    }
}

fn parse_number(key: &str, raw: &str) -> SearchResult<u64> {
    raw.trim().parse().map_err(|_| SearchError::Config {
        reason: format!("{key} must be a non-negative integer, got {raw:?}"),
    })
}
