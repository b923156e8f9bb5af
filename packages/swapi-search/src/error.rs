//! Typed errors for the search library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell a
//! transport failure from a malformed body without string matching.

use thiserror::Error;

/// Errors produced by a single resource fetch.
///
/// Every variant carries the URL that failed so absorbed failures can be
/// logged with their origin.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL could not be parsed
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Network unreachable, connection reset, TLS failure
    #[error("transport error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Upstream answered with a non-2xx status
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    /// Request exceeded the configured timeout
    #[error("timeout fetching {url}")]
    Timeout { url: String },

    /// Body was not JSON or lacked the expected fields
    #[error("malformed body from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// URL of the resource that failed.
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url }
            | FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Timeout { url }
            | FetchError::Parse { url, .. } => url,
        }
    }

    /// Network-level failure: unreachable, non-2xx, or timed out.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::InvalidUrl { .. }
                | FetchError::Transport { .. }
                | FetchError::Status { .. }
                | FetchError::Timeout { .. }
        )
    }

    /// The body arrived but could not be decoded.
    pub fn is_parse(&self) -> bool {
        matches!(self, FetchError::Parse { .. })
    }
}

/// Errors that end a whole query.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The root index could not be fetched, so no category is reachable
    #[error("root index unavailable: {0}")]
    RootIndex(#[source] FetchError),

    /// A newer query superseded this one
    #[error("query cancelled")]
    Cancelled,

    /// Configuration error
    #[error("config error: {reason}")]
    Config { reason: String },
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for search operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let status = FetchError::Status {
            url: "https://swapi.dev/api/films/1/".into(),
            status: 404,
        };
        assert!(status.is_transport());
        assert!(!status.is_parse());
        assert_eq!(status.url(), "https://swapi.dev/api/films/1/");

        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let parse = FetchError::Parse {
            url: "https://swapi.dev/api/".into(),
            source,
        };
        assert!(parse.is_parse());
        assert!(!parse.is_transport());
    }

    #[test]
    fn test_root_index_message_includes_cause() {
        let err = SearchError::RootIndex(FetchError::Timeout {
            url: "https://swapi.dev/api/".into(),
        });
        assert_eq!(
            err.to_string(),
            "root index unavailable: timeout fetching https://swapi.dev/api/"
        );
    }
}
