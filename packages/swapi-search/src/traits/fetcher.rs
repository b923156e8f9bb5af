//! Fetcher trait: one GET, one parsed body.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::error::{FetchError, FetchResult};

/// Fetches a single resource and parses it as JSON.
///
/// Implementations perform exactly one attempt; a failure is final for that
/// call.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and return its parsed body.
    async fn fetch(&self, url: &str) -> FetchResult<Value>;

    /// Fetcher name for logging.
    fn name(&self) -> &str;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    async fn fetch(&self, url: &str) -> FetchResult<Value> {
        (**self).fetch(url).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Fetch `url` and decode it into `T`.
///
/// A body that is valid JSON but has the wrong shape is a
/// [`FetchError::Parse`].
pub async fn fetch_as<T, F>(fetcher: &F, url: &str) -> FetchResult<T>
where
    T: DeserializeOwned,
    F: Fetcher + ?Sized,
{
    let value = fetcher.fetch(url).await?;
    serde_json::from_value(value).map_err(|source| FetchError::Parse {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;
    use crate::types::resource::Film;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_as_decodes() {
        let mock = MockFetcher::new().with_json("https://swapi.dev/api/films/1/", json!({
            "title": "A New Hope",
            "episode_id": 4,
        }));

        let film: Film = fetch_as(&mock, "https://swapi.dev/api/films/1/").await.unwrap();
        assert_eq!(film.title, "A New Hope");
    }

    #[tokio::test]
    async fn test_fetch_as_shape_mismatch_is_parse_error() {
        let mock = MockFetcher::new()
            .with_json("https://swapi.dev/api/films/1/", json!({ "detail": "Not found" }));

        let err = fetch_as::<Film, _>(&mock, "https://swapi.dev/api/films/1/")
            .await
            .unwrap_err();
        assert!(err.is_parse());
        assert_eq!(err.url(), "https://swapi.dev/api/films/1/");
    }

    #[tokio::test]
    async fn test_arc_fetcher_delegates() {
        let mock = Arc::new(MockFetcher::new().with_json("https://a/", json!({ "name": "x" })));
        let shared: Arc<dyn Fetcher> = mock.clone();

        assert!(shared.fetch("https://a/").await.is_ok());
        assert_eq!(shared.name(), "mock");
        assert_eq!(mock.calls(), vec!["https://a/".to_string()]);
    }
}
