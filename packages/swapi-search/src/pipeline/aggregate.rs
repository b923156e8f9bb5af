//! Aggregation: root index → categories → merged, deduplicated, sorted.

use futures::future::join_all;
use indexmap::IndexSet;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::{normalize_query, scan};
use crate::collate;
use crate::error::{SearchError, SearchResult};
use crate::fetchers::HttpFetcher;
use crate::throttle::Throttle;
use crate::traits::fetcher::{fetch_as, Fetcher};
use crate::types::config::SearchConfig;
use crate::types::record::ResultRecord;
use crate::types::resource::RootIndex;

/// Runs one query across every recognized category.
///
/// All state is query-scoped; the aggregator itself only holds the fetcher
/// and configuration and can be shared between queries.
///
/// # Example
///
/// ```rust,ignore
/// use swapi_search::{Aggregator, SearchConfig};
///
/// let aggregator = Aggregator::from_config(SearchConfig::from_env()?)?;
/// for record in aggregator.aggregate("sky").await {
///     println!("{record}");
/// }
/// ```
pub struct Aggregator<F: Fetcher> {
    fetcher: F,
    config: SearchConfig,
}

impl Aggregator<HttpFetcher> {
    /// Create an aggregator backed by [`HttpFetcher`].
    pub fn from_config(config: SearchConfig) -> SearchResult<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::from_config(&config)?;
        Ok(Self::new(fetcher, config))
    }
}

impl<F: Fetcher> Aggregator<F> {
    pub fn new(fetcher: F, config: SearchConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search every category for `query`.
    ///
    /// Never fails: an unreachable root index is logged and yields an empty
    /// result, as does a blank query (without touching the network).
    pub async fn aggregate(&self, query: &str) -> Vec<ResultRecord> {
        match self.try_aggregate(query, &CancellationToken::new()).await {
            Ok(records) => records,
            Err(e) => {
                error!(query = %query, error = %e, "Search failed");
                Vec::new()
            }
        }
    }

    /// Search with cancellation support.
    ///
    /// Surfaces [`SearchError::RootIndex`] and [`SearchError::Cancelled`]
    /// instead of absorbing them.
    pub async fn try_aggregate(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> SearchResult<Vec<ResultRecord>> {
        let needle = normalize_query(query);
        if needle.is_empty() {
            debug!("Empty query, skipping search");
            return Ok(Vec::new());
        }
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        tokio::select! {
            result = self.run(&needle, cancel) => result,
            _ = cancel.cancelled() => Err(SearchError::Cancelled),
        }
    }

    async fn run(&self, needle: &str, cancel: &CancellationToken) -> SearchResult<Vec<ResultRecord>> {
        let started = Instant::now();
        info!(query = %needle, fetcher = self.fetcher.name(), "Search starting");

        let index: RootIndex = fetch_as(&self.fetcher, &self.config.api_root)
            .await
            .map_err(|e| {
                error!(url = %self.config.api_root, error = %e, "Root index fetch failed");
                SearchError::RootIndex(e)
            })?;

        let categories = index.categories();
        let throttle = Throttle::new(self.config.rate_limit);

        // Per-category results, in enumeration order either way
        let batches: Vec<Vec<ResultRecord>> = if self.config.parallel_categories {
            join_all(categories.iter().map(|(category, url)| {
                scan(&self.fetcher, *category, url, needle, &throttle, cancel)
            }))
            .await
        } else {
            let mut batches = Vec::with_capacity(categories.len());
            for (category, url) in &categories {
                if cancel.is_cancelled() {
                    break;
                }
                batches.push(scan(&self.fetcher, *category, url, needle, &throttle, cancel).await);
            }
            batches
        };

        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let records = merge(batches);
        info!(
            query = %needle,
            categories = categories.len(),
            records = records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Search complete"
        );
        Ok(records)
    }
}

/// Deduplicate on full structural equality and sort by name.
///
/// Insertion order is kept for the set so equal names stay in category
/// order after the stable sort.
pub fn merge(batches: impl IntoIterator<Item = Vec<ResultRecord>>) -> Vec<ResultRecord> {
    let unique: IndexSet<ResultRecord> = batches.into_iter().flatten().collect();
    let mut records: Vec<ResultRecord> = unique.into_iter().collect();
    records.sort_by(|a, b| collate::compare(&a.name, &b.name));
    records
}
