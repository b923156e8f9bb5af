//! Incremental search over the Star Wars API.
//!
//! Given a free-text query, walks the API's resource graph (root index →
//! category listings → referenced films, planets and species), matches items
//! by name, resolves their references into display strings, and returns a
//! deduplicated, name-sorted result set.
//!
//! # Usage
//!
//! ```rust,ignore
//! use swapi_search::{Aggregator, SearchConfig};
//!
//! let aggregator = Aggregator::from_config(SearchConfig::from_env()?)?;
//! let records = aggregator.aggregate("skywalker").await;
//! ```
//!
//! Interactive front ends should go through [`SearchSession`], which
//! debounces input and drops results from superseded queries.
//!
//! # Modules
//!
//! - [`traits`] - The [`Fetcher`] seam
//! - [`fetchers`] - HTTP fetcher
//! - [`pipeline`] - Enrichment, category scanning and aggregation
//! - [`session`] - Debounced, cancellable query sessions
//! - [`types`] - Upstream resources, result records, configuration
//! - [`testing`] - Mock fetcher for tests

pub mod collate;
pub mod error;
pub mod fetchers;
pub mod pipeline;
pub mod session;
pub mod testing;
pub mod throttle;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{FetchError, FetchResult, SearchError, SearchResult};
pub use fetchers::HttpFetcher;
pub use pipeline::{normalize_query, Aggregator};
pub use session::{SearchSession, SearchUpdate};
pub use throttle::Throttle;
pub use traits::fetcher::{fetch_as, Fetcher};
pub use types::{
    config::SearchConfig,
    record::{EnrichedFields, ResultRecord, HUMAN, SPECIES_ERROR, UNKNOWN},
    resource::{Category, CategoryPage, Item, RootIndex},
};

// Re-export testing utilities
pub use testing::MockFetcher;
