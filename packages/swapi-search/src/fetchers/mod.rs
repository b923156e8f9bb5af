//! Fetcher implementations.
//!
//! - [`HttpFetcher`] - reqwest-backed JSON fetcher
//! - [`crate::testing::MockFetcher`] - canned responses for tests

mod http;

pub use http::HttpFetcher;
