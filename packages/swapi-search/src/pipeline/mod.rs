//! Fan-out aggregation pipeline.
//!
//! ```text
//! Aggregator ── root index ──► Category scanner (per category, fixed order)
//!                                   │ filter by name, then per item:
//!                                   ▼
//!                              Enrichment ── films (concurrent) ──► homeworld ──► species
//!                                   │
//!                                   ▼
//!                              Throttle ── next item
//! ```

pub mod aggregate;
pub mod enrich;
pub mod scan;

pub use aggregate::Aggregator;
pub use enrich::resolve;
pub use scan::scan;

/// Normalize raw input for matching: trimmed and lower-cased.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}
