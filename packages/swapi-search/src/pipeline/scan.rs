//! Category scanning: one listing page, filtered and enriched item by item.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{enrich, normalize_query};
use crate::throttle::Throttle;
use crate::traits::fetcher::{fetch_as, Fetcher};
use crate::types::record::ResultRecord;
use crate::types::resource::{Category, CategoryPage};

/// Scan one category for items whose name contains `query`.
///
/// A failed listing fetch yields no records. Matching items are enriched
/// one at a time in listing order, with a throttle pause after each.
/// Stops early, returning what it has, once `cancel` fires.
pub async fn scan<F: Fetcher + ?Sized>(
    fetcher: &F,
    category: Category,
    url: &str,
    query: &str,
    throttle: &Throttle,
    cancel: &CancellationToken,
) -> Vec<ResultRecord> {
    let needle = normalize_query(query);

    let page = match fetch_as::<CategoryPage, _>(fetcher, url).await {
        Ok(page) => page,
        Err(e) => {
            warn!(category = %category, url = %url, error = %e, "Category fetch failed, skipping");
            return Vec::new();
        }
    };

    let matches: Vec<_> = page
        .results
        .into_iter()
        .filter(|item| item.matches(&needle))
        .collect();

    debug!(category = %category, matches = matches.len(), "Category filtered");

    let mut records = Vec::with_capacity(matches.len());
    for item in matches {
        if cancel.is_cancelled() {
            debug!(category = %category, "Scan cancelled");
            break;
        }

        debug!(category = %category, item = %item.name, "Enriching item");
        let fields = enrich::resolve(fetcher, &item, category).await;
        records.push(ResultRecord::new(item.name, category, fields));

        if !throttle.throttle_or_cancel(cancel).await {
            debug!(category = %category, "Scan cancelled during pacing");
            break;
        }
    }

    info!(category = %category, records = records.len(), "Category scan complete");
    records
}
