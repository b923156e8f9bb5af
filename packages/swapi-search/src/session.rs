//! Interactive search session.
//!
//! Sits between a typing user and the [`Aggregator`]: queries are debounced,
//! each executed query gets a new generation, the previous in-flight query is
//! cancelled, and only results from the current generation reach the render
//! channel.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::pipeline::Aggregator;
use crate::traits::fetcher::Fetcher;
use crate::types::record::ResultRecord;

/// One render-ready outcome.
#[derive(Debug, Clone)]
pub struct SearchUpdate {
    /// Generation of the query that produced this update.
    pub generation: u64,
    pub query: String,
    /// Sorted, deduplicated matches. Empty for a blank query or on failure.
    pub records: Vec<ResultRecord>,
    /// Set when the root index could not be fetched.
    pub error: Option<String>,
}

/// Handle to a running search session.
///
/// # Example
///
/// ```rust,ignore
/// let aggregator = Arc::new(Aggregator::from_config(config.clone())?);
/// let (session, mut updates) = SearchSession::spawn(aggregator, config.debounce);
///
/// session.submit("sky");
/// while let Some(update) = updates.recv().await {
///     render(&update.records);
/// }
/// ```
pub struct SearchSession {
    queries: mpsc::UnboundedSender<String>,
    current: Arc<Mutex<u64>>,
    task: JoinHandle<()>,
}

impl SearchSession {
    /// Start a session; returns its handle and the render channel.
    pub fn spawn<F>(
        aggregator: Arc<Aggregator<F>>,
        debounce: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SearchUpdate>)
    where
        F: Fetcher + 'static,
    {
        let (query_tx, query_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let current = Arc::new(Mutex::new(0));

        let task = tokio::spawn(run(
            aggregator,
            debounce,
            query_rx,
            update_tx,
            Arc::clone(&current),
        ));

        let session = Self {
            queries: query_tx,
            current,
            task,
        };
        (session, update_rx)
    }

    /// Submit the current input text.
    ///
    /// Returns `false` if the session has stopped.
    pub fn submit(&self, query: impl Into<String>) -> bool {
        self.queries.send(query.into()).is_ok()
    }

    /// Generation of the most recently started query (0 before any).
    pub async fn generation(&self) -> u64 {
        *self.current.lock().await
    }

    /// Stop accepting input and wait for pending input to be dispatched.
    ///
    /// Queries already running finish on their own; the render channel
    /// closes once they have.
    pub async fn shutdown(self) {
        drop(self.queries);
        if let Err(e) = self.task.await {
            warn!(error = %e, "Search session task failed");
        }
    }
}

async fn run<F>(
    aggregator: Arc<Aggregator<F>>,
    debounce: Duration,
    mut queries: mpsc::UnboundedReceiver<String>,
    updates: mpsc::UnboundedSender<SearchUpdate>,
    current: Arc<Mutex<u64>>,
) where
    F: Fetcher + 'static,
{
    let mut in_flight: Option<CancellationToken> = None;
    let mut open = true;

    while open {
        let Some(mut query) = queries.recv().await else {
            break;
        };

        // Keep taking newer input until it goes quiet
        loop {
            match tokio::time::timeout(debounce, queries.recv()).await {
                Ok(Some(next)) => query = next,
                Ok(None) => {
                    open = false;
                    break;
                }
                Err(_) => break,
            }
        }

        let generation = {
            let mut current = current.lock().await;
            *current += 1;
            *current
        };

        if let Some(previous) = in_flight.take() {
            previous.cancel();
        }
        let cancel = CancellationToken::new();
        in_flight = Some(cancel.clone());

        debug!(query = %query, generation, "Dispatching query");
        tokio::spawn(execute(
            Arc::clone(&aggregator),
            query,
            generation,
            cancel,
            Arc::clone(&current),
            updates.clone(),
        ));
    }

    debug!("Search session input closed");
}

async fn execute<F>(
    aggregator: Arc<Aggregator<F>>,
    query: String,
    generation: u64,
    cancel: CancellationToken,
    current: Arc<Mutex<u64>>,
    updates: mpsc::UnboundedSender<SearchUpdate>,
) where
    F: Fetcher + 'static,
{
    let outcome = aggregator.try_aggregate(&query, &cancel).await;

    // Held across the send so a newer generation cannot start in between
    let current = current.lock().await;
    if *current != generation {
        debug!(query = %query, generation, current = *current, "Discarding stale results");
        return;
    }

    let update = match outcome {
        Ok(records) => SearchUpdate {
            generation,
            query,
            records,
            error: None,
        },
        Err(SearchError::Cancelled) => {
            debug!(query = %query, generation, "Query cancelled");
            return;
        }
        Err(e) => SearchUpdate {
            generation,
            query,
            records: Vec::new(),
            error: Some(e.to_string()),
        },
    };

    if updates.send(update).is_err() {
        debug!(generation, "Render channel closed");
    }
}
