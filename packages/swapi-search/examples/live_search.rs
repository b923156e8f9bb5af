//! Live search from the terminal.
//!
//! Stands in for a search box: every line typed on stdin is treated as the
//! current input text. Results print as plain-text cards once the input goes
//! quiet for the debounce window.
//!
//! ```bash
//! RUST_LOG=swapi_search=debug cargo run -p swapi-search --example live_search
//! ```

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swapi_search::{Aggregator, SearchConfig, SearchSession, SearchUpdate};

fn render(update: &SearchUpdate) {
    if let Some(error) = &update.error {
        println!("Search for {:?} failed: {error}", update.query);
        return;
    }
    if update.records.is_empty() {
        println!("(no results for {:?})", update.query);
        return;
    }

    println!("{} result(s) for {:?}:", update.records.len(), update.query);
    for record in &update.records {
        println!("{record}\n");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,swapi_search=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = SearchConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(api_root = %config.api_root, "Configuration loaded");

    let aggregator =
        Arc::new(Aggregator::from_config(config.clone()).context("Failed to build aggregator")?);
    let (session, mut updates) = SearchSession::spawn(aggregator, config.debounce);

    let renderer = tokio::spawn(async move {
        while let Some(update) = updates.recv().await {
            render(&update);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if !session.submit(line) {
            break;
        }
    }

    session.shutdown().await;
    renderer.await.context("Renderer task failed")?;
    Ok(())
}
