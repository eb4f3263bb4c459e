use crate::error::SearchError;
use crate::models::RawListing;
use crate::scrapers::{SearchRequest, SourceFetcher};
use crate::search::sink::ItemSink;
use anyhow::anyhow;
use chrono::Local;
use futures::FutureExt;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Run every fetcher concurrently against one request.
///
/// Waits until all fetchers finish or `timeout` elapses. A fetcher that
/// errors or panics contributes no listings and does not disturb the
/// others. Hitting the deadline aborts the remaining fetchers and fails the
/// whole run with [`SearchError::FetchTimeout`]; whatever was collected is
/// discarded. An unknown city fails before any fetcher starts.
pub async fn run(
    request: &SearchRequest,
    fetchers: Vec<Box<dyn SourceFetcher>>,
    timeout: Duration,
) -> Result<Vec<RawListing>, SearchError> {
    let params = Arc::new(request.resolve(Local::now().date_naive())?);

    info!(
        "Searching {} ({} -> {}) across {} sources",
        params.city.name,
        params.check_in,
        params.check_out,
        fetchers.len()
    );

    let started = Instant::now();
    let mut sink = ItemSink::new();
    let mut tasks = JoinSet::new();

    for fetcher in fetchers {
        let sender = sink.sender(fetcher.source_name());
        let slot = sender.slot();
        let source = sender.source();
        let params = Arc::clone(&params);

        tasks.spawn(async move {
            let outcome = AssertUnwindSafe(fetcher.fetch(&params, sender))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| Err(anyhow!("fetcher panicked")));
            (slot, source, outcome)
        });
    }

    let mut failed = HashSet::new();
    let joined = tokio::time::timeout(timeout, async {
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, source, Ok(()))) => {
                    debug!("{} finished after {:?}", source, started.elapsed());
                }
                Ok((slot, source, Err(err))) => {
                    warn!("{} failed, skipping its listings: {:#}", source, err);
                    failed.insert(slot);
                }
                Err(err) => {
                    warn!("Fetcher task did not complete: {}", err);
                }
            }
        }
    })
    .await;

    if joined.is_err() {
        warn!(
            "Search deadline of {:?} exceeded with {} sources still running",
            timeout,
            tasks.len()
        );
        tasks.abort_all();
        return Err(SearchError::FetchTimeout { after: timeout });
    }

    let listings = sink.drain_excluding(&failed);
    info!(
        "Collected {} listings in {:?} ({} sources failed)",
        listings.len(),
        started.elapsed(),
        failed.len()
    );

    Ok(listings)
}
