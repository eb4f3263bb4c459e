use crate::scrapers::types::SearchParams;
use crate::search::ListingSender;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for all hotel listing sources
/// Each search run gets fresh instances, so implementations never share
/// sessions across concurrent runs
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetch listings for `params`, offering each one to `sink` as it is found.
    ///
    /// Any resource the fetcher acquires (browser session, connection) must be
    /// released on every exit path, including cancellation of the future.
    async fn fetch(&self, params: &SearchParams, sink: ListingSender) -> Result<()>;

    /// Get the name of the source, e.g. "booking.com"
    fn source_name(&self) -> &'static str;
}
