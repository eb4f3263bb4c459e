use crate::compare::{compare, Grouper, SimilarityGrouper};
use crate::config::Config;
use crate::error::SearchError;
use crate::models::ComparisonEntry;
use crate::scrapers::{self, PageLoader, SearchRequest, SourceFetcher};
use crate::search;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Builds the fetchers for one search run
pub type FetcherFactory = Arc<dyn Fn() -> Vec<Box<dyn SourceFetcher>> + Send + Sync>;

/// Search endpoint core: fetch from every source, then group and rank
pub struct HotelSearchService {
    fetchers: FetcherFactory,
    timeout: Duration,
    grouper: Box<dyn Grouper>,
}

impl HotelSearchService {
    pub fn new(fetchers: FetcherFactory, timeout: Duration, grouper: Box<dyn Grouper>) -> Self {
        Self {
            fetchers,
            timeout,
            grouper,
        }
    }

    /// Service wired to the real sources as configured
    pub fn from_config(config: &Config) -> Result<Self> {
        let loader: Arc<dyn PageLoader> = scrapers::loader_from_config(config)?;
        let factory: FetcherFactory =
            Arc::new(move || scrapers::default_fetchers(Arc::clone(&loader)));

        Ok(Self::new(
            factory,
            config.search_timeout,
            Box::new(SimilarityGrouper::new(config.similarity_threshold)),
        ))
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<ComparisonEntry>, SearchError> {
        let listings = search::run(request, (self.fetchers)(), self.timeout).await?;
        let entries = compare(listings, self.grouper.as_ref());
        info!("Search for {} produced {} hotels", request.city, entries.len());
        Ok(entries)
    }
}
