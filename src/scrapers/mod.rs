pub mod agoda;
pub mod booking;
pub mod browser;
pub mod cities;
mod extract;
pub mod http;
pub mod page;
pub mod traits;
pub mod types;

pub use agoda::AgodaFetcher;
pub use booking::BookingFetcher;
pub use browser::BrowserLoader;
pub use extract::parse_price;
pub use http::HttpLoader;
pub use page::{PageLoader, StaticLoader};
pub use traits::SourceFetcher;
pub use types::{SearchParams, SearchRequest};

use crate::config::{Config, Renderer};
use anyhow::Result;
use std::sync::Arc;

/// Page loader selected by configuration
pub fn loader_from_config(config: &Config) -> Result<Arc<dyn PageLoader>> {
    Ok(match config.renderer {
        Renderer::Browser => Arc::new(BrowserLoader::new(config.headless, config.page_timeout)),
        Renderer::Http => Arc::new(HttpLoader::new(config.page_timeout)?),
    })
}

/// Fresh instances of every supported source
pub fn default_fetchers(loader: Arc<dyn PageLoader>) -> Vec<Box<dyn SourceFetcher>> {
    vec![
        Box::new(BookingFetcher::new(Arc::clone(&loader))),
        Box::new(AgodaFetcher::new(loader)),
    ]
}
