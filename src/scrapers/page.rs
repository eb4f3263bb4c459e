use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use url::Url;

/// Retrieves the HTML of a results page
#[async_trait]
pub trait PageLoader: Send + Sync {
    /// Load `url` and return its HTML once `ready_selector` is present
    /// (or the loader gave up waiting for it).
    async fn load(&self, url: &Url, ready_selector: &str) -> Result<String>;
}

/// Serves canned pages by host; used for offline runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    pages: HashMap<String, String>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, host: &str, html: impl Into<String>) -> Self {
        self.pages.insert(host.to_string(), html.into());
        self
    }
}

#[async_trait]
impl PageLoader for StaticLoader {
    async fn load(&self, url: &Url, _ready_selector: &str) -> Result<String> {
        let host = url.host_str().unwrap_or_default();
        self.pages
            .get(host)
            .cloned()
            .ok_or_else(|| anyhow!("no page registered for {host}"))
    }
}
