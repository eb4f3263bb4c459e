use crate::scrapers::page::PageLoader;
use anyhow::{Context, Result};
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Page loader backed by headless Chrome.
///
/// Every load launches its own browser, so concurrent fetchers never share a
/// session. The browser lives on a blocking thread and is torn down when
/// that thread finishes, whether the load succeeded or not. An abandoned
/// load keeps its thread until the page timeout expires.
pub struct BrowserLoader {
    headless: bool,
    page_timeout: Duration,
}

impl BrowserLoader {
    pub fn new(headless: bool, page_timeout: Duration) -> Self {
        Self {
            headless,
            page_timeout,
        }
    }
}

/// One browser plus the tab it renders into; closed on drop
struct BrowserSession {
    tab: Arc<Tab>,
    _browser: Browser,
}

impl BrowserSession {
    fn launch(headless: bool, page_timeout: Duration) -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(headless)
            .idle_browser_timeout(page_timeout * 2)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open tab")?;
        tab.set_default_timeout(page_timeout);

        Ok(Self {
            tab,
            _browser: browser,
        })
    }

    fn render(&self, url: &str, ready_selector: &str, wait: Duration) -> Result<String> {
        self.tab
            .navigate_to(url)
            .with_context(|| format!("Failed to open {}", url))?;
        self.tab.wait_until_navigated()?;

        if let Err(err) = self
            .tab
            .wait_for_element_with_custom_timeout(ready_selector, wait)
        {
            warn!("{} never showed {:?}: {}", url, ready_selector, err);
        }

        let html = self.tab.get_content().context("Failed to read page HTML")?;
        debug!("Rendered {} bytes of HTML from {}", html.len(), url);
        Ok(html)
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Err(err) = self.tab.close(true) {
            debug!("Tab already gone on close: {}", err);
        }
        debug!("Browser session released");
    }
}

#[async_trait]
impl PageLoader for BrowserLoader {
    async fn load(&self, url: &Url, ready_selector: &str) -> Result<String> {
        let url = url.to_string();
        let ready_selector = ready_selector.to_string();
        let headless = self.headless;
        let wait = self.page_timeout;

        tokio::task::spawn_blocking(move || {
            let session = BrowserSession::launch(headless, wait)?;
            session.render(&url, &ready_selector, wait)
        })
        .await
        .context("Browser thread panicked")?
    }
}
