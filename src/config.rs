use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::compare::DEFAULT_THRESHOLD;

/// How source pages are retrieved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    /// Headless Chrome; required for sites that build results client-side
    Browser,
    /// Plain HTTP GET of the page
    Http,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub search_timeout: Duration,
    pub page_timeout: Duration,
    pub similarity_threshold: u8,
    pub renderer: Renderer,
    pub headless: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            search_timeout: Duration::from_secs(120),
            page_timeout: Duration::from_secs(30),
            similarity_threshold: DEFAULT_THRESHOLD,
            renderer: Renderer::Browser,
            headless: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = Self::default();

        Ok(Self {
            bind_addr: env::var("HOTEL_COMPARE_BIND").unwrap_or(defaults.bind_addr),
            search_timeout: match env::var("HOTEL_COMPARE_SEARCH_TIMEOUT_SECS") {
                Ok(v) => Duration::from_secs(
                    v.parse()
                        .context("HOTEL_COMPARE_SEARCH_TIMEOUT_SECS must be a whole number")?,
                ),
                Err(_) => defaults.search_timeout,
            },
            page_timeout: match env::var("HOTEL_COMPARE_PAGE_TIMEOUT_SECS") {
                Ok(v) => Duration::from_secs(
                    v.parse()
                        .context("HOTEL_COMPARE_PAGE_TIMEOUT_SECS must be a whole number")?,
                ),
                Err(_) => defaults.page_timeout,
            },
            similarity_threshold: match env::var("HOTEL_COMPARE_SIMILARITY_THRESHOLD") {
                Ok(v) => parse_threshold(&v)?,
                Err(_) => defaults.similarity_threshold,
            },
            renderer: match env::var("HOTEL_COMPARE_RENDERER") {
                Ok(v) => parse_renderer(&v)?,
                Err(_) => defaults.renderer,
            },
            headless: match env::var("HOTEL_COMPARE_HEADLESS") {
                Ok(v) => v
                    .parse()
                    .context("HOTEL_COMPARE_HEADLESS must be true or false")?,
                Err(_) => defaults.headless,
            },
        })
    }
}

fn parse_threshold(value: &str) -> Result<u8> {
    let threshold: u8 = value
        .trim()
        .parse()
        .context("HOTEL_COMPARE_SIMILARITY_THRESHOLD must be an integer")?;
    if threshold > 100 {
        bail!("HOTEL_COMPARE_SIMILARITY_THRESHOLD must be within 0..=100, got {threshold}");
    }
    Ok(threshold)
}

fn parse_renderer(value: &str) -> Result<Renderer> {
    match value.trim().to_ascii_lowercase().as_str() {
        "browser" | "chrome" => Ok(Renderer::Browser),
        "http" => Ok(Renderer::Http),
        other => bail!("unknown HOTEL_COMPARE_RENDERER: {other:?} (expected browser or http)"),
    }
}
