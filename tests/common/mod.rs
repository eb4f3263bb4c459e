#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;
use hotel_compare::models::RawListing;
use hotel_compare::scrapers::{SearchParams, SourceFetcher};
use hotel_compare::search::ListingSender;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub fn listing(source: &str, name: &str, price: f64) -> RawListing {
    RawListing {
        source: source.to_string(),
        hotel_name: name.to_string(),
        price,
        rating: Some(4.0),
        image_url: format!("//img.{source}/{price}.jpg"),
        booking_url: format!("https://{source}/hotel/{price}"),
    }
}

/// How a fake source behaves once started
#[derive(Clone)]
pub enum Behavior {
    /// Offer these listings after `delay`, then succeed
    Emit(Duration, Vec<RawListing>),
    /// Offer these listings, then fail
    EmitThenFail(Vec<RawListing>),
    /// Fail immediately
    Fail,
    /// Panic immediately
    Panic,
}

pub struct FakeFetcher {
    pub name: &'static str,
    pub behavior: Behavior,
    /// Set when the fetch future is dropped, finished or not
    pub released: Arc<AtomicBool>,
}

impl FakeFetcher {
    pub fn new(name: &'static str, behavior: Behavior) -> Self {
        Self {
            name,
            behavior,
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn boxed(self) -> Box<dyn SourceFetcher> {
        Box::new(self)
    }
}

/// Stand-in for a browser session: flips its flag when dropped
struct SessionGuard(Arc<AtomicBool>);

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl SourceFetcher for FakeFetcher {
    async fn fetch(&self, _params: &SearchParams, sink: ListingSender) -> Result<()> {
        let _session = SessionGuard(Arc::clone(&self.released));

        match &self.behavior {
            Behavior::Emit(delay, listings) => {
                tokio::time::sleep(*delay).await;
                for listing in listings {
                    sink.offer(listing.clone());
                }
                Ok(())
            }
            Behavior::EmitThenFail(listings) => {
                for listing in listings {
                    sink.offer(listing.clone());
                }
                bail!("{} markup changed", self.name)
            }
            Behavior::Fail => bail!("{} is unreachable", self.name),
            Behavior::Panic => panic!("{} parser bug", self.name),
        }
    }

    fn source_name(&self) -> &'static str {
        self.name
    }
}
