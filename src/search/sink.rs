//! Collector that concurrent fetchers write listings into.
//!
//! Each fetcher gets its own [`ListingSender`]; all senders feed one
//! unbounded channel owned by the [`ItemSink`] of a single search run.

use crate::error::ListingError;
use crate::models::RawListing;
use std::collections::HashSet;
use tokio::sync::mpsc;
use tracing::debug;

struct Offer {
    slot: usize,
    listing: RawListing,
}

/// Write handle for one fetcher
#[derive(Clone)]
pub struct ListingSender {
    slot: usize,
    source: &'static str,
    tx: mpsc::UnboundedSender<Offer>,
}

impl ListingSender {
    /// Identifies the fetcher this sender was handed to
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Queue a listing for this run.
    ///
    /// Returns `false` when the listing was refused: blank name, non-finite
    /// price, or the run has already been drained or abandoned.
    pub fn offer(&self, listing: RawListing) -> bool {
        if let Err(err) = check(&listing) {
            debug!("{}: ignoring listing ({})", self.source, err);
            return false;
        }
        self.tx
            .send(Offer {
                slot: self.slot,
                listing,
            })
            .is_ok()
    }

    /// Whether the run stopped listening; fetchers should wind down
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

fn check(listing: &RawListing) -> Result<(), ListingError> {
    if !listing.has_name() {
        return Err(ListingError::MissingName);
    }
    if !listing.price.is_finite() {
        return Err(ListingError::NonFinitePrice);
    }
    Ok(())
}

/// Per-run listing collector. Many writers, drained exactly once.
pub struct ItemSink {
    tx: mpsc::UnboundedSender<Offer>,
    rx: mpsc::UnboundedReceiver<Offer>,
    next_slot: usize,
}

impl Default for ItemSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemSink {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx, next_slot: 0 }
    }

    /// Hand out a sender for one more fetcher
    pub fn sender(&mut self, source: &'static str) -> ListingSender {
        let slot = self.next_slot;
        self.next_slot += 1;
        ListingSender {
            slot,
            source,
            tx: self.tx.clone(),
        }
    }

    /// Everything offered so far, in arrival order
    pub fn drain(self) -> Vec<RawListing> {
        self.drain_excluding(&HashSet::new())
    }

    /// Everything offered so far except listings from the `failed` slots
    pub fn drain_excluding(self, failed: &HashSet<usize>) -> Vec<RawListing> {
        let ItemSink { tx, mut rx, .. } = self;
        drop(tx);
        // Refuse anything sent after this point; buffered offers stay readable
        rx.close();

        let mut listings = Vec::new();
        while let Ok(offer) = rx.try_recv() {
            if !failed.contains(&offer.slot) {
                listings.push(offer.listing);
            }
        }
        listings
    }
}
