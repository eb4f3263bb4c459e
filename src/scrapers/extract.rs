//! Helpers shared by the HTML card parsers.

use crate::error::ListingError;
use crate::models::RawListing;
use crate::scrapers::types::SearchParams;
use crate::search::ListingSender;
use anyhow::{anyhow, Result};
use scraper::{ElementRef, Selector};
use tracing::{debug, info};
use url::Url;

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|err| anyhow!("invalid selector {css:?}: {err:?}"))
}

/// Trimmed text of the first match, if it has any
pub(crate) fn first_text(card: &ElementRef, sel: &Selector) -> Option<String> {
    card.select(sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

pub(crate) fn first_attr(card: &ElementRef, sel: &Selector, attr: &str) -> Option<String> {
    card.select(sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse a displayed price such as `BDT 12,345`, `৳ 4,500.50` or `Tk. 1,200`
pub fn parse_price(text: Option<&str>) -> Result<f64, ListingError> {
    let text = text.ok_or(ListingError::MissingPrice)?;
    // Dots in a currency label ahead of the amount are not decimal points
    let start = text
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| ListingError::InvalidPrice(text.to_string()))?;
    let digits: String = text[start..]
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if digits.is_empty() {
        return Err(ListingError::InvalidPrice(text.to_string()));
    }
    digits
        .parse()
        .map_err(|_| ListingError::InvalidPrice(text.to_string()))
}

/// Fields pulled out of one result card before validation
#[derive(Debug, Default)]
pub(crate) struct Card {
    pub name: Option<String>,
    pub price: Option<String>,
    pub stars: usize,
    pub image: Option<String>,
    pub link: Option<String>,
}

impl Card {
    pub fn into_listing(self, source: &str, page_url: &Url) -> Result<RawListing, ListingError> {
        let hotel_name = self.name.ok_or(ListingError::MissingName)?;
        let price = parse_price(self.price.as_deref())?;

        let booking_url = match self.link {
            Some(link) => page_url
                .join(&link)
                .map(String::from)
                .unwrap_or(link),
            None => page_url.to_string(),
        };

        Ok(RawListing {
            source: source.to_string(),
            hotel_name,
            price,
            rating: (self.stars > 0).then_some(self.stars as f64),
            image_url: self.image.unwrap_or_default(),
            booking_url,
        })
    }
}

/// Offer parsed cards to the sink, skipping invalid or filtered ones.
/// Stops early once the run has stopped listening. Returns how many were accepted.
pub(crate) fn deliver(
    source: &str,
    params: &SearchParams,
    cards: Vec<Result<RawListing, ListingError>>,
    sink: &ListingSender,
) -> usize {
    let found = cards.len();
    let mut accepted = 0;

    for card in cards {
        if sink.is_closed() {
            debug!("{}: run abandoned, stopping", source);
            break;
        }
        let listing = match card {
            Ok(listing) => listing,
            Err(err) => {
                debug!("{}: skipping card: {}", source, err);
                continue;
            }
        };
        if !params.admits(listing.price, listing.rating) {
            debug!("{}: {} filtered out", source, listing.hotel_name);
            continue;
        }
        if sink.offer(listing) {
            accepted += 1;
        }
    }

    info!("{}: {} of {} cards accepted", source, accepted, found);
    accepted
}
