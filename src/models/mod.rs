use serde::{Deserialize, Serialize};

/// A single hotel offer as scraped from one source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawListing {
    /// Originating source, e.g. "booking.com" or "agoda"
    pub source: String,
    pub hotel_name: String,
    pub price: f64,
    /// Star count or score; `None` when the source did not show one
    pub rating: Option<f64>,
    /// May be protocol-relative (`//cdn...`)
    pub image_url: String,
    pub booking_url: String,
}

impl RawListing {
    /// Whether the display name carries any non-whitespace text
    pub fn has_name(&self) -> bool {
        !self.hotel_name.trim().is_empty()
    }
}

/// Listings believed to be the same physical hotel.
///
/// `key` is the normalized name of the listing that opened the group and is
/// never updated afterwards. `listings` keep their arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonGroup {
    pub key: String,
    pub listings: Vec<RawListing>,
}

/// One source's offer inside a comparison entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceOffer {
    pub source: String,
    pub price: f64,
    pub rating: f64,
    pub image: String,
    pub booking_url: String,
    pub is_best_deal: bool,
}

/// A ranked hotel across all sources
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonEntry {
    pub hotel_name: String,
    pub best_price: f64,
    pub sources: Vec<SourceOffer>,
}
