//! Errors surfaced by a search run.
//!
//! Only [`SearchError`] reaches the caller. Per-source failures and
//! unparseable listings are recovered where they happen and never cross the
//! orchestrator boundary.

use std::time::Duration;
use thiserror::Error;

/// Failures of a whole search request
#[derive(Debug, Error)]
pub enum SearchError {
    /// The global fetch deadline elapsed before every source finished
    #[error("search did not complete within {}s", .after.as_secs_f64())]
    FetchTimeout { after: Duration },

    /// The requested city has no mapping to the sources' location codes
    #[error("no city mapping for: {city}")]
    NoCityMapping { city: String },

    /// Anything else that went wrong while serving the request
    #[error("search failed: {0}")]
    Internal(#[from] anyhow::Error),
}

impl SearchError {
    /// HTTP status class this failure should be reported with
    pub fn status_code(&self) -> u16 {
        match self {
            SearchError::FetchTimeout { .. } => 504,
            SearchError::NoCityMapping { .. } => 400,
            SearchError::Internal(_) => 500,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, SearchError::FetchTimeout { .. })
    }
}

/// Why a scraped card could not become a listing
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ListingError {
    #[error("listing has no hotel name")]
    MissingName,

    #[error("listing has no price")]
    MissingPrice,

    #[error("unparseable price: {0:?}")]
    InvalidPrice(String),

    #[error("price is not a finite number")]
    NonFinitePrice,
}
