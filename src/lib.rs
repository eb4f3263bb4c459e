//! Hotel price comparison across travel sites.
//!
//! A search fans out to every source concurrently under one deadline,
//! collects their listings, groups listings that name the same hotel, and
//! ranks the groups by their cheapest offer.

pub mod api;
pub mod compare;
pub mod config;
pub mod error;
pub mod models;
pub mod scrapers;
pub mod search;
pub mod service;

pub use error::{ListingError, SearchError};
pub use service::HotelSearchService;
