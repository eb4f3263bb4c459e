//! Turning a bag of scraped listings into ranked, cross-source comparisons.

pub mod builder;
pub mod grouper;
pub mod normalize;

pub use builder::build;
pub use grouper::{similarity, Grouper, MatchPolicy, SimilarityGrouper, DEFAULT_THRESHOLD};
pub use normalize::{absolute_image_url, normalize};

use crate::models::{ComparisonEntry, RawListing};

/// Group listings with `grouper` and rank the resulting entries
pub fn compare(listings: Vec<RawListing>, grouper: &dyn Grouper) -> Vec<ComparisonEntry> {
    build(grouper.group(listings))
}
