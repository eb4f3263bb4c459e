use crate::compare::normalize::absolute_image_url;
use crate::models::{ComparisonEntry, ComparisonGroup, SourceOffer};

/// Turn groups into price-ranked comparison entries.
///
/// Entries are ordered by ascending best price; groups with equal best
/// prices keep their grouping order.
pub fn build(groups: Vec<ComparisonGroup>) -> Vec<ComparisonEntry> {
    let mut entries: Vec<ComparisonEntry> = groups.into_iter().filter_map(build_entry).collect();

    // Vec::sort_by is stable
    entries.sort_by(|a, b| a.best_price.total_cmp(&b.best_price));
    entries
}

fn build_entry(group: ComparisonGroup) -> Option<ComparisonEntry> {
    let best_price = group
        .listings
        .iter()
        .map(|l| l.price)
        .reduce(f64::min)?;

    // Longest raw name wins, first occurrence on ties; shown trimmed
    let mut hotel_name = "";
    let mut longest = 0usize;
    for listing in &group.listings {
        let len = listing.hotel_name.chars().count();
        if len > longest {
            longest = len;
            hotel_name = listing.hotel_name.as_str();
        }
    }
    let hotel_name = hotel_name.trim().to_string();

    let sources = group
        .listings
        .into_iter()
        .map(|listing| SourceOffer {
            is_best_deal: listing.price == best_price,
            source: listing.source,
            price: listing.price,
            rating: listing.rating.unwrap_or(0.0),
            image: absolute_image_url(&listing.image_url),
            booking_url: listing.booking_url,
        })
        .collect();

    Some(ComparisonEntry {
        hotel_name,
        best_price,
        sources,
    })
}
