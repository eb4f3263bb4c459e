use crate::compare::normalize::normalize;
use crate::models::{ComparisonGroup, RawListing};
use tracing::debug;

/// Minimum similarity (inclusive) for a listing to join a group
pub const DEFAULT_THRESHOLD: u8 = 75;

/// Clusters listings into comparison groups
pub trait Grouper: Send + Sync {
    fn group(&self, listings: Vec<RawListing>) -> Vec<ComparisonGroup>;
}

/// Which qualifying group a listing joins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// The earliest-created group at or above the threshold; scanning stops there
    #[default]
    FirstMatch,
    /// The highest-scoring group at or above the threshold; ties go to the earliest
    BestMatch,
}

/// Similarity of two normalized names on a 0..=100 scale, unrounded
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Greedy incremental clustering by name similarity.
///
/// Each listing is compared only against the key of the listing that opened
/// a group. Keys are never recomputed as members join, so the outcome
/// depends on arrival order.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityGrouper {
    pub threshold: u8,
    pub policy: MatchPolicy,
}

impl Default for SimilarityGrouper {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            policy: MatchPolicy::FirstMatch,
        }
    }
}

impl SimilarityGrouper {
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Index of the group `key` should join, if any
    fn find_group(&self, groups: &[ComparisonGroup], key: &str) -> Option<usize> {
        match self.policy {
            MatchPolicy::FirstMatch => groups
                .iter()
                .position(|g| similarity(&g.key, key) >= f64::from(self.threshold)),
            MatchPolicy::BestMatch => {
                let threshold = f64::from(self.threshold);
                let mut best: Option<(usize, f64)> = None;
                for (idx, g) in groups.iter().enumerate() {
                    let score = similarity(&g.key, key);
                    if score < threshold {
                        continue;
                    }
                    if best.map_or(true, |(_, top)| score > top) {
                        best = Some((idx, score));
                    }
                }
                best.map(|(idx, _)| idx)
            }
        }
    }
}

impl Grouper for SimilarityGrouper {
    fn group(&self, listings: Vec<RawListing>) -> Vec<ComparisonGroup> {
        let total = listings.len();
        let mut groups: Vec<ComparisonGroup> = Vec::new();
        let mut skipped = 0usize;

        for listing in listings {
            let key = normalize(&listing.hotel_name);
            if key.is_empty() {
                debug!("Dropping listing with no comparable name: {:?}", listing.hotel_name);
                skipped += 1;
                continue;
            }

            match self.find_group(&groups, &key) {
                Some(idx) => groups[idx].listings.push(listing),
                None => groups.push(ComparisonGroup {
                    key,
                    listings: vec![listing],
                }),
            }
        }

        debug!(
            "Grouped {} listings into {} groups ({} dropped)",
            total,
            groups.len(),
            skipped
        );

        groups
    }
}
