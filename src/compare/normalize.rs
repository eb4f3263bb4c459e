/// Tokens that say what kind of lodging a place is, or where it is, rather
/// than which place it is. Sources disagree on whether to include them.
const STOP_WORDS: &[&str] = &[
    "hotel",
    "hotels",
    "resort",
    "resorts",
    "inn",
    "motel",
    "hostel",
    "lodge",
    "suite",
    "suites",
    "apartment",
    "apartments",
    "guesthouse",
    "residence",
    "residency",
    "dhaka",
];

/// Map a display name to the key used for similarity comparison.
///
/// Lowercases, keeps only letters and whitespace, drops stop words and
/// collapses whitespace. An empty result means the name carries nothing
/// comparable and the listing should be discarded.
pub fn normalize(raw_name: &str) -> String {
    let lowered = raw_name.to_lowercase();
    let letters: String = lowered
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();

    letters
        .split_whitespace()
        .filter(|token| !STOP_WORDS.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Make a protocol-relative image reference absolute
pub fn absolute_image_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}
