//! Veg / non-veg classification
//!
//! A keyword heuristic over free text, not authoritative data: an
//! "eggless cake" is reported as non-veg. Pure and uncached so it always
//! reflects the current item.

use shared::MenuItem;

/// Substrings that mark an item as non-vegetarian
pub const NON_VEG_KEYWORDS: &[&str] = &[
    "chicken", "mutton", "fish", "egg", "meat", "beef", "pork", "prawn", "crab", "keema", "lamb",
    "bacon", "shrimp", "seafood", "lobster", "turkey", "duck",
];

/// Whether `item` looks vegetarian from its name and description
pub fn is_veg(item: &MenuItem) -> bool {
    let name = item.name.to_lowercase();
    let description = item.description_or_empty().to_lowercase();

    !NON_VEG_KEYWORDS
        .iter()
        .any(|kw| name.contains(kw) || description.contains(kw))
}
