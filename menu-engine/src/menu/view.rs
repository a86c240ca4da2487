//! Menu view builder
//!
//! Derives the renderable, filtered, grouped menu from a snapshot:
//!
//! ```text
//! items ─► available ─► veg filter ─► search ─► group + sort ─► sections
//! ```
//!
//! Search is a case-insensitive substring match over the item name, its
//! description and its resolved category name.

use serde::{Deserialize, Serialize};
use shared::{CategoryPresets, MenuCategory, MenuItem, MenuSnapshot, RestaurantType};

use crate::catalog::normalizer::group_resolved;
use crate::catalog::{MenuSection, is_veg, resolve_category};

/// Customer-controlled view filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuFilter {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub veg_only: bool,
}

impl MenuFilter {
    pub fn new(search_term: impl Into<String>, veg_only: bool) -> Self {
        Self {
            search_term: search_term.into(),
            veg_only,
        }
    }

    /// Trimmed, lower-cased search term
    pub fn normalized_search(&self) -> String {
        self.search_term.trim().to_lowercase()
    }
}

/// A rendered menu: sections built from one snapshot revision
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuView {
    pub revision: u64,
    pub sections: Vec<MenuSection>,
}

impl MenuView {
    /// Build the view of `snapshot` under `filter`
    pub fn from_snapshot(
        snapshot: &MenuSnapshot,
        filter: &MenuFilter,
        restaurant_type: RestaurantType,
        presets: &CategoryPresets,
    ) -> Self {
        Self {
            revision: snapshot.revision,
            sections: build_view(
                &snapshot.items,
                &snapshot.categories,
                &filter.search_term,
                filter.veg_only,
                restaurant_type,
                presets,
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// Items in display order
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.sections.iter().flat_map(|s| s.items.iter())
    }

    pub fn section(&self, category_id: &str) -> Option<&MenuSection> {
        self.sections.iter().find(|s| s.category.id == category_id)
    }
}

/// Filter, group and sort `items`
///
/// Unavailable items never appear; with `veg_only` only items classified
/// veg remain; a non-blank `search_term` keeps matching items only.
/// Sections with no remaining items are not produced.
pub fn build_view(
    items: &[MenuItem],
    categories: &[MenuCategory],
    search_term: &str,
    veg_only: bool,
    restaurant_type: RestaurantType,
    presets: &CategoryPresets,
) -> Vec<MenuSection> {
    let needle = search_term.trim().to_lowercase();

    let visible = items
        .iter()
        .filter(|item| item.is_available)
        .filter(|item| !veg_only || is_veg(item))
        .map(|item| (item, resolve_category(item, categories)))
        .filter(|(item, category)| needle.is_empty() || matches_search(item, category, &needle));

    group_resolved(visible, restaurant_type, presets)
}

fn matches_search(item: &MenuItem, category: &MenuCategory, needle: &str) -> bool {
    item.name.to_lowercase().contains(needle)
        || item.description_or_empty().to_lowercase().contains(needle)
        || category.name.to_lowercase().contains(needle)
}
