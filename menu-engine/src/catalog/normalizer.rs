//! Catalog normalizer - category resolution, grouping and ordering
//!
//! Every item resolves to exactly one category through this fallback chain:
//!
//! ```text
//! category_id matches a category      -> that category
//! category text matches a name (ci)   -> that category
//! category text matches nothing       -> synthetic {slug(text), text, 50}
//!                                        (hashed id when the slug is empty)
//! neither                             -> {"others", "Others", 999}
//! ```
//!
//! Sections are ordered by `display_order`, then by position in the
//! restaurant type's default category list, then by name.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared::models::SYNTHETIC_CATEGORY_ORDER;
use shared::{CategoryPresets, MenuCategory, MenuItem, RestaurantType};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One category with its items, as rendered on the menu
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuSection {
    pub category: MenuCategory,
    pub items: Vec<MenuItem>,
}

/// Resolve the single category `item` belongs to
pub fn resolve_category(item: &MenuItem, categories: &[MenuCategory]) -> MenuCategory {
    if let Some(id) = item.category_id.as_deref()
        && let Some(category) = categories.iter().find(|c| c.id == id)
    {
        return category.clone();
    }

    if let Some(text) = item
        .category
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        if let Some(category) = categories.iter().find(|c| c.name_matches(text)) {
            return category.clone();
        }
        return MenuCategory::new(synthetic_category_id(text), text, SYNTHETIC_CATEGORY_ORDER);
    }

    MenuCategory::others()
}

/// Section id for free-text category `text`
///
/// Text with no sluggable characters ("!!!", emoji) gets a hash of its
/// lowercased form, so distinct texts never share an empty id.
pub fn synthetic_category_id(text: &str) -> String {
    let slug = slug::slugify(text);
    if !slug.is_empty() {
        return slug;
    }
    let digest = Sha256::digest(text.trim().to_lowercase().as_bytes());
    format!("category-{}", hex::encode(&digest[..8]))
}

/// Section ordering: display_order, preset position, name
pub fn compare_categories(
    a: &MenuCategory,
    b: &MenuCategory,
    restaurant_type: RestaurantType,
    presets: &CategoryPresets,
) -> Ordering {
    a.display_order
        .cmp(&b.display_order)
        .then_with(|| {
            let pa = presets.position(restaurant_type, &a.name);
            let pb = presets.position(restaurant_type, &b.name);
            match (pa, pb) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        })
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Resolve, group and sort `items`
pub fn group_items(
    items: &[MenuItem],
    categories: &[MenuCategory],
    restaurant_type: RestaurantType,
    presets: &CategoryPresets,
) -> Vec<MenuSection> {
    group_resolved(
        items.iter().map(|item| (item, resolve_category(item, categories))),
        restaurant_type,
        presets,
    )
}

/// Group already-resolved (item, category) pairs
///
/// The first category object seen for an id represents the section.
/// Items keep their relative order for equal `display_order`.
pub(crate) fn group_resolved<'a>(
    pairs: impl IntoIterator<Item = (&'a MenuItem, MenuCategory)>,
    restaurant_type: RestaurantType,
    presets: &CategoryPresets,
) -> Vec<MenuSection> {
    let mut sections: Vec<MenuSection> = Vec::new();
    let mut by_id: HashMap<String, usize> = HashMap::new();

    for (item, category) in pairs {
        let index = match by_id.get(&category.id) {
            Some(&index) => index,
            None => {
                by_id.insert(category.id.clone(), sections.len());
                sections.push(MenuSection {
                    category,
                    items: Vec::new(),
                });
                sections.len() - 1
            }
        };
        sections[index].items.push(item.clone());
    }

    for section in &mut sections {
        // stable
        section.items.sort_by_key(|i| i.display_order);
    }
    sections.sort_by(|a, b| compare_categories(&a.category, &b.category, restaurant_type, presets));
    sections
}
