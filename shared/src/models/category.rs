//! Menu Category Model

use serde::{Deserialize, Serialize};

/// Display order used when a category row carries none
pub const DEFAULT_CATEGORY_ORDER: i32 = 999;

/// Display order given to categories synthesized from an item's free-text category
pub const SYNTHETIC_CATEGORY_ORDER: i32 = 50;

/// Sentinel category id for items that resolve to nothing
pub const OTHERS_CATEGORY_ID: &str = "others";

/// Sentinel category name
pub const OTHERS_CATEGORY_NAME: &str = "Others";

/// Menu category entity (scoped to one restaurant)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    #[serde(default = "default_display_order")]
    pub display_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_display_order() -> i32 {
    DEFAULT_CATEGORY_ORDER
}

impl MenuCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>, display_order: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            display_order,
            description: None,
        }
    }

    /// The "Others" placeholder every unresolvable item falls into
    pub fn others() -> Self {
        Self::new(OTHERS_CATEGORY_ID, OTHERS_CATEGORY_NAME, DEFAULT_CATEGORY_ORDER)
    }

    /// Case-insensitive name comparison
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_display_order_defaults_to_sentinel() {
        let cat: MenuCategory = serde_json::from_str(r#"{"id":"c1","name":"Soups"}"#).unwrap();
        assert_eq!(cat.display_order, DEFAULT_CATEGORY_ORDER);
        assert!(cat.description.is_none());
    }

    #[test]
    fn test_name_matches_ignores_case_and_padding() {
        let cat = MenuCategory::new("c1", "Main Course", 2);
        assert!(cat.name_matches("main course"));
        assert!(cat.name_matches("  MAIN COURSE "));
        assert!(!cat.name_matches("Mains"));
    }
}
