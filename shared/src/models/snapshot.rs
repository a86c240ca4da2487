//! Menu snapshot - one complete {categories, items} pair from the feed

use super::{MenuCategory, MenuItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuSnapshot {
    pub restaurant_id: String,
    /// Monotonic counter assigned by the receiving side (0 = empty placeholder)
    #[serde(default)]
    pub revision: u64,
    pub categories: Vec<MenuCategory>,
    pub items: Vec<MenuItem>,
    pub received_at: DateTime<Utc>,
}

impl MenuSnapshot {
    pub fn new(
        restaurant_id: impl Into<String>,
        categories: Vec<MenuCategory>,
        items: Vec<MenuItem>,
    ) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            revision: 0,
            categories,
            items,
            received_at: Utc::now(),
        }
    }

    /// Placeholder published before the first fetch completes
    pub fn empty(restaurant_id: impl Into<String>) -> Self {
        Self::new(restaurant_id, Vec::new(), Vec::new())
    }

    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    /// Same catalog content, ignoring revision and receive time
    pub fn same_content(&self, other: &MenuSnapshot) -> bool {
        self.restaurant_id == other.restaurant_id
            && self.categories == other.categories
            && self.items == other.items
    }

    pub fn find_item(&self, item_id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.id == item_id)
    }
}
