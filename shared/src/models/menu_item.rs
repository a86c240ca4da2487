//! Menu Item Model

use serde::{Deserialize, Serialize};

/// A named price: one size or one add-on of an item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricedOption {
    pub name: String,
    pub price: f64,
}

impl PricedOption {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Menu item entity
///
/// Read-only on the customer side. `base_price` is optional at the wire
/// boundary: an item offered only in sizes may carry none, and an item with
/// neither cannot be added to a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub display_order: i32,
    /// Category reference (preferred)
    #[serde(default)]
    pub category_id: Option<String>,
    /// Legacy free-text category, used when `category_id` does not resolve
    #[serde(default)]
    pub category: Option<String>,
    /// Ordered sizes; when non-empty exactly one must be chosen
    #[serde(default)]
    pub sizes: Vec<PricedOption>,
    /// Ordered optional add-ons
    #[serde(default)]
    pub addons: Vec<PricedOption>,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Minimal available item with a base price
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            base_price: Some(base_price),
            image_url: None,
            is_available: true,
            display_order: 0,
            category_id: None,
            category: None,
            sizes: Vec::new(),
            addons: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category_id(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_category_text(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    pub fn with_sizes(mut self, sizes: Vec<PricedOption>) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn with_addons(mut self, addons: Vec<PricedOption>) -> Self {
        self.addons = addons;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }

    pub fn has_sizes(&self) -> bool {
        !self.sizes.is_empty()
    }

    /// Look up an offered size by exact name
    pub fn find_size(&self, name: &str) -> Option<&PricedOption> {
        self.sizes.iter().find(|s| s.name == name)
    }

    /// Look up an offered add-on by exact name
    pub fn find_addon(&self, name: &str) -> Option<&PricedOption> {
        self.addons.iter().find(|a| a.name == name)
    }

    /// Description or empty string
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}
