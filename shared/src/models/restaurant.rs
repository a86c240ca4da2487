//! Restaurant type and default category presets

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of venue; selects the default category list used to order menu sections
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RestaurantType {
    #[default]
    Restaurant,
    Cafe,
    Bakery,
    Bar,
    CloudKitchen,
    FoodTruck,
}

impl RestaurantType {
    pub const ALL: [RestaurantType; 6] = [
        RestaurantType::Restaurant,
        RestaurantType::Cafe,
        RestaurantType::Bakery,
        RestaurantType::Bar,
        RestaurantType::CloudKitchen,
        RestaurantType::FoodTruck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RestaurantType::Restaurant => "restaurant",
            RestaurantType::Cafe => "cafe",
            RestaurantType::Bakery => "bakery",
            RestaurantType::Bar => "bar",
            RestaurantType::CloudKitchen => "cloud_kitchen",
            RestaurantType::FoodTruck => "food_truck",
        }
    }

    /// Parse from the snake_case name; unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    fn builtin_categories(&self) -> &'static [&'static str] {
        match self {
            RestaurantType::Restaurant => &[
                "Starters",
                "Soups",
                "Salads",
                "Main Course",
                "Breads",
                "Rice & Biryani",
                "Desserts",
                "Beverages",
            ],
            RestaurantType::Cafe => &[
                "Coffee",
                "Tea",
                "Shakes",
                "Snacks",
                "Sandwiches",
                "Desserts",
                "Beverages",
            ],
            RestaurantType::Bakery => &[
                "Breads",
                "Cakes",
                "Pastries",
                "Cookies",
                "Snacks",
                "Beverages",
            ],
            RestaurantType::Bar => &[
                "Cocktails",
                "Mocktails",
                "Beer",
                "Wine",
                "Spirits",
                "Bar Snacks",
            ],
            RestaurantType::CloudKitchen => &[
                "Combos",
                "Starters",
                "Main Course",
                "Rice & Biryani",
                "Desserts",
                "Beverages",
            ],
            RestaurantType::FoodTruck => &["Specials", "Snacks", "Wraps", "Beverages"],
        }
    }
}

/// Default category name lists per restaurant type
///
/// Used as the secondary sort key for menu sections: a category whose name
/// appears in the list sorts by its index there, ahead of unlisted ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPresets {
    lists: HashMap<RestaurantType, Vec<String>>,
}

impl CategoryPresets {
    /// Built-in lists for every restaurant type
    pub fn builtin() -> Self {
        let lists = RestaurantType::ALL
            .into_iter()
            .map(|t| {
                (
                    t,
                    t.builtin_categories().iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();
        Self { lists }
    }

    /// Built-in lists overridden per type by a JSON object such as
    /// `{"cafe": ["Coffee", "Bakes"]}`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let overrides: HashMap<RestaurantType, Vec<String>> = serde_json::from_str(json)?;
        let mut presets = Self::builtin();
        presets.lists.extend(overrides);
        Ok(presets)
    }

    pub fn categories_for(&self, restaurant_type: RestaurantType) -> &[String] {
        self.lists
            .get(&restaurant_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Index of `name` in the type's list (case-insensitive)
    pub fn position(&self, restaurant_type: RestaurantType, name: &str) -> Option<usize> {
        let needle = name.trim().to_lowercase();
        self.categories_for(restaurant_type)
            .iter()
            .position(|c| c.to_lowercase() == needle)
    }
}

impl Default for CategoryPresets {
    fn default() -> Self {
        Self::builtin()
    }
}
