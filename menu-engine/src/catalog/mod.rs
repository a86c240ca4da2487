//! Catalog normalization and classification

pub mod classifier;
pub mod normalizer;

pub use classifier::{NON_VEG_KEYWORDS, is_veg};
pub use normalizer::{
    MenuSection, compare_categories, group_items, resolve_category, synthetic_category_id,
};
