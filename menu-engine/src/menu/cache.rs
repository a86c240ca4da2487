//! Single-entry memo for the menu view
//!
//! Keyed on (snapshot revision, normalized search term, veg flag,
//! restaurant type). Revisions must be unique per snapshot content, which
//! [`crate::feed::SnapshotPublisher`] guarantees.

use shared::{CategoryPresets, MenuSnapshot, RestaurantType};
use std::sync::Arc;

use super::view::{MenuFilter, MenuView};

#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewKey {
    revision: u64,
    search: String,
    veg_only: bool,
    restaurant_type: RestaurantType,
}

#[derive(Debug)]
pub struct MenuViewCache {
    presets: Arc<CategoryPresets>,
    entry: Option<(ViewKey, Arc<MenuView>)>,
    hits: u64,
    misses: u64,
}

impl MenuViewCache {
    pub fn new(presets: Arc<CategoryPresets>) -> Self {
        Self {
            presets,
            entry: None,
            hits: 0,
            misses: 0,
        }
    }

    /// Cached view for this key, rebuilding only when the key changed
    ///
    /// A hit returns the same `Arc` as the previous call.
    pub fn get_or_build(
        &mut self,
        snapshot: &MenuSnapshot,
        filter: &MenuFilter,
        restaurant_type: RestaurantType,
    ) -> Arc<MenuView> {
        let key = ViewKey {
            revision: snapshot.revision,
            search: filter.normalized_search(),
            veg_only: filter.veg_only,
            restaurant_type,
        };

        if let Some((cached_key, view)) = &self.entry
            && *cached_key == key
        {
            self.hits += 1;
            return view.clone();
        }

        self.misses += 1;
        let view = Arc::new(MenuView::from_snapshot(
            snapshot,
            filter,
            restaurant_type,
            &self.presets,
        ));
        tracing::debug!(
            revision = snapshot.revision,
            sections = view.sections.len(),
            items = view.item_count(),
            "Rebuilt menu view"
        );
        self.entry = Some((key, view.clone()));
        view
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
