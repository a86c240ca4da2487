//! LiveMenu - background task keeping the rendered view current
//!
//! Watches the latest menu snapshot and the customer's filters, and
//! publishes a fresh [`MenuView`] whenever either changes. Intermediate
//! snapshots may be skipped; the latest one always wins.

use shared::{CategoryPresets, MenuSnapshot, RestaurantType};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::cache::MenuViewCache;
use super::view::{MenuFilter, MenuView};

pub struct LiveMenu {
    filter_tx: watch::Sender<MenuFilter>,
    view_rx: watch::Receiver<Arc<MenuView>>,
    shutdown: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl LiveMenu {
    /// Start the reactor on the current tokio runtime
    ///
    /// Stops when `shutdown` is cancelled, when [`LiveMenu::stop`] is
    /// called, or when the snapshot sender is dropped.
    pub fn spawn(
        mut snapshots: watch::Receiver<Arc<MenuSnapshot>>,
        restaurant_type: RestaurantType,
        presets: Arc<CategoryPresets>,
        shutdown: CancellationToken,
    ) -> Self {
        let (filter_tx, mut filter_rx) = watch::channel(MenuFilter::default());
        let mut cache = MenuViewCache::new(presets);

        let initial_snapshot = snapshots.borrow_and_update().clone();
        let initial = cache.get_or_build(&initial_snapshot, &MenuFilter::default(), restaurant_type);
        let (view_tx, view_rx) = watch::channel(initial);

        let shutdown = shutdown.child_token();
        let token = shutdown.clone();

        let handle = tokio::spawn(async move {
            tracing::info!(restaurant_type = restaurant_type.as_str(), "LiveMenu started");

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::info!("LiveMenu shutting down");
                        break;
                    }

                    changed = snapshots.changed() => {
                        if changed.is_err() {
                            tracing::info!("Menu feed closed, LiveMenu stopping");
                            break;
                        }
                    }

                    changed = filter_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }

                let snapshot = snapshots.borrow_and_update().clone();
                let filter = filter_rx.borrow_and_update().clone();
                let view = cache.get_or_build(&snapshot, &filter, restaurant_type);

                let unchanged = Arc::ptr_eq(&view, &view_tx.borrow());
                if !unchanged {
                    view_tx.send_replace(view);
                }
            }

            tracing::info!(
                cache_hits = cache.hits(),
                cache_misses = cache.misses(),
                "LiveMenu stopped"
            );
        });

        Self {
            filter_tx,
            view_rx,
            shutdown,
            handle: Some(handle),
        }
    }

    pub fn set_search(&self, search_term: impl Into<String>) {
        let search_term = search_term.into();
        self.filter_tx.send_if_modified(|f| {
            if f.search_term == search_term {
                return false;
            }
            f.search_term = search_term;
            true
        });
    }

    pub fn set_veg_only(&self, veg_only: bool) {
        self.filter_tx.send_if_modified(|f| {
            let modified = f.veg_only != veg_only;
            f.veg_only = veg_only;
            modified
        });
    }

    pub fn filter(&self) -> MenuFilter {
        self.filter_tx.borrow().clone()
    }

    /// Latest published view
    pub fn view(&self) -> Arc<MenuView> {
        self.view_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<MenuView>> {
        self.view_rx.clone()
    }

    /// Stop the reactor and wait for it to finish
    pub async fn stop(mut self) {
        self.shutdown.cancel();
        if let Some(handle) = self.handle.take()
            && let Err(e) = handle.await
        {
            tracing::error!(error = %e, "LiveMenu task failed");
        }
    }
}

impl Drop for LiveMenu {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
