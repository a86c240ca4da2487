//! In-process backend
//!
//! Implements every external interface on top of in-memory state. Used by
//! tests and demos; failure switches let callers exercise error paths.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;
use shared::order::OrderStatus;
use shared::{MenuCategory, MenuItem, MenuSnapshot, OrderConfirmation, OrderPayload};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crate::order_money::money_eq;

use super::{AssetStore, FeedError, MenuFeed, OrderSink, SinkError, SnapshotPublisher, Subscription};

#[derive(Debug, Clone)]
struct StoredOrder {
    order_id: String,
    payload: OrderPayload,
}

#[derive(Debug, Default)]
pub struct InMemoryBackend {
    menus: DashMap<String, Arc<SnapshotPublisher>>,
    orders: RwLock<Vec<StoredOrder>>,
    assets: DashMap<String, Vec<u8>>,
    feed_down: AtomicBool,
    reject_orders: AtomicBool,
    submit_delay: RwLock<Option<Duration>>,
    next_order_id: AtomicU64,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a restaurant's menu; returns the new revision
    pub fn publish_menu(
        &self,
        restaurant_id: &str,
        categories: Vec<MenuCategory>,
        items: Vec<MenuItem>,
    ) -> u64 {
        let snapshot = MenuSnapshot::new(restaurant_id, categories, items);
        match self.menus.entry(restaurant_id.to_string()) {
            Entry::Occupied(entry) => entry.get().publish(snapshot),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(SnapshotPublisher::new(snapshot)));
                1
            }
        }
    }

    /// Drop a restaurant's menu channel; open subscriptions see the feed close
    pub fn close_menu(&self, restaurant_id: &str) {
        self.menus.remove(restaurant_id);
    }

    pub fn set_feed_available(&self, available: bool) {
        self.feed_down.store(!available, Ordering::SeqCst);
    }

    pub fn set_reject_orders(&self, reject: bool) {
        self.reject_orders.store(reject, Ordering::SeqCst);
    }

    /// Hold every submission for `delay` before answering
    pub fn set_submit_delay(&self, delay: Option<Duration>) {
        *self.submit_delay.write() = delay;
    }

    /// Orders accepted so far, oldest first
    pub fn orders(&self) -> Vec<OrderPayload> {
        self.orders.read().iter().map(|o| o.payload.clone()).collect()
    }

    pub fn asset(&self, bucket: &str, path: &str) -> Option<Vec<u8>> {
        self.assets
            .get(&format!("{bucket}/{path}"))
            .map(|bytes| bytes.value().clone())
    }

    fn publisher(&self, restaurant_id: &str) -> Arc<SnapshotPublisher> {
        self.menus
            .entry(restaurant_id.to_string())
            .or_insert_with(|| Arc::new(SnapshotPublisher::new(MenuSnapshot::empty(restaurant_id))))
            .value()
            .clone()
    }

    fn ensure_feed_up(&self) -> Result<(), FeedError> {
        if self.feed_down.load(Ordering::SeqCst) {
            return Err(FeedError::Unavailable("in-memory feed switched off".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl MenuFeed for InMemoryBackend {
    async fn fetch_initial_menu(&self, restaurant_id: &str) -> Result<MenuSnapshot, FeedError> {
        self.ensure_feed_up()?;
        Ok(self.publisher(restaurant_id).latest().as_ref().clone())
    }

    async fn subscribe_menu_changes(
        &self,
        restaurant_id: &str,
    ) -> Result<Subscription, FeedError> {
        self.ensure_feed_up()?;
        Ok(Subscription::from_receiver(
            self.publisher(restaurant_id).subscribe(),
        ))
    }
}

#[async_trait]
impl OrderSink for InMemoryBackend {
    async fn submit_order(&self, payload: &OrderPayload) -> Result<OrderConfirmation, SinkError> {
        let delay = *self.submit_delay.read();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.reject_orders.load(Ordering::SeqCst) {
            return Err(SinkError::Unavailable("in-memory order store switched off".into()));
        }

        if !money_eq(payload.subtotal + payload.tax, payload.total) {
            return Err(SinkError::Rejected(format!(
                "total {} does not equal subtotal {} + tax {}",
                payload.total, payload.subtotal, payload.tax
            )));
        }

        // Same idempotency key: same order. Lookup and insert share one guard.
        let mut orders = self.orders.write();
        if let Some(existing) = orders
            .iter()
            .find(|o| o.payload.idempotency_key == payload.idempotency_key)
        {
            return Ok(OrderConfirmation {
                order_id: existing.order_id.clone(),
                status: OrderStatus::Pending,
                created_at: None,
            });
        }

        let order_id = format!(
            "order-{}",
            self.next_order_id.fetch_add(1, Ordering::SeqCst) + 1
        );
        orders.push(StoredOrder {
            order_id: order_id.clone(),
            payload: payload.clone(),
        });
        drop(orders);

        Ok(OrderConfirmation {
            order_id,
            status: OrderStatus::Pending,
            created_at: Some(Utc::now()),
        })
    }
}

#[async_trait]
impl AssetStore for InMemoryBackend {
    async fn upload_asset(
        &self,
        bytes: Vec<u8>,
        bucket: &str,
        path: &str,
    ) -> Result<Option<String>, SinkError> {
        if bucket.is_empty() || path.is_empty() {
            return Err(SinkError::Rejected("bucket and path are required".into()));
        }
        let key = format!("{bucket}/{path}");
        self.assets.insert(key.clone(), bytes);
        Ok(Some(format!("memory://{key}")))
    }
}
