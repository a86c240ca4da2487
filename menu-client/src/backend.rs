//! Backend adapter implementing the engine's external interfaces
//!
//! ```text
//! MenuFeed    ─► GET  /rest/v1/menu_categories + /rest/v1/menu_items
//! OrderSink   ─► POST /rest/v1/orders            (Prefer: return=representation)
//! AssetStore  ─► POST /storage/v1/object/{bucket}/{path}
//! ```
//!
//! Menu changes are detected by polling: each tick refetches both tables
//! and publishes only when the content differs from the last snapshot.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use menu_engine::feed::{
    AssetStore, FeedError, MenuFeed, OrderSink, SinkError, SnapshotPublisher, Subscription,
};
use serde::Deserialize;
use serde_json::Value;
use shared::models::{parse_categories, parse_items};
use shared::order::OrderStatus;
use shared::{MenuSnapshot, OrderConfirmation, OrderPayload};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{ClientConfig, ClientError, ClientResult, HttpClient};

const CATEGORIES_PATH: &str = "rest/v1/menu_categories";
const ITEMS_PATH: &str = "rest/v1/menu_items";
const ORDERS_PATH: &str = "rest/v1/orders";
const STORAGE_PATH: &str = "storage/v1/object";

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: HttpClient,
    poll_interval: Duration,
}

impl BackendClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
            poll_interval: Duration::from_millis(config.poll_interval_ms.max(1)),
        })
    }

    /// Fetch both menu tables concurrently and build a snapshot
    pub async fn fetch_snapshot(&self, restaurant_id: &str) -> ClientResult<MenuSnapshot> {
        let query = menu_query(restaurant_id);
        let (category_rows, item_rows) = futures::try_join!(
            self.http.get::<Vec<Value>>(CATEGORIES_PATH, &query),
            self.http.get::<Vec<Value>>(ITEMS_PATH, &query),
        )?;
        Ok(snapshot_from_rows(restaurant_id, category_rows, item_rows))
    }

    /// Public URL of a stored object
    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        self.http
            .url(&format!("{STORAGE_PATH}/public/{bucket}/{}", path.trim_start_matches('/')))
    }
}

fn menu_query(restaurant_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("select", "*".to_string()),
        ("restaurant_id", format!("eq.{restaurant_id}")),
        ("order", "display_order.asc".to_string()),
    ]
}

/// Validate raw rows into a snapshot; bad rows are dropped and counted
pub(crate) fn snapshot_from_rows(
    restaurant_id: &str,
    category_rows: Vec<Value>,
    item_rows: Vec<Value>,
) -> MenuSnapshot {
    let categories = parse_categories(category_rows);
    let items = parse_items(item_rows);

    if categories.rejected > 0 || items.rejected > 0 {
        tracing::warn!(
            restaurant_id = %restaurant_id,
            rejected_categories = categories.rejected,
            rejected_items = items.rejected,
            "Dropped invalid menu records"
        );
    }

    MenuSnapshot::new(restaurant_id, categories.records, items.records)
}

#[derive(Debug, Deserialize)]
struct OrderRow {
    id: Value,
    #[serde(default)]
    status: Option<OrderStatus>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

/// First row of a `return=representation` insert
pub(crate) fn parse_confirmation(rows: Vec<Value>) -> ClientResult<OrderConfirmation> {
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| ClientError::InvalidResponse("order insert returned no rows".into()))?;
    let row: OrderRow = serde_json::from_value(row)?;

    let order_id = match row.id {
        Value::String(s) if !s.is_empty() => s,
        Value::Number(n) => n.to_string(),
        other => {
            return Err(ClientError::InvalidResponse(format!(
                "order id has unexpected shape: {other}"
            )));
        }
    };

    Ok(OrderConfirmation {
        order_id,
        status: row.status.unwrap_or_default(),
        created_at: row.created_at,
    })
}

async fn poll_menu(
    client: BackendClient,
    restaurant_id: String,
    publisher: SnapshotPublisher,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(client.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await; // skip immediate tick

    tracing::info!(
        restaurant_id = %restaurant_id,
        interval_ms = client.poll_interval.as_millis() as u64,
        "Menu polling started"
    );

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,

            _ = ticker.tick() => {
                let fetched = tokio::select! {
                    _ = cancel.cancelled() => break,
                    result = client.fetch_snapshot(&restaurant_id) => result,
                };

                match fetched {
                    Ok(snapshot) => {
                        if let Some(revision) = publisher.publish_if_changed(snapshot) {
                            tracing::info!(restaurant_id = %restaurant_id, revision, "Menu changed");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(restaurant_id = %restaurant_id, error = %e, "Menu poll failed, keeping last snapshot");
                    }
                }

                if publisher.receiver_count() == 0 {
                    tracing::info!(restaurant_id = %restaurant_id, "No menu subscribers left");
                    break;
                }
            }
        }
    }

    tracing::info!(restaurant_id = %restaurant_id, "Menu polling stopped");
}

#[async_trait]
impl MenuFeed for BackendClient {
    async fn fetch_initial_menu(&self, restaurant_id: &str) -> Result<MenuSnapshot, FeedError> {
        Ok(self.fetch_snapshot(restaurant_id).await?)
    }

    async fn subscribe_menu_changes(
        &self,
        restaurant_id: &str,
    ) -> Result<Subscription, FeedError> {
        let initial = self.fetch_snapshot(restaurant_id).await?;
        let publisher = SnapshotPublisher::new(initial);
        let receiver = publisher.subscribe();
        let cancel = CancellationToken::new();

        let task = tokio::spawn(poll_menu(
            self.clone(),
            restaurant_id.to_string(),
            publisher,
            cancel.clone(),
        ));
        Ok(Subscription::new(receiver, cancel, task))
    }
}

#[async_trait]
impl OrderSink for BackendClient {
    async fn submit_order(&self, payload: &OrderPayload) -> Result<OrderConfirmation, SinkError> {
        let rows: Vec<Value> = self
            .http
            .post(ORDERS_PATH, payload, Some("return=representation"))
            .await?;
        Ok(parse_confirmation(rows)?)
    }
}

#[async_trait]
impl AssetStore for BackendClient {
    async fn upload_asset(
        &self,
        bytes: Vec<u8>,
        bucket: &str,
        path: &str,
    ) -> Result<Option<String>, SinkError> {
        let path = path.trim_start_matches('/');
        if bucket.is_empty() || path.is_empty() {
            return Err(SinkError::Rejected("bucket and path are required".into()));
        }

        let content_type = mime_guess::from_path(path).first_or_octet_stream();
        let size = bytes.len();
        self.http
            .post_bytes(
                &format!("{STORAGE_PATH}/{bucket}/{path}"),
                bytes,
                content_type.as_ref(),
                true,
            )
            .await?;

        tracing::info!(bucket, path, size, "Uploaded asset");
        Ok(Some(self.public_object_url(bucket, path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_from_loose_rows() {
        let snapshot = snapshot_from_rows(
            "r1",
            vec![
                json!({"id": 1, "name": "Starters", "display_order": "1"}),
                json!({"id": 2}),
            ],
            vec![
                json!({"id": "i1", "name": "Spring Roll", "price": "80", "category_id": 1}),
                json!({"id": "i2", "name": "Broken", "price": "eighty"}),
            ],
        );

        assert_eq!(snapshot.restaurant_id, "r1");
        assert_eq!(snapshot.categories.len(), 1);
        assert_eq!(snapshot.categories[0].id, "1");
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].base_price, Some(80.0));
        assert_eq!(snapshot.items[0].category_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_menu_query_filters_restaurant() {
        let query = menu_query("abc");
        assert!(query.contains(&("restaurant_id", "eq.abc".to_string())));
        assert!(query.contains(&("order", "display_order.asc".to_string())));
    }

    #[test]
    fn test_parse_confirmation() {
        let confirmation = parse_confirmation(vec![json!({
            "id": "8c1f",
            "status": "confirmed",
            "created_at": "2026-03-01T12:00:00Z"
        })])
        .unwrap();
        assert_eq!(confirmation.order_id, "8c1f");
        assert_eq!(confirmation.status, OrderStatus::Confirmed);
        assert!(confirmation.created_at.is_some());

        let numeric = parse_confirmation(vec![json!({"id": 42})]).unwrap();
        assert_eq!(numeric.order_id, "42");
        assert_eq!(numeric.status, OrderStatus::Pending);
    }

    #[test]
    fn test_parse_confirmation_rejects_empty() {
        assert!(matches!(
            parse_confirmation(vec![]),
            Err(ClientError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_confirmation(vec![json!({"id": null})]),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_public_object_url() {
        let client = BackendClient::new(&ClientConfig::new("https://db.example.com", "")).unwrap();
        assert_eq!(
            client.public_object_url("menu-images", "/r1/dosa.png"),
            "https://db.example.com/storage/v1/object/public/menu-images/r1/dosa.png"
        );
    }
}
