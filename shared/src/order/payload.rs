//! Order submission payload and confirmation

use super::types::{OrderStatus, OrderType, PaymentMethod};
use crate::models::PricedOption;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One flattened cart line inside an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineItem {
    pub item_id: String,
    pub name: String,
    pub quantity: i32,
    /// Item base price at the time it was added (absent for size-only items)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<PricedOption>,
    #[serde(default)]
    pub selected_addons: Vec<PricedOption>,
    /// Per-unit total (size or base price + add-ons)
    pub item_total: f64,
}

/// Priced order ready for the external order store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderPayload {
    /// Client-generated key the order store deduplicates on
    pub idempotency_key: Uuid,
    pub restaurant_id: String,
    pub order_type: OrderType,
    /// Table number, or the takeaway marker for takeaway orders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    pub payment_method: PaymentMethod,
    pub items: Vec<OrderLineItem>,
    pub subtotal: f64,
    /// Tax rate in percent applied to the subtotal (e.g. 5 = 5%)
    pub tax_rate: f64,
    pub tax: f64,
    pub total: f64,
}

impl OrderPayload {
    /// Total number of units across all lines
    pub fn item_count(&self) -> i32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// What the order store returns for an accepted order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderConfirmation {
    pub order_id: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
