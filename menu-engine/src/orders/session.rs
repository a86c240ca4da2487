//! Customer session
//!
//! Everything one customer's ordering flow needs, carried explicitly: the
//! restaurant, how the order will be served, the table and the cart.
//! `to_json` / `from_json` are the persistence boundary (e.g. browser
//! storage between page loads).

use serde::{Deserialize, Serialize};
use shared::OrderType;

use crate::cart::Cart;

/// What an [`super::OrderAssembler`] needs to know about where an order comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub restaurant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
}

impl SessionContext {
    pub fn new(restaurant_id: impl Into<String>) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            table_number: None,
        }
    }

    pub fn with_table(mut self, table_number: impl Into<String>) -> Self {
        self.table_number = Some(table_number.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSession {
    pub restaurant_id: String,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(default)]
    pub cart: Cart,
}

impl CustomerSession {
    pub fn new(restaurant_id: impl Into<String>, order_type: OrderType) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            order_type,
            table_number: None,
            cart: Cart::new(),
        }
    }

    /// Session opened by scanning a table's QR code
    pub fn from_table_qr(restaurant_id: impl Into<String>, table_number: impl Into<String>) -> Self {
        let mut session = Self::new(restaurant_id, OrderType::Qr);
        session.table_number = Some(table_number.into());
        session
    }

    pub fn with_table(mut self, table_number: impl Into<String>) -> Self {
        self.table_number = Some(table_number.into());
        self
    }

    pub fn context(&self) -> SessionContext {
        SessionContext {
            restaurant_id: self.restaurant_id.clone(),
            table_number: self.table_number.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
