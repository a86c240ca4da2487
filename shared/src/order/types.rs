//! Shared types for customer orders

use serde::{Deserialize, Serialize};

/// Table marker stored on takeaway orders in place of a table number
pub const TAKEAWAY_TABLE_MARKER: &str = "Takeaway";

// ============================================================================
// Order Type
// ============================================================================

/// How the order reaches the customer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// 堂食 - served at a table, table number required
    #[default]
    DineIn,
    /// 打包 - collected at the counter
    Takeaway,
    /// Placed by scanning a table QR code; table optional
    Qr,
}

impl OrderType {
    pub fn requires_table(&self) -> bool {
        matches!(self, OrderType::DineIn)
    }
}

// ============================================================================
// Payment
// ============================================================================

/// Payment method chosen at checkout (settled outside the core)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Upi,
    Online,
}

// ============================================================================
// Order Status
// ============================================================================

/// Lifecycle status as reported by the order store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Served,
    Completed,
    Cancelled,
}

// ============================================================================
// Customer
// ============================================================================

/// Customer details collected at checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl CustomerInfo {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            special_instructions: None,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.special_instructions = Some(instructions.into());
        self
    }
}
