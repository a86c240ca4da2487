//! Customer order types
//!
//! - [`OrderPayload`]: priced order handed to the order store
//! - [`OrderConfirmation`]: what the store returns
//! - Order type, payment method, customer details

pub mod payload;
pub mod types;

// Re-exports
pub use payload::{OrderConfirmation, OrderLineItem, OrderPayload};
pub use types::*;
