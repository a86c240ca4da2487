//! Shared types for the QR menu ordering engine
//!
//! Wire and domain types used by both the engine and the backend client:
//! menu models, the feed-record parser, order payloads and error codes.

pub mod error;
pub mod models;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use models::{CategoryPresets, MenuCategory, MenuItem, MenuSnapshot, PricedOption, RestaurantType};
pub use order::{CustomerInfo, OrderConfirmation, OrderPayload, OrderType, PaymentMethod};
