use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Invalid cart operations
///
/// These are programming errors at the UI boundary: the frontend should
/// never offer a selection that produces one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("item {item_id} has no base price and no size was chosen")]
    InvalidItem { item_id: String },

    #[error("invalid selection for item {item_id}: {reason}")]
    InvalidSelection { item_id: String, reason: String },

    #[error("cart line {index} not found (cart has {len} lines)")]
    LineNotFound { index: usize, len: usize },

    #[error("quantity delta must be non-zero")]
    InvalidDelta,

    #[error("quantity {quantity} exceeds maximum allowed ({max})")]
    QuantityLimit { quantity: i64, max: i32 },
}

pub type CartResult<T> = Result<T, CartError>;

impl CartError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CartError::InvalidItem { .. } => ErrorCode::CartItemInvalid,
            CartError::InvalidSelection { .. } => ErrorCode::CartSelectionInvalid,
            CartError::LineNotFound { .. } => ErrorCode::CartLineNotFound,
            CartError::InvalidDelta | CartError::QuantityLimit { .. } => {
                ErrorCode::CartQuantityInvalid
            }
        }
    }
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        AppError::with_message(err.code(), err.to_string())
    }
}
