//! Error codes for the menu ordering engine
//!
//! Codes are shared between the engine, the backend client and the
//! customer-facing frontend. They are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Menu feed errors
//! - 2xxx: Cart errors
//! - 4xxx: Order errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a plain `u16` so the frontend can switch on it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,

    // ==================== 1xxx: Menu feed ====================
    /// Menu could not be loaded
    MenuUnavailable = 1001,
    /// A feed record could not be parsed
    MenuRecordInvalid = 1002,
    /// The live menu subscription was closed
    MenuFeedClosed = 1003,

    // ==================== 2xxx: Cart ====================
    /// Item has no resolvable price
    CartItemInvalid = 2001,
    /// Size or add-on selection does not match the item
    CartSelectionInvalid = 2002,
    /// Cart line does not exist
    CartLineNotFound = 2003,
    /// Quantity change is not allowed
    CartQuantityInvalid = 2004,

    // ==================== 4xxx: Order ====================
    /// Order has no items
    OrderEmpty = 4001,
    /// An order submission is already in flight
    OrderSubmitInFlight = 4002,
    /// The order store rejected or failed the submission
    OrderSubmissionFailed = 4003,
    /// Dine-in order without a table
    OrderTableRequired = 4004,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error talking to the backend
    NetworkError = 9002,
}

impl ErrorCode {
    /// Numeric value of this code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",

            ErrorCode::MenuUnavailable => "Menu is currently unavailable",
            ErrorCode::MenuRecordInvalid => "Menu record is invalid",
            ErrorCode::MenuFeedClosed => "Live menu updates have stopped",

            ErrorCode::CartItemInvalid => "Item cannot be priced",
            ErrorCode::CartSelectionInvalid => "Selected size or add-on is not offered",
            ErrorCode::CartLineNotFound => "Cart line not found",
            ErrorCode::CartQuantityInvalid => "Quantity change is not allowed",

            ErrorCode::OrderEmpty => "Order is empty",
            ErrorCode::OrderSubmitInFlight => "Order is already being submitted",
            ErrorCode::OrderSubmissionFailed => "Order could not be placed",
            ErrorCode::OrderTableRequired => "Table number is required for dine-in orders",

            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),

            1001 => Ok(ErrorCode::MenuUnavailable),
            1002 => Ok(ErrorCode::MenuRecordInvalid),
            1003 => Ok(ErrorCode::MenuFeedClosed),

            2001 => Ok(ErrorCode::CartItemInvalid),
            2002 => Ok(ErrorCode::CartSelectionInvalid),
            2003 => Ok(ErrorCode::CartLineNotFound),
            2004 => Ok(ErrorCode::CartQuantityInvalid),

            4001 => Ok(ErrorCode::OrderEmpty),
            4002 => Ok(ErrorCode::OrderSubmitInFlight),
            4003 => Ok(ErrorCode::OrderSubmissionFailed),
            4004 => Ok(ErrorCode::OrderTableRequired),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::NetworkError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
