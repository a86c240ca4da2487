//! Unified error system
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`AppError`]: Error value with code, message, and details
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::OrderEmpty);
//! assert_eq!(err.code.code(), 4001);
//!
//! let err = AppError::validation("customer_name must not be empty")
//!     .with_detail("field", "customer_name");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
