use shared::{AppError, ErrorCode};
use thiserror::Error;

use crate::feed::SinkError;

/// Order assembly and submission failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("{field} {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("cart is empty")]
    EmptyCart,

    #[error("an order submission is already in progress")]
    SubmitInFlight,

    #[error("order submission failed: {0}")]
    Submission(#[source] SinkError),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl OrderError {
    pub(crate) fn validation(field: &'static str, message: impl ToString) -> Self {
        OrderError::Validation {
            field,
            message: message.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::Validation {
                field: "table_number",
                ..
            } => ErrorCode::OrderTableRequired,
            OrderError::Validation { .. } => ErrorCode::ValidationFailed,
            OrderError::EmptyCart => ErrorCode::OrderEmpty,
            OrderError::SubmitInFlight => ErrorCode::OrderSubmitInFlight,
            OrderError::Submission(_) => ErrorCode::OrderSubmissionFailed,
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match err {
            OrderError::Validation { field, .. } => app.with_detail("field", field),
            _ => app,
        }
    }
}
