//! Client error types

use menu_engine::{FeedError, SinkError};
use reqwest::StatusCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// API key missing or refused
    #[error("Authentication required")]
    Unauthorized,

    /// Row-level security or storage policy refused the request
    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Request refused as invalid (400, 409, 422)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: StatusCode, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Map a non-success status and its body text to an error
    pub fn from_status(status: StatusCode, text: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(text)
            }
            _ => ClientError::Server {
                status,
                message: text,
            },
        }
    }
}

impl From<ClientError> for SinkError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(_) => SinkError::Unavailable(err.to_string()),
            ClientError::Server { status, .. } if status.is_server_error() => {
                SinkError::Unavailable(err.to_string())
            }
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                SinkError::InvalidResponse(err.to_string())
            }
            _ => SinkError::Rejected(err.to_string()),
        }
    }
}

impl From<ClientError> for FeedError {
    fn from(err: ClientError) -> Self {
        FeedError::Unavailable(err.to_string())
    }
}
