//! External interfaces: menu feed, order sink, asset store
//!
//! The engine reaches the backend only through these traits:
//! ```text
//!          ┌──────────────────────────────────────┐
//!          │  MenuFeed  /  OrderSink  / AssetStore │  ◄── pluggable
//!          └─────────────────┬────────────────────┘
//!                            │
//!            ┌───────────────┴──────────────┐
//!            ▼                              ▼
//!     menu-client::BackendClient      InMemoryBackend
//!     (HTTP, polling subscription)    (same process, tests)
//! ```
//!
//! A subscription hands out full snapshots through a `watch` channel, so a
//! slow consumer only ever sees the latest menu.

mod memory;
mod publisher;
mod subscription;

pub use memory::InMemoryBackend;
pub use publisher::SnapshotPublisher;
pub use subscription::Subscription;

use async_trait::async_trait;
use shared::models::RecordError;
use shared::{AppError, ErrorCode, MenuSnapshot, OrderConfirmation, OrderPayload};
use thiserror::Error;

/// Menu feed failures
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("menu feed unavailable: {0}")]
    Unavailable(String),

    #[error("invalid menu record: {0}")]
    InvalidRecord(#[from] RecordError),

    #[error("menu feed closed")]
    Closed,
}

impl FeedError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FeedError::Unavailable(_) => ErrorCode::MenuUnavailable,
            FeedError::InvalidRecord(_) => ErrorCode::MenuRecordInvalid,
            FeedError::Closed => ErrorCode::MenuFeedClosed,
        }
    }
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        AppError::with_message(err.code(), err.to_string())
    }
}

/// Order store and asset store failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SinkError {
    /// The store refused the request
    #[error("rejected by store: {0}")]
    Rejected(String),

    /// The store could not be reached or failed internally
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with something unreadable
    #[error("invalid store response: {0}")]
    InvalidResponse(String),
}

impl SinkError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SinkError::Unavailable(_) => ErrorCode::NetworkError,
            SinkError::Rejected(_) | SinkError::InvalidResponse(_) => {
                ErrorCode::OrderSubmissionFailed
            }
        }
    }
}

/// Source of menu snapshots for one restaurant
#[async_trait]
pub trait MenuFeed: Send + Sync {
    /// Current categories and items as one consistent snapshot
    async fn fetch_initial_menu(&self, restaurant_id: &str) -> Result<MenuSnapshot, FeedError>;

    /// Snapshots delivered whenever the menu changes
    ///
    /// The subscription starts with the current menu already published.
    async fn subscribe_menu_changes(&self, restaurant_id: &str)
    -> Result<Subscription, FeedError>;
}

/// Destination for submitted orders
#[async_trait]
pub trait OrderSink: Send + Sync {
    async fn submit_order(&self, payload: &OrderPayload) -> Result<OrderConfirmation, SinkError>;
}

/// Blob storage for menu images
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store `bytes` at `bucket/path`; returns the public URL when the
    /// store exposes one
    async fn upload_asset(
        &self,
        bytes: Vec<u8>,
        bucket: &str,
        path: &str,
    ) -> Result<Option<String>, SinkError>;
}
