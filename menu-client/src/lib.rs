//! Menu Client - backend adapter for the menu engine
//!
//! Implements [`MenuFeed`](menu_engine::MenuFeed),
//! [`OrderSink`](menu_engine::OrderSink) and
//! [`AssetStore`](menu_engine::AssetStore) over a PostgREST-style HTTP API.

pub mod backend;
pub mod config;
pub mod error;
pub mod http;

pub use backend::BackendClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
