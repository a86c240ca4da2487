//! Menu Engine - QR menu ordering core
//!
//! # Overview
//!
//! Everything between "the backend sent some menu rows" and "an order was
//! submitted":
//!
//! - **Catalog** (`catalog`): category resolution, grouping, veg classification
//! - **Menu** (`menu`): filtered menu views, view memo cache, live reactor
//! - **Cart** (`cart`): variant-keyed lines, quantities, snapshot pricing
//! - **Orders** (`orders`): customer session, order assembly, guarded submission
//! - **Feed** (`feed`): external interface traits and an in-memory backend
//!
//! # Module layout
//!
//! ```text
//! menu-engine/src/
//! ├── core/          # configuration
//! ├── catalog/       # normalizer, veg classifier
//! ├── menu/          # view builder, cache, LiveMenu
//! ├── cart/          # cart engine, line keys
//! ├── order_money/   # rust_decimal money math
//! ├── orders/        # session, assembler
//! ├── feed/          # MenuFeed / OrderSink / AssetStore
//! └── utils/         # logger, validation
//! ```

pub mod cart;
pub mod catalog;
pub mod core;
pub mod feed;
pub mod menu;
pub mod order_money;
pub mod orders;
pub mod utils;

// Re-export public types
pub use cart::{Cart, CartError, CartLine, CartTotals};
pub use catalog::{MenuSection, is_veg, resolve_category};
pub use crate::core::{Config, ConfigError};
pub use feed::{
    AssetStore, FeedError, InMemoryBackend, MenuFeed, OrderSink, SinkError, SnapshotPublisher,
    Subscription,
};
pub use menu::{LiveMenu, MenuFilter, MenuView, MenuViewCache, build_view};
pub use orders::{CustomerSession, OrderAssembler, OrderError, SessionContext, place_order};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read [`Config`] and start logging
///
/// Returns the loaded configuration. Call once at process start.
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(
        &config.log_level,
        config.log_json,
        config.log_dir.as_deref(),
    )?;
    tracing::info!(
        environment = %config.environment,
        restaurant_id = %config.restaurant_id,
        restaurant_type = config.restaurant_type.as_str(),
        "Environment initialized"
    );
    Ok(config)
}
