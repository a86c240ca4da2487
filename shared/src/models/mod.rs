//! Data models
//!
//! Menu entities as the customer-facing core sees them. Rows from the
//! backend go through [`record`] first; nothing else constructs these from
//! untyped JSON.

pub mod category;
pub mod menu_item;
pub mod record;
pub mod restaurant;
pub mod snapshot;

// Re-exports
pub use category::*;
pub use menu_item::*;
pub use record::{ParsedRecords, RecordError, parse_categories, parse_items};
pub use restaurant::*;
pub use snapshot::*;
