//! Menu view: builder, memo cache and live reactor

pub mod cache;
pub mod live;
pub mod view;

pub use crate::catalog::MenuSection;
pub use cache::MenuViewCache;
pub use live::LiveMenu;
pub use view::{MenuFilter, MenuView, build_view};
