//! Shared utilities: logging and input validation

pub mod logger;
pub mod validation;

pub use logger::{ORDERS_TARGET, init_logger, init_logger_with_file};
