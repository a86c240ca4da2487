//! Logging Infrastructure
//!
//! Structured logging setup for development and production:
//! - Console output, pretty or JSON
//! - Daily rotating application logs (14 files kept)
//! - Daily order logs under target `orders` (never pruned)

use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, filter, fmt, prelude::*};

/// Log target for order submission events
pub const ORDERS_TARGET: &str = "orders";

/// Application log files kept before rotation deletes the oldest
const APP_LOG_RETENTION: usize = 14;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn"); `RUST_LOG` wins when set
/// * `json_format` - JSON output (production) instead of pretty output (development)
/// * `log_dir` - Optional directory for file logging (e.g., Some("./logs"))
///
/// # Examples
/// ```no_run
/// # use menu_engine::utils::logger::init_logger_with_file;
/// // Development setup (console only)
/// init_logger_with_file("debug", false, None)?;
///
/// // Production setup (console + files)
/// init_logger_with_file("info", true, Some("./logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<BoxedLayer> = vec![console_layer(level, json_format)];

    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);
        let app_log_dir = log_dir.join("app");
        let orders_log_dir = log_dir.join(ORDERS_TARGET);
        fs::create_dir_all(&app_log_dir)?;
        fs::create_dir_all(&orders_log_dir)?;

        let app_log = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("app")
            .filename_suffix("log")
            .max_log_files(APP_LOG_RETENTION)
            .build(&app_log_dir)?;
        layers.push(file_layer(app_log, json_format, |target| {
            target != ORDERS_TARGET
        }));

        let orders_log = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(ORDERS_TARGET)
            .filename_suffix("log")
            .build(&orders_log_dir)?;
        layers.push(file_layer(orders_log, json_format, |target| {
            target == ORDERS_TARGET
        }));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

/// Initialize the logging system (console only)
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

fn console_layer(level: &str, json_format: bool) -> BoxedLayer {
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new(level))
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new(level))
            .boxed()
    }
}

fn file_layer(
    appender: RollingFileAppender,
    json_format: bool,
    keep: fn(&str) -> bool,
) -> BoxedLayer {
    let by_target = filter::filter_fn(move |meta| keep(meta.target()));
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(Mutex::new(appender))
            .with_filter(by_target)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(Mutex::new(appender))
            .with_filter(by_target)
            .boxed()
    }
}

/// Order log helper - records order submission outcomes under target `orders`
///
/// # Examples
/// ```no_run
/// # use menu_engine::order_log;
/// order_log!(INFO, "submitted", restaurant_id = "r1", order_id = "o-42");
/// order_log!(WARN, "rejected", restaurant_id = "r1", error = "backend unavailable");
/// ```
#[macro_export]
macro_rules! order_log {
    (INFO, $event:expr, $($arg:tt)*) => {
        tracing::info!(
            target: "orders",
            event = $event,
            $($arg)*
        );
    };
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(
            target: "orders",
            event = $event,
            $($arg)*
        );
    };
    (ERROR, $event:expr, $($arg:tt)*) => {
        tracing::error!(
            target: "orders",
            event = $event,
            $($arg)*
        );
    };
}
