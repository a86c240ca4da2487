use rust_decimal::Decimal;
use shared::{CategoryPresets, RestaurantType};
use std::str::FromStr;
use thiserror::Error;

use crate::order_money::DEFAULT_TAX_RATE_PERCENT;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read category presets from {path}: {source}")]
    PresetsRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid category presets in {path}: {source}")]
    PresetsInvalid {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Engine configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment (a `.env` file is
/// loaded first by [`crate::setup_environment`]):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | BACKEND_URL | http://localhost:54321 | Backend base URL |
/// | BACKEND_API_KEY | (empty) | Public API key |
/// | RESTAURANT_ID | (empty) | Tenant whose menu is served |
/// | RESTAURANT_TYPE | restaurant | Selects the default category order |
/// | TAX_RATE_PERCENT | 5 | Tax applied to the subtotal |
/// | FEED_POLL_INTERVAL_MS | 5000 | Menu change polling interval |
/// | REQUEST_TIMEOUT_MS | 30000 | HTTP request timeout |
/// | CATEGORY_PRESETS_PATH | (none) | JSON overriding default category lists |
/// | LOG_LEVEL | info | Log level |
/// | LOG_JSON | false | JSON log output |
/// | LOG_DIR | (none) | Directory for rolling log files |
/// | ENVIRONMENT | development | development, staging or production |
///
/// Unparseable values fall back to the default.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub backend_api_key: String,
    pub restaurant_id: String,
    pub restaurant_type: RestaurantType,
    pub tax_rate_percent: Decimal,
    pub feed_poll_interval_ms: u64,
    pub request_timeout_ms: u64,
    pub category_presets_path: Option<String>,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            backend_url: non_empty("BACKEND_URL")
                .unwrap_or_else(|| "http://localhost:54321".into()),
            backend_api_key: lookup("BACKEND_API_KEY").unwrap_or_default(),
            restaurant_id: lookup("RESTAURANT_ID").unwrap_or_default(),
            restaurant_type: non_empty("RESTAURANT_TYPE")
                .and_then(|v| RestaurantType::parse(&v))
                .unwrap_or_default(),
            tax_rate_percent: non_empty("TAX_RATE_PERCENT")
                .and_then(|v| Decimal::from_str(v.trim()).ok())
                .filter(|r| !r.is_sign_negative())
                .unwrap_or(DEFAULT_TAX_RATE_PERCENT),
            feed_poll_interval_ms: non_empty("FEED_POLL_INTERVAL_MS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(5000),
            request_timeout_ms: non_empty("REQUEST_TIMEOUT_MS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(30000),
            category_presets_path: non_empty("CATEGORY_PRESETS_PATH"),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: non_empty("LOG_JSON")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(false),
            log_dir: non_empty("LOG_DIR"),
            environment: non_empty("ENVIRONMENT").unwrap_or_else(|| "development".into()),
        }
    }

    /// Category presets: built-in lists, overridden by the presets file if set
    pub fn category_presets(&self) -> Result<CategoryPresets, ConfigError> {
        let Some(path) = &self.category_presets_path else {
            return Ok(CategoryPresets::builtin());
        };
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::PresetsRead {
            path: path.clone(),
            source,
        })?;
        CategoryPresets::from_json(&json).map_err(|source| ConfigError::PresetsInvalid {
            path: path.clone(),
            source,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
