//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SOUQ_STORE_DIR` - Directory backing the file store (default: `.souq`)
//! - `SOUQ_STORAGE_KEY` - Slot holding the serialized cart (default: `cart`)
//! - `SOUQ_CURRENCY_SYMBOL` - Suffix for formatted prices (default: `ر.س`)
//! - `SOUQ_EMPTY_CART_MESSAGE` - Empty-state text for the item list
//! - `SOUQ_CHECKOUT_DELAY_MS` - Simulated payment delay (default: 2000)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory backing the file store
    pub store_dir: PathBuf,
    /// Slot name in the durable store
    pub storage_key: String,
    /// Currency symbol appended to formatted prices
    pub currency_symbol: String,
    /// Message shown in the item list when the cart is empty
    pub empty_cart_message: String,
    /// Simulated payment gateway delay before checkout completes
    pub checkout_delay: Duration,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(Self::DEFAULT_STORE_DIR),
            storage_key: Self::DEFAULT_STORAGE_KEY.to_string(),
            currency_symbol: Self::DEFAULT_CURRENCY_SYMBOL.to_string(),
            empty_cart_message: Self::DEFAULT_EMPTY_MESSAGE.to_string(),
            checkout_delay: Duration::from_millis(Self::DEFAULT_CHECKOUT_DELAY_MS),
        }
    }
}

impl CartConfig {
    pub const DEFAULT_STORE_DIR: &'static str = ".souq";
    pub const DEFAULT_STORAGE_KEY: &'static str = "cart";
    pub const DEFAULT_CURRENCY_SYMBOL: &'static str = "ر.س";
    pub const DEFAULT_EMPTY_MESSAGE: &'static str = "السلة فارغة حالياً";
    pub const DEFAULT_CHECKOUT_DELAY_MS: u64 = 2000;

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_key = lookup("SOUQ_STORAGE_KEY").unwrap_or(defaults.storage_key);
        if storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "SOUQ_STORAGE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let checkout_delay = match lookup("SOUQ_CHECKOUT_DELAY_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("SOUQ_CHECKOUT_DELAY_MS".to_string(), e.to_string())
                })?,
            None => defaults.checkout_delay,
        };

        Ok(Self {
            store_dir: lookup("SOUQ_STORE_DIR").map_or(defaults.store_dir, PathBuf::from),
            storage_key,
            currency_symbol: lookup("SOUQ_CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
            empty_cart_message: lookup("SOUQ_EMPTY_CART_MESSAGE")
                .unwrap_or(defaults.empty_cart_message),
            checkout_delay,
        })
    }
}
