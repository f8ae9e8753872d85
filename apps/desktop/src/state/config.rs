//! # Configuration State
//!
//! Application configuration, read once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOCKBOOK_*`)
//! 2. Defaults (this file)
//!
//! Tax rate and supplier lead time are fixed business rules and live in
//! `stockbook-core`, not here. Read-only after initialization, so no mutex.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use stockbook_core::{CURRENCY_SYMBOL, DEFAULT_CUSTOMER};

pub const ENV_DB_PATH: &str = "STOCKBOOK_DB_PATH";
pub const ENV_STORE_NAME: &str = "STOCKBOOK_STORE_NAME";
pub const ENV_EXPORT_DIR: &str = "STOCKBOOK_EXPORT_DIR";
pub const ENV_DEFAULT_CUSTOMER: &str = "STOCKBOOK_DEFAULT_CUSTOMER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Printed under the INVOICE banner.
    pub store_name: String,

    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Recorded by `commit_bill` when the cashier leaves the customer blank.
    pub default_customer: String,

    /// Rows shown by the top-products chart.
    pub top_products_limit: usize,

    /// Where CSV exports and printed documents are written.
    pub export_dir: PathBuf,

    /// Database file override. `None` uses the platform data directory.
    pub db_path: Option<PathBuf>,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Stockbook Stationers".to_string(),
            currency_symbol: CURRENCY_SYMBOL.to_string(),
            currency_decimals: 2,
            default_customer: DEFAULT_CUSTOMER.to_string(),
            top_products_limit: 10,
            export_dir: PathBuf::from("."),
            db_path: None,
        }
    }
}

impl ConfigState {
    /// Defaults overridden by `STOCKBOOK_DB_PATH`, `STOCKBOOK_STORE_NAME`,
    /// `STOCKBOOK_EXPORT_DIR` and `STOCKBOOK_DEFAULT_CUSTOMER`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    /// Blank values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = var(ENV_DB_PATH) {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(store_name) = var(ENV_STORE_NAME) {
            config.store_name = store_name;
        }

        if let Some(dir) = var(ENV_EXPORT_DIR) {
            config.export_dir = PathBuf::from(dir);
        }

        if let Some(customer) = var(ENV_DEFAULT_CUSTOMER) {
            config.default_customer = customer.trim().to_string();
        }

        config
    }

    /// Formats a minor-unit amount as a currency string.
    ///
    /// ```rust
    /// use stockbook_desktop::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234), "₹12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = (cents / divisor).abs();
        let frac = (cents % divisor).abs();
        let sign = if cents < 0 { "-" } else { "" };

        if self.currency_decimals > 0 {
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.currency_symbol,
                whole,
                frac,
                width = self.currency_decimals as usize
            )
        } else {
            format!("{}{}{}", sign, self.currency_symbol, whole)
        }
    }
}
