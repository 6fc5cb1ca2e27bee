use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; missing sections fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataPaths,
    pub business: Business,
    pub logging: Logging,
}

/// Locations of the three source CSV files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    /// Per-influencer performance records.
    pub performance_path: PathBuf,
    /// Enriched orders, one row per order.
    pub orders_path: PathBuf,
    /// Invoiced influencer payouts.
    pub payment_log_path: PathBuf,
}

/// Business constants used by the KPI calculation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Business {
    /// The share of revenue retained as gross margin (e.g., 0.45 for 45%).
    pub profit_margin_factor: Decimal,
}

/// Logging output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: LogLevel,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml and still have it work.

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            performance_path: PathBuf::from("cleaned_data").join("influencer_performance.csv"),
            orders_path: PathBuf::from("cleaned_data").join("enriched_orders.csv"),
            payment_log_path: PathBuf::from("cleaned_data").join("payment_log.csv"),
        }
    }
}

impl Default for Business {
    fn default() -> Self {
        Self {
            profit_margin_factor: dec!(0.45),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            directory: None,
        }
    }
}

impl Config {
    /// Checks that the loaded values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let margin = self.business.profit_margin_factor;
        if margin <= Decimal::ZERO || margin > Decimal::ONE {
            return Err(ConfigError::ValidationError(format!(
                "business.profit_margin_factor must be in (0, 1], got {margin}"
            )));
        }

        for (name, path) in [
            ("data.performance_path", &self.data.performance_path),
            ("data.orders_path", &self.data.orders_path),
            ("data.payment_log_path", &self.data.payment_log_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(format!("{name} must not be empty")));
            }
        }

        Ok(())
    }
}
