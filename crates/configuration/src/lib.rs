//! # Campaign Insights Configuration
//!
//! Loads the strongly-typed `Config` from `config.toml`, layered with `INSIGHTS__*`
//! environment variables, and wires up `tracing` output according to the
//! `[logging]` section.

use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Business, Config, DataPaths, LogLevel, Logging};

/// The file looked up when no explicit path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Loads the application configuration from `path`.
///
/// A missing file is not an error; every setting has a default. Environment variables
/// such as `INSIGHTS__BUSINESS__PROFIT_MARGIN_FACTOR=0.4` override file values.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(
            config::File::new(&path.to_string_lossy(), config::FileFormat::Toml).required(false),
        )
        .add_source(config::Environment::with_prefix("INSIGHTS").separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
