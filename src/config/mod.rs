//! Application configuration loading and validation.
//!
//! Configuration is a TOML file with a `[logging]` and an `[arbitrage]`
//! section. Every field has a default, so an empty file (or no file at the
//! default location) is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use manarb::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.logging.init(0, false);
//!     Ok(())
//! }
//! ```

mod logging;

pub use logging::LoggingConfig;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{ArbitrageConfig, CalculationMode};
use crate::error::{ConfigError, Result};

/// Upper bound on bisection halvings; beyond ~60 nothing changes in f64.
const MAX_ITERATIONS: u32 = 1000;

/// Arbitrage engine settings plus CLI defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArbitrageSettings {
    #[serde(flatten)]
    pub engine: ArbitrageConfig,

    /// Mode used when `--mode` is not given.
    #[serde(default = "default_mode")]
    pub default_mode: CalculationMode,
}

fn default_mode() -> CalculationMode {
    CalculationMode::Equilibrium
}

impl Default for ArbitrageSettings {
    fn default() -> Self {
        Self {
            engine: ArbitrageConfig::default(),
            default_mode: default_mode(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub arbitrage: ArbitrageSettings,
}

impl Config {
    /// Parse and validate configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::InvalidValue`] for out-of-range values.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load an explicitly requested file, or fall back to the default
    /// location and then to built-in defaults.
    ///
    /// An explicit path that does not exist is an error; a missing file at
    /// the default location is not.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read, parsed, or
    /// validated, or if an explicit path is missing.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let path = default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        let engine = &self.arbitrage.engine;
        if engine.iterations == 0 || engine.iterations > MAX_ITERATIONS {
            return Err(ConfigError::InvalidValue {
                field: "iterations",
                reason: format!("must be between 1 and {MAX_ITERATIONS}"),
            }
            .into());
        }
        if !engine.min_amount.is_finite() || engine.min_amount < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "min_amount",
                reason: "must be a finite number >= 0".to_string(),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("expected 'pretty' or 'json', got '{}'", self.logging.format),
            }
            .into());
        }
        Ok(())
    }
}

/// Returns the manarb home directory (`~/.manarb/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".manarb")
}

/// Returns the default config file path (`~/.manarb/config.toml`).
pub fn default_path() -> PathBuf {
    home_dir().join("config.toml")
}
