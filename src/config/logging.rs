//! Logging configuration and initialization.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

/// Bare levels from quietest to most verbose.
const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

fn default_level() -> String {
    "warn".into()
}

fn default_format() -> String {
    "pretty".into()
}

impl LoggingConfig {
    /// Level directive after applying `-v`/`-q` flags.
    ///
    /// Quiet wins over verbose. Each `-v` raises the level by one step
    /// starting from the configured level, capped at `trace`. A configured
    /// directive that is not a bare level (e.g. `manarb=debug`) is kept as is.
    #[must_use]
    pub fn effective_level(&self, verbose: u8, quiet: bool) -> String {
        if quiet {
            return "error".into();
        }
        let configured = self.level.trim().to_ascii_lowercase();
        match LEVELS.iter().position(|level| *level == configured) {
            Some(index) => {
                let raised = (index + usize::from(verbose)).min(LEVELS.len() - 1);
                LEVELS[raised].into()
            }
            None => self.level.clone(),
        }
    }

    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// `RUST_LOG` takes precedence over the configured level. Logs go to
    /// stderr so stdout stays machine-readable. Calling this twice is a no-op.
    pub fn init(&self, verbose: u8, quiet: bool) {
        let level = self.effective_level(verbose, quiet);
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let result = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
        if let Err(e) = result {
            tracing::debug!(error = %e, "tracing subscriber already installed");
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbose() {
        let config = LoggingConfig::default();
        assert_eq!(config.effective_level(3, true), "error");
    }

    #[test]
    fn verbose_steps_up_from_non_default_level() {
        let config = LoggingConfig {
            level: "debug".into(),
            ..LoggingConfig::default()
        };
        assert_eq!(config.effective_level(0, false), "debug");
        assert_eq!(config.effective_level(1, false), "trace");
        assert_eq!(config.effective_level(4, false), "trace");

        let config = LoggingConfig {
            level: "ERROR".into(),
            ..LoggingConfig::default()
        };
        assert_eq!(config.effective_level(1, false), "warn");
    }

    #[test]
    fn custom_directive_is_kept() {
        let config = LoggingConfig {
            level: "manarb=debug,warn".into(),
            ..LoggingConfig::default()
        };
        assert_eq!(config.effective_level(2, false), "manarb=debug,warn");
        assert_eq!(config.effective_level(2, true), "error");
    }

    #[test]
    fn verbose_steps_up_from_configured_level() {
        let config = LoggingConfig::default();
        assert_eq!(config.effective_level(0, false), "warn");
        assert_eq!(config.effective_level(1, false), "info");
        assert_eq!(config.effective_level(2, false), "debug");
        assert_eq!(config.effective_level(9, false), "trace");
    }
}
