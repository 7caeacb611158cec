//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::domain::ArbitrageConfig;

/// Engine config with the production thresholds.
pub fn engine() -> ArbitrageConfig {
    ArbitrageConfig::default()
}

/// Engine config that accepts any strictly positive trade.
pub fn permissive_engine() -> ArbitrageConfig {
    ArbitrageConfig {
        min_amount: 0.0,
        ..ArbitrageConfig::default()
    }
}

/// A complete, valid configuration file.
pub const VALID_TOML: &str = r#"
[logging]
level = "debug"
format = "json"

[arbitrage]
min_amount = 0.5
iterations = 60
default_mode = "horse-race"
"#;
