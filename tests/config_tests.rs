//! Configuration loading integration tests.

mod support;

use tempfile::TempDir;

use manarb::config::Config;
use manarb::domain::CalculationMode;
use manarb::error::{ConfigError, Error};
use manarb::testkit::config::VALID_TOML;

use support::fixtures::write_file;

#[test]
fn config_loads_full_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "config.toml", VALID_TOML);

    let config = Config::load(&path).expect("valid config");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.arbitrage.engine.min_amount, 0.5);
    assert_eq!(config.arbitrage.engine.iterations, 60);
    assert_eq!(config.arbitrage.default_mode, CalculationMode::HorseRace);
}

#[test]
fn config_partial_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "config.toml",
        "[arbitrage]\ndefault_mode = \"classic\"\n",
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.arbitrage.default_mode, CalculationMode::Classic);
    assert_eq!(config.arbitrage.engine.min_amount, 0.01);
    assert_eq!(config.arbitrage.engine.iterations, 100);
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn config_accepts_mode_aliases() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "config.toml",
        "[arbitrage]\ndefault_mode = \"horseRace\"\n",
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.arbitrage.default_mode, CalculationMode::HorseRace);
}

#[test]
fn config_rejects_too_many_iterations() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "config.toml", "[arbitrage]\niterations = 5000\n");

    let result = Config::load(&path);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "iterations",
            ..
        }))
    ));
    let message = result.unwrap_err().to_string();
    assert!(message.contains("invalid value for iterations"), "{message}");
}

#[test]
fn config_rejects_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "config.toml", "[arbitrage\nmin_amount = ");

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn config_missing_explicit_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    assert!(matches!(
        Config::resolve(Some(missing.as_path())),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}
