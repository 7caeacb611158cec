//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for market snapshots and a call-counting curve.
//! - [`config`] - Canonical engine configurations and config file contents.

pub mod config;
pub mod domain;
