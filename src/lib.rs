//! Manarb - Arbitrage between two constant-product binary prediction markets.
//!
//! Given snapshots of two binary AMM markets that price the same underlying
//! question differently, this crate computes how much to bet on each so the
//! combined position yields a guaranteed profit, and turns the result into
//! an order plan.
//!
//! # Modules
//!
//! - [`domain`] - AMM math, the arbitrage engine and order planning
//! - [`config`] - Configuration loading from TOML files
//! - [`error`] - Error types for the crate
//! - [`cli`] - Command-line handlers and output formatting
//!
//! # Example
//!
//! ```
//! use manarb::domain::{calculate_arbitrage, CalculationMode, MarketSnapshot, Pool};
//!
//! let a = MarketSnapshot::binary(0.30, Pool::new(700.0, 300.0));
//! let b = MarketSnapshot::binary(0.60, Pool::new(600.0, 400.0));
//!
//! let calculation = calculate_arbitrage(&a, &b, CalculationMode::Equilibrium).unwrap();
//! assert!(calculation.profit() > 0.0);
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
