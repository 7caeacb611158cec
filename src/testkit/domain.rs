//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`MarketSnapshot`] and a
//! [`CountingCurve`] so tests focus on assertions rather than construction
//! boilerplate.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{
    no_trade_info, yes_trade_info, BondingCurve, MarketSnapshot, OutcomeType, Pool, TradeInfo,
};

/// Binary snapshot whose pool is consistent with `probability` under
/// invariant `k`.
pub fn market(probability: f64, k: f64) -> MarketSnapshot {
    MarketSnapshot::binary(probability, Pool::at_probability(k, probability))
}

/// Binary snapshot with an explicit contract id.
pub fn market_with_id(id: &str, probability: f64, k: f64) -> MarketSnapshot {
    market(probability, k).with_id(id)
}

/// The cheap-YES market of the worked example: p = 0.30, YES 700 / NO 300.
pub fn cheap_market() -> MarketSnapshot {
    MarketSnapshot::binary(0.30, Pool::new(700.0, 300.0)).with_id("cheap-yes")
}

/// The expensive-YES market of the worked example: p = 0.60, YES 600 / NO 400.
pub fn rich_market() -> MarketSnapshot {
    MarketSnapshot::binary(0.60, Pool::new(600.0, 400.0)).with_id("rich-yes")
}

/// A snapshot of the given non-binary type with no probability or pool.
pub fn non_binary(outcome_type: OutcomeType) -> MarketSnapshot {
    MarketSnapshot {
        id: Some("non-binary".into()),
        slug: None,
        question: None,
        outcome_type,
        probability: None,
        pool: None,
    }
}

/// Platform-shaped JSON for a binary market.
pub fn market_json(id: &str, probability: f64, yes: f64, no: f64) -> String {
    format!(
        r#"{{
  "id": "{id}",
  "slug": "{id}-slug",
  "question": "Market {id}?",
  "outcomeType": "BINARY",
  "mechanism": "cpmm-1",
  "probability": {probability},
  "pool": {{ "YES": {yes}, "NO": {no} }}
}}"#
    )
}

/// Constant-product curve that counts how often it is consulted.
#[derive(Debug, Default)]
pub struct CountingCurve {
    calls: AtomicUsize,
}

impl CountingCurve {
    /// Number of trade computations performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl BondingCurve for CountingCurve {
    fn yes_trade(&self, k: f64, p_initial: f64, p_final: f64) -> TradeInfo {
        self.calls.fetch_add(1, Ordering::Relaxed);
        yes_trade_info(k, p_initial, p_final)
    }

    fn no_trade(&self, k: f64, p_initial: f64, p_final: f64) -> TradeInfo {
        self.calls.fetch_add(1, Ordering::Relaxed);
        no_trade_info(k, p_initial, p_final)
    }
}
