//! Constant-product AMM trade sizing.
//!
//! A binary market's pool holds YES and NO reserves whose product `k` stays
//! fixed across trades. Since the YES probability is `NO / (YES + NO)`, the
//! reserves at probability `p` are
//!
//! ```text
//! YES(p) = sqrt(k * (1 - p) / p)
//! NO(p)  = sqrt(k * p / (1 - p))
//! ```
//!
//! Moving the price from `p_initial` to `p_final` therefore has a closed-form
//! cost and payout, computed by [`yes_trade_info`] and [`no_trade_info`].
//! No rounding is applied here.

use super::market::Pool;

/// Cost and payout of pushing a market to a target probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeInfo {
    /// Mana paid into the pool.
    pub cost: f64,
    /// Reserve drawn out of the pool: the shares received on top of the ones
    /// minted by `cost`, i.e. the net gain if the bought side resolves true.
    pub shares: f64,
}

/// Buy YES, moving the probability from `p_initial` up to `p_final`.
#[must_use]
pub fn yes_trade_info(k: f64, p_initial: f64, p_final: f64) -> TradeInfo {
    let before = Pool::at_probability(k, p_initial);
    let after = Pool::at_probability(k, p_final);
    TradeInfo {
        cost: after.no - before.no,
        shares: before.yes - after.yes,
    }
}

/// Buy NO, moving the probability from `p_initial` down to `p_final`.
#[must_use]
pub fn no_trade_info(k: f64, p_initial: f64, p_final: f64) -> TradeInfo {
    let before = Pool::at_probability(k, p_initial);
    let after = Pool::at_probability(k, p_final);
    TradeInfo {
        cost: after.yes - before.yes,
        shares: before.no - after.no,
    }
}

/// Pricing curve used by the arbitrage engine.
///
/// The engine only ever talks to the pool through this trait, so an
/// alternative curve (or a recording fake in tests) can be substituted.
pub trait BondingCurve {
    /// Cost and shares for buying YES from `p_initial` to `p_final`.
    fn yes_trade(&self, k: f64, p_initial: f64, p_final: f64) -> TradeInfo;

    /// Cost and shares for buying NO from `p_initial` to `p_final`.
    fn no_trade(&self, k: f64, p_initial: f64, p_final: f64) -> TradeInfo;
}

/// The `YES * NO = k` market maker.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantProduct;

impl BondingCurve for ConstantProduct {
    fn yes_trade(&self, k: f64, p_initial: f64, p_final: f64) -> TradeInfo {
        yes_trade_info(k, p_initial, p_final)
    }

    fn no_trade(&self, k: f64, p_initial: f64, p_final: f64) -> TradeInfo {
        no_trade_info(k, p_initial, p_final)
    }
}
