//! Turning a calculation into concrete orders.
//!
//! An [`ExecutionPlan`] is what an execution layer would submit to the
//! trading API: one market order per leg, sized in mana, addressed by the
//! literal contract id. Nothing here talks to the network.

use std::fmt;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::debug;

use super::arbitrage::{ArbitrageCalculation, CalculationMode};
use super::error::PlanError;
use super::id::ContractId;
use super::market::{MarketSide, MarketSnapshot};

/// Side of a binary market to buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Yes,
    No,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => f.write_str("YES"),
            Self::No => f.write_str("NO"),
        }
    }
}

/// Percentage of the calculated bet sizes to actually place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// Place the full calculated amounts.
    pub const FULL: Self = Self(100.0);

    /// Create a scale from a percentage in `[0, 100]`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidScale`] for NaN or out-of-range values.
    pub fn new(percent: f64) -> Result<Self, PlanError> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(PlanError::InvalidScale(percent));
        }
        Ok(Self(percent))
    }

    #[must_use]
    pub const fn percent(&self) -> f64 {
        self.0
    }

    /// Scale as a multiplier in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        self.0 / 100.0
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::FULL
    }
}

/// A single market order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub side: MarketSide,
    pub contract_id: ContractId,
    pub outcome: Outcome,
    /// Mana to spend, truncated to cents.
    pub amount: Decimal,
}

/// The orders realizing a calculation at a given scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPlan {
    mode: CalculationMode,
    scale: ScaleFactor,
    orders: Vec<OrderRequest>,
    expected_profit: Decimal,
}

impl ExecutionPlan {
    /// Build the orders for `calculation`, scaling both bets uniformly.
    ///
    /// Market A is bought YES (NO in a horse race); market B is always bought
    /// NO. Legs that round to zero are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] if a market has no contract id, an amount is not
    /// finite, or no leg survives rounding.
    pub fn build(
        calculation: &ArbitrageCalculation,
        scale: ScaleFactor,
    ) -> Result<Self, PlanError> {
        let (outcome_a, outcome_b) = leg_outcomes(calculation.mode());

        let legs = [
            (
                MarketSide::A,
                calculation.market_a(),
                outcome_a,
                calculation.bet_amount_a(),
            ),
            (
                MarketSide::B,
                calculation.market_b(),
                outcome_b,
                calculation.bet_amount_b(),
            ),
        ];

        let mut orders = Vec::with_capacity(legs.len());
        for (side, market, outcome, bet) in legs {
            let contract_id = contract_id(market, side)?;
            let amount = to_mana(bet * scale.fraction())?;
            if amount <= Decimal::ZERO {
                debug!(%side, %contract_id, bet, "dropping leg that rounds to zero");
                continue;
            }
            orders.push(OrderRequest {
                side,
                contract_id,
                outcome,
                amount,
            });
        }

        if orders.is_empty() {
            return Err(PlanError::EmptyPlan);
        }

        Ok(Self {
            mode: calculation.mode(),
            scale,
            orders,
            expected_profit: to_mana(calculation.profit() * scale.fraction())?,
        })
    }

    #[must_use]
    pub const fn mode(&self) -> CalculationMode {
        self.mode
    }

    #[must_use]
    pub const fn scale(&self) -> ScaleFactor {
        self.scale
    }

    #[must_use]
    pub fn orders(&self) -> &[OrderRequest] {
        &self.orders
    }

    /// Total mana committed across all orders.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.orders.iter().map(|o| o.amount).sum()
    }

    /// Calculated profit scaled linearly. Slippage makes the real figure
    /// differ for partial scales; for display only.
    #[must_use]
    pub const fn expected_profit(&self) -> Decimal {
        self.expected_profit
    }
}

/// Side bought on market A and on market B for `mode`.
#[must_use]
pub const fn leg_outcomes(mode: CalculationMode) -> (Outcome, Outcome) {
    match mode {
        CalculationMode::HorseRace => (Outcome::No, Outcome::No),
        CalculationMode::Classic | CalculationMode::Equilibrium | CalculationMode::Average => {
            (Outcome::Yes, Outcome::No)
        }
    }
}

fn contract_id(market: &MarketSnapshot, side: MarketSide) -> Result<ContractId, PlanError> {
    market
        .id
        .clone()
        .ok_or(PlanError::MissingContractId { side })
}

fn to_mana(amount: f64) -> Result<Decimal, PlanError> {
    Decimal::from_f64(amount)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::ToZero))
        .ok_or(PlanError::UnrepresentableAmount(amount))
}
