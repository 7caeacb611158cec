//! Two-market arbitrage engine.
//!
//! Given two binary AMM markets that disagree, the engine finds how much to
//! bet on each so the combined position pays out regardless of resolution.
//! Four modes choose the post-trade target probability:
//!
//! - [`CalculationMode::Classic`] - midpoint target, never rejected
//! - [`CalculationMode::Average`] - midpoint target, rejected when unprofitable
//! - [`CalculationMode::Equilibrium`] - target where both resolutions pay the same
//! - [`CalculationMode::HorseRace`] - buy NO on two markets whose
//!   probabilities sum above 1
//!
//! The engine is pure: no I/O, no shared state, a fixed number of float
//! operations per call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::amm::{BondingCurve, ConstantProduct};
use super::error::ArbitrageError;
use super::market::{BinaryMarket, MarketRejection, MarketSide, MarketSnapshot};

/// How the target probability is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculationMode {
    /// Buy YES on A and NO on B up to the midpoint, whatever the profit.
    Classic,
    /// Bisect for the target where both resolutions pay the same.
    Equilibrium,
    /// Midpoint target, with the minimum-amount rejection.
    Average,
    /// Buy NO on both markets when their probabilities over-sum.
    #[serde(alias = "horseRace", alias = "horse_race")]
    HorseRace,
}

impl CalculationMode {
    /// Every mode, in display order.
    pub const ALL: [Self; 4] = [
        Self::Equilibrium,
        Self::Average,
        Self::Classic,
        Self::HorseRace,
    ];

    /// Stable name used in configuration and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Equilibrium => "equilibrium",
            Self::Average => "average",
            Self::HorseRace => "horse-race",
        }
    }

    /// One-line description of the mode.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Classic => {
                "YES on A, NO on B, both moved to the midpoint; reports the result even at a loss"
            }
            Self::Equilibrium => {
                "YES on A, NO on B, target found by bisection so both outcomes pay the same"
            }
            Self::Average => {
                "YES on A, NO on B, both moved to the unweighted average of the two probabilities"
            }
            Self::HorseRace => {
                "NO on both markets when their probabilities sum above 100%, targets summing to 100%"
            }
        }
    }
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized mode name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown calculation mode '{0}' (expected classic, equilibrium, average or horse-race)")]
pub struct ParseModeError(String);

impl FromStr for CalculationMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "classic" => Ok(Self::Classic),
            "equilibrium" => Ok(Self::Equilibrium),
            "average" => Ok(Self::Average),
            "horse-race" | "horserace" => Ok(Self::HorseRace),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Engine thresholds.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArbitrageConfig {
    /// Bet amounts and profit at or below this many mana are not worth
    /// placing. Not applied in classic mode.
    #[serde(default = "default_min_amount")]
    pub min_amount: f64,

    /// Fixed number of bisection halvings.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
}

fn default_min_amount() -> f64 {
    0.01
}

fn default_iterations() -> u32 {
    100
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            min_amount: default_min_amount(),
            iterations: default_iterations(),
        }
    }
}

/// Result of a successful calculation.
///
/// Built fresh for every request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbitrageCalculation {
    market_a: MarketSnapshot,
    market_b: MarketSnapshot,
    mode: CalculationMode,
    bet_amount_a: f64,
    bet_amount_b: f64,
    profit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_probability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_probability_a: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_probability_b: Option<f64>,
}

impl ArbitrageCalculation {
    #[must_use]
    pub const fn market_a(&self) -> &MarketSnapshot {
        &self.market_a
    }

    #[must_use]
    pub const fn market_b(&self) -> &MarketSnapshot {
        &self.market_b
    }

    #[must_use]
    pub const fn mode(&self) -> CalculationMode {
        self.mode
    }

    /// Mana to bet on market A (YES, or NO in a horse race).
    #[must_use]
    pub const fn bet_amount_a(&self) -> f64 {
        self.bet_amount_a
    }

    /// Mana to bet NO on market B.
    #[must_use]
    pub const fn bet_amount_b(&self) -> f64 {
        self.bet_amount_b
    }

    /// Guaranteed profit of the hedged position.
    #[must_use]
    pub const fn profit(&self) -> f64 {
        self.profit
    }

    /// Common post-trade probability (single-target modes).
    #[must_use]
    pub const fn new_probability(&self) -> Option<f64> {
        self.new_probability
    }

    /// Post-trade probability of market A (horse race).
    #[must_use]
    pub const fn new_probability_a(&self) -> Option<f64> {
        self.new_probability_a
    }

    /// Post-trade probability of market B (horse race).
    #[must_use]
    pub const fn new_probability_b(&self) -> Option<f64> {
        self.new_probability_b
    }

    /// Total mana across both bets.
    #[must_use]
    pub fn total_bet(&self) -> f64 {
        self.bet_amount_a + self.bet_amount_b
    }
}

/// Compute arbitrage with the default thresholds and the constant-product curve.
///
/// # Errors
///
/// Returns [`ArbitrageError`] when either market is unusable, the markets are
/// ordered wrong for the mode, or (outside classic mode) no trade clears the
/// minimum amount.
pub fn calculate_arbitrage(
    market_a: &MarketSnapshot,
    market_b: &MarketSnapshot,
    mode: CalculationMode,
) -> Result<ArbitrageCalculation, ArbitrageError> {
    ArbitrageEngine::new(ArbitrageConfig::default()).calculate(market_a, market_b, mode)
}

/// Arbitrage calculator over a pricing curve.
#[derive(Debug, Clone)]
pub struct ArbitrageEngine<C = ConstantProduct> {
    config: ArbitrageConfig,
    curve: C,
}

impl ArbitrageEngine {
    /// Create an engine on the constant-product curve.
    #[must_use]
    pub fn new(config: ArbitrageConfig) -> Self {
        Self {
            config,
            curve: ConstantProduct,
        }
    }
}

/// Bet sizes and profit for one target.
#[derive(Debug, Clone, Copy)]
struct Legs {
    bet_a: f64,
    bet_b: f64,
    profit: f64,
}

/// Which half of the bracket holds the crossing point.
enum Half {
    Lower,
    Upper,
}

impl<C: BondingCurve> ArbitrageEngine<C> {
    /// Create an engine on an explicit curve.
    pub fn with_curve(config: ArbitrageConfig, curve: C) -> Self {
        Self { config, curve }
    }

    #[must_use]
    pub fn config(&self) -> &ArbitrageConfig {
        &self.config
    }

    #[must_use]
    pub fn curve(&self) -> &C {
        &self.curve
    }

    /// Compute the trades for `mode`.
    ///
    /// Both markets are validated before any curve math runs.
    ///
    /// # Errors
    ///
    /// See [`calculate_arbitrage`].
    pub fn calculate(
        &self,
        market_a: &MarketSnapshot,
        market_b: &MarketSnapshot,
        mode: CalculationMode,
    ) -> Result<ArbitrageCalculation, ArbitrageError> {
        let a = validate(market_a, MarketSide::A)?;
        let b = validate(market_b, MarketSide::B)?;
        let (pa, pb) = (a.probability(), b.probability());

        let result = match mode {
            CalculationMode::Classic | CalculationMode::Average | CalculationMode::Equilibrium => {
                if pa >= pb {
                    return Err(ArbitrageError::InvertedMarkets {
                        probability_a: pa,
                        probability_b: pb,
                    });
                }

                let target = match mode {
                    CalculationMode::Equilibrium => self.equilibrium_target(&a, &b),
                    _ => (pa + pb) / 2.0,
                };
                let legs = self.single_target_legs(&a, &b, target);
                if mode != CalculationMode::Classic {
                    self.ensure_meaningful(mode, legs)?;
                }

                debug!(
                    mode = %mode,
                    target_probability = target,
                    bet_a = legs.bet_a,
                    bet_b = legs.bet_b,
                    profit = legs.profit,
                    "arbitrage calculated"
                );
                self.assemble(market_a, market_b, mode, legs, Some(target), None, None)
            }
            CalculationMode::HorseRace => {
                if pa + pb <= 1.0 {
                    return Err(ArbitrageError::InsufficientSpread {
                        probability_a: pa,
                        probability_b: pb,
                    });
                }

                let target_a = self.horse_race_target(&a, &b);
                let target_b = 1.0 - target_a;
                let legs = self.horse_race_legs(&a, &b, target_a);
                self.ensure_meaningful(mode, legs)?;

                debug!(
                    mode = %mode,
                    target_a,
                    target_b,
                    bet_a = legs.bet_a,
                    bet_b = legs.bet_b,
                    profit = legs.profit,
                    "arbitrage calculated"
                );
                self.assemble(
                    market_a,
                    market_b,
                    mode,
                    legs,
                    None,
                    Some(target_a),
                    Some(target_b),
                )
            }
        };

        Ok(result)
    }

    /// YES on A and NO on B, both moved to `target`.
    fn single_target_legs(&self, a: &BinaryMarket, b: &BinaryMarket, target: f64) -> Legs {
        let yes_a = self.curve.yes_trade(a.k(), a.probability(), target);
        let no_b = self.curve.no_trade(b.k(), b.probability(), target);
        Legs {
            bet_a: yes_a.cost,
            bet_b: no_b.cost,
            profit: yes_a.shares - no_b.cost,
        }
    }

    /// NO on A down to `target_a` and NO on B down to `1 - target_a`.
    fn horse_race_legs(&self, a: &BinaryMarket, b: &BinaryMarket, target_a: f64) -> Legs {
        let no_a = self.curve.no_trade(a.k(), a.probability(), target_a);
        let no_b = self.curve.no_trade(b.k(), b.probability(), 1.0 - target_a);
        Legs {
            bet_a: no_a.cost,
            bet_b: no_b.cost,
            profit: no_b.shares - no_a.cost,
        }
    }

    /// Target in `(pA, pB)` where the YES-resolution payoff
    /// `sharesA - costB` (rising in p) meets the NO-resolution payoff
    /// `sharesB - costA` (falling in p).
    fn equilibrium_target(&self, a: &BinaryMarket, b: &BinaryMarket) -> f64 {
        bisect(a.probability(), b.probability(), self.config.iterations, |p| {
            let yes_a = self.curve.yes_trade(a.k(), a.probability(), p);
            let no_b = self.curve.no_trade(b.k(), b.probability(), p);
            if yes_a.shares - no_b.cost > no_b.shares - yes_a.cost {
                Half::Lower
            } else {
                Half::Upper
            }
        })
    }

    /// Target for A in `(1 - pB, pA)` where "B wins" (`sharesB - costA`,
    /// rising in the target) meets "A wins" (`sharesA - costB`, falling).
    fn horse_race_target(&self, a: &BinaryMarket, b: &BinaryMarket) -> f64 {
        let (pa, pb) = (a.probability(), b.probability());
        bisect(0.0, 1.0, self.config.iterations, |target_a| {
            let target_b = 1.0 - target_a;
            // Outside the feasible band one of the NO bets would have to buy
            // YES instead; steer back without touching the curve.
            if target_a >= pa {
                return Half::Lower;
            }
            if target_b >= pb {
                return Half::Upper;
            }

            let no_a = self.curve.no_trade(a.k(), pa, target_a);
            let no_b = self.curve.no_trade(b.k(), pb, target_b);
            if no_b.shares - no_a.cost > no_a.shares - no_b.cost {
                Half::Lower
            } else {
                Half::Upper
            }
        })
    }

    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    fn ensure_meaningful(&self, mode: CalculationMode, legs: Legs) -> Result<(), ArbitrageError> {
        let min = self.config.min_amount;
        // Negated comparisons so NaN is rejected too.
        if !(legs.bet_a > min) || !(legs.bet_b > min) || !(legs.profit > min) {
            debug!(
                mode = %mode,
                bet_a = legs.bet_a,
                bet_b = legs.bet_b,
                profit = legs.profit,
                min,
                "arbitrage rejected"
            );
            return Err(ArbitrageError::NoProfitableOpportunity {
                bet_amount_a: legs.bet_a,
                bet_amount_b: legs.bet_b,
                profit: legs.profit,
            });
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        &self,
        market_a: &MarketSnapshot,
        market_b: &MarketSnapshot,
        mode: CalculationMode,
        legs: Legs,
        new_probability: Option<f64>,
        new_probability_a: Option<f64>,
        new_probability_b: Option<f64>,
    ) -> ArbitrageCalculation {
        ArbitrageCalculation {
            market_a: market_a.clone(),
            market_b: market_b.clone(),
            mode,
            bet_amount_a: legs.bet_a,
            bet_amount_b: legs.bet_b,
            profit: legs.profit,
            new_probability,
            new_probability_a,
            new_probability_b,
        }
    }
}

fn validate(snapshot: &MarketSnapshot, side: MarketSide) -> Result<BinaryMarket, ArbitrageError> {
    BinaryMarket::try_from_snapshot(snapshot).map_err(|rejection| match rejection {
        MarketRejection::NotBinary(reason) => ArbitrageError::NotBinaryMarket { side, reason },
        MarketRejection::Degenerate(reason) => ArbitrageError::DegenerateMarket { side, reason },
    })
}

/// Halve `[low, high]` a fixed number of times, keeping the half `choose`
/// picks, and return the midpoint of the final bracket.
///
/// Stops early once the midpoint is no longer strictly inside the bracket.
fn bisect(mut low: f64, mut high: f64, iterations: u32, mut choose: impl FnMut(f64) -> Half) -> f64 {
    for _ in 0..iterations {
        let mid = (low + high) / 2.0;
        if mid <= low || mid >= high {
            break;
        }
        match choose(mid) {
            Half::Lower => high = mid,
            Half::Upper => low = mid,
        }
    }
    (low + high) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::amm::{no_trade_info, yes_trade_info};
    use crate::domain::error::{DegenerateReason, NotBinaryReason};
    use crate::domain::market::{OutcomeType, Pool};
    use crate::testkit::domain::CountingCurve;

    fn market_a() -> MarketSnapshot {
        MarketSnapshot::binary(0.30, Pool::new(700.0, 300.0))
    }

    fn market_b() -> MarketSnapshot {
        MarketSnapshot::binary(0.60, Pool::new(600.0, 400.0))
    }

    #[test]
    fn mode_names_round_trip() {
        for mode in CalculationMode::ALL {
            assert_eq!(mode.as_str().parse::<CalculationMode>().unwrap(), mode);
        }
        assert_eq!(
            "horseRace".parse::<CalculationMode>().unwrap(),
            CalculationMode::HorseRace
        );
        assert_eq!(
            "HORSE_RACE".parse::<CalculationMode>().unwrap(),
            CalculationMode::HorseRace
        );
        assert!("median".parse::<CalculationMode>().is_err());
    }

    #[test]
    fn mode_deserializes_from_camel_case_alias() {
        let mode: CalculationMode = serde_json::from_str("\"horseRace\"").unwrap();
        assert_eq!(mode, CalculationMode::HorseRace);
    }

    #[test]
    fn bisect_finds_crossing_of_linear_functions() {
        // f(x) = x rises, g(x) = 1 - x falls; they cross at 0.5.
        let x = bisect(0.0, 1.0, 100, |x| if x > 1.0 - x { Half::Lower } else { Half::Upper });
        assert!((x - 0.5).abs() < 1e-12);
    }

    #[test]
    fn bisect_with_zero_iterations_returns_midpoint() {
        let x = bisect(0.2, 0.4, 0, |_| Half::Upper);
        assert!((x - 0.3).abs() < 1e-12);
    }

    #[test]
    fn classic_uses_midpoint_and_closed_form_amounts() {
        let calc = calculate_arbitrage(&market_a(), &market_b(), CalculationMode::Classic).unwrap();

        let k_a = 700.0 * 300.0;
        let k_b = 600.0 * 400.0;
        let midpoint = (0.30 + 0.60) / 2.0;
        let yes_a = yes_trade_info(k_a, 0.30, midpoint);
        let no_b = no_trade_info(k_b, 0.60, midpoint);

        assert_eq!(calc.new_probability(), Some(midpoint));
        assert!((midpoint - 0.45).abs() < 1e-15);
        assert_eq!(calc.bet_amount_a(), yes_a.cost);
        assert_eq!(calc.bet_amount_b(), no_b.cost);
        assert_eq!(calc.profit(), yes_a.shares - no_b.cost);
        assert!(calc.new_probability_a().is_none());
    }

    #[test]
    fn equilibrium_balances_both_resolutions() {
        let calc =
            calculate_arbitrage(&market_a(), &market_b(), CalculationMode::Equilibrium).unwrap();
        let target = calc.new_probability().unwrap();
        assert!(target > 0.30 && target < 0.60);

        let yes_a = yes_trade_info(700.0 * 300.0, 0.30, target);
        let no_b = no_trade_info(600.0 * 400.0, 0.60, target);
        let if_yes = yes_a.shares - no_b.cost;
        let if_no = no_b.shares - yes_a.cost;
        assert!((if_yes - if_no).abs() < 1e-6);
        assert!((calc.profit() - if_yes).abs() < 1e-9);
    }

    #[test]
    fn average_rejects_tiny_spread() {
        let a = MarketSnapshot::binary(0.5, Pool::new(10.0, 10.0));
        let b = MarketSnapshot::binary(0.5001, Pool::new(10.0, 10.0));

        let err = calculate_arbitrage(&a, &b, CalculationMode::Average).unwrap_err();
        assert!(matches!(err, ArbitrageError::NoProfitableOpportunity { .. }));
    }

    #[test]
    fn classic_never_rejects_tiny_spread() {
        let a = MarketSnapshot::binary(0.5, Pool::new(10.0, 10.0));
        let b = MarketSnapshot::binary(0.5001, Pool::new(10.0, 10.0));

        let calc = calculate_arbitrage(&a, &b, CalculationMode::Classic).unwrap();
        assert!(calc.profit() < 0.01);
    }

    #[test]
    fn horse_race_targets_sum_to_one() {
        let a = MarketSnapshot::binary(0.55, Pool::new(400.0, 600.0));
        let b = MarketSnapshot::binary(0.50, Pool::new(500.0, 500.0));

        let calc = calculate_arbitrage(&a, &b, CalculationMode::HorseRace).unwrap();
        let (ta, tb) = (
            calc.new_probability_a().unwrap(),
            calc.new_probability_b().unwrap(),
        );
        assert!((ta + tb - 1.0).abs() < 1e-12);
        assert!(ta < 0.55 && tb < 0.50);
        assert!(calc.profit() > 0.0);
        assert!(calc.new_probability().is_none());
    }

    #[test]
    fn horse_race_requires_oversum() {
        let a = MarketSnapshot::binary(0.40, Pool::new(600.0, 400.0));
        let b = MarketSnapshot::binary(0.60, Pool::new(400.0, 600.0));

        assert_eq!(
            calculate_arbitrage(&a, &b, CalculationMode::HorseRace),
            Err(ArbitrageError::InsufficientSpread {
                probability_a: 0.40,
                probability_b: 0.60,
            })
        );
    }

    #[test]
    fn non_binary_market_fails_before_any_curve_math() {
        let mut a = market_a();
        a.outcome_type = OutcomeType::MultipleChoice;
        let engine = ArbitrageEngine::with_curve(ArbitrageConfig::default(), CountingCurve::default());

        for mode in CalculationMode::ALL {
            let err = engine.calculate(&a, &market_b(), mode).unwrap_err();
            assert_eq!(
                err,
                ArbitrageError::NotBinaryMarket {
                    side: MarketSide::A,
                    reason: NotBinaryReason::WrongOutcomeType(OutcomeType::MultipleChoice),
                }
            );
            assert!(err.to_string().contains("must be BINARY"));
        }
        assert_eq!(engine.curve().calls(), 0);
    }

    #[test]
    fn missing_pool_on_b_is_reported_for_b() {
        let mut b = market_b();
        b.pool = None;

        let err = calculate_arbitrage(&market_a(), &b, CalculationMode::Classic).unwrap_err();
        assert_eq!(
            err,
            ArbitrageError::NotBinaryMarket {
                side: MarketSide::B,
                reason: NotBinaryReason::MissingPool,
            }
        );
    }

    #[test]
    fn degenerate_probability_is_rejected() {
        let a = MarketSnapshot::binary(0.0, Pool::new(700.0, 300.0));
        assert!(matches!(
            calculate_arbitrage(&a, &market_b(), CalculationMode::Equilibrium),
            Err(ArbitrageError::DegenerateMarket { side: MarketSide::A, .. })
        ));
    }

    #[test]
    fn classic_rejects_pool_whose_product_overflows() {
        let a = MarketSnapshot::binary(0.30, Pool::new(1e200, 1e200));

        let err = calculate_arbitrage(&a, &market_b(), CalculationMode::Classic).unwrap_err();
        assert_eq!(
            err,
            ArbitrageError::DegenerateMarket {
                side: MarketSide::A,
                reason: DegenerateReason::UnboundedProduct {
                    yes: 1e200,
                    no: 1e200,
                },
            }
        );
    }

    #[test]
    fn equilibrium_uses_configured_iteration_count() {
        let engine = ArbitrageEngine::with_curve(
            ArbitrageConfig {
                min_amount: 0.01,
                iterations: 10,
            },
            CountingCurve::default(),
        );
        engine
            .calculate(&market_a(), &market_b(), CalculationMode::Equilibrium)
            .unwrap();

        // Two curve calls per halving plus two for the final amounts.
        assert_eq!(engine.curve().calls(), 2 * 10 + 2);
    }
}
