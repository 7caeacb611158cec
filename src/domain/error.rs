//! Domain errors for market validation, arbitrage calculation and planning.
//!
//! Every failure the engine can report for ordinary business reasons (markets
//! that disagree the wrong way, no profitable trade, a non-binary market) is
//! a value of [`ArbitrageError`]. Its `Display` output is meant to be shown to
//! the end user as-is.
//!
//! # Examples
//!
//! ```
//! use manarb::domain::error::ArbitrageError;
//! use manarb::domain::{calculate_arbitrage, CalculationMode, MarketSnapshot, Pool};
//!
//! let a = MarketSnapshot::binary(0.70, Pool::new(300.0, 700.0));
//! let b = MarketSnapshot::binary(0.25, Pool::new(750.0, 250.0));
//!
//! let result = calculate_arbitrage(&a, &b, CalculationMode::Equilibrium);
//! assert!(matches!(result, Err(ArbitrageError::InvertedMarkets { .. })));
//! ```

use thiserror::Error;

use super::market::{MarketSide, OutcomeType};

/// Why a snapshot is not usable as a binary AMM market.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotBinaryReason {
    #[error("outcome type is {0}")]
    WrongOutcomeType(OutcomeType),

    #[error("probability is missing")]
    MissingProbability,

    #[error("pool is missing")]
    MissingPool,
}

/// Why a binary snapshot cannot be priced by the AMM math.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DegenerateReason {
    #[error("probability {0} is outside (0, 1)")]
    ProbabilityOutOfRange(f64),

    #[error("pool reserves must be positive, got YES {yes} / NO {no}")]
    NonPositivePool { yes: f64, no: f64 },

    #[error("pool constant product overflows, got YES {yes} / NO {no}")]
    UnboundedProduct { yes: f64, no: f64 },
}

/// Errors returned by the arbitrage engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArbitrageError {
    /// Either snapshot is not a BINARY market with a probability and pool.
    #[error("market {side} must be BINARY with a probability and pool: {reason}")]
    NotBinaryMarket {
        side: MarketSide,
        reason: NotBinaryReason,
    },

    /// The snapshot is binary but its numbers cannot describe an AMM state.
    #[error("market {side} cannot be priced: {reason}")]
    DegenerateMarket {
        side: MarketSide,
        reason: DegenerateReason,
    },

    /// Market A must be the cheaper YES for single-target modes.
    #[error(
        "market A probability ({probability_a:.4}) must be lower than market B probability ({probability_b:.4})"
    )]
    InvertedMarkets {
        probability_a: f64,
        probability_b: f64,
    },

    /// Horse race requires the two probabilities to over-sum.
    #[error(
        "probabilities must sum to more than 1 for a horse race, got {probability_a:.4} + {probability_b:.4}"
    )]
    InsufficientSpread {
        probability_a: f64,
        probability_b: f64,
    },

    /// The best trade found is too small to be worth placing.
    #[error(
        "no profitable arbitrage: bet A {bet_amount_a:.2}, bet B {bet_amount_b:.2}, profit {profit:.2}"
    )]
    NoProfitableOpportunity {
        bet_amount_a: f64,
        bet_amount_b: f64,
        profit: f64,
    },
}

/// Errors raised while turning a calculation into orders.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("scale must be between 0 and 100 percent, got {0}")]
    InvalidScale(f64),

    #[error("market {side} has no contract id")]
    MissingContractId { side: MarketSide },

    #[error("bet amount {0} cannot be represented as an order size")]
    UnrepresentableAmount(f64),

    #[error("nothing to execute at this scale")]
    EmptyPlan,
}

/// Errors raised while parsing a market slug.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    #[error("market identifier is empty")]
    Empty,

    #[error("url {url} has no market path")]
    NoPath { url: String },

    #[error("slug '{slug}' contains whitespace")]
    Whitespace { slug: String },
}

/// Errors raised while loading a market snapshot document.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}
