//! Market snapshot types.
//!
//! - [`MarketSnapshot`] - A market as reported by the platform API
//! - [`Pool`] - The two-sided AMM liquidity reserves
//! - [`BinaryMarket`] - A snapshot validated for AMM pricing

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{DegenerateReason, NotBinaryReason, SnapshotError};
use super::id::ContractId;

/// Outcome type of a market, as the platform names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeType {
    Binary,
    MultipleChoice,
    FreeResponse,
    PseudoNumeric,
    Numeric,
    Stonk,
    Poll,
    BountiedQuestion,
    #[serde(other)]
    Unknown,
}

impl OutcomeType {
    /// Wire name of the outcome type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "BINARY",
            Self::MultipleChoice => "MULTIPLE_CHOICE",
            Self::FreeResponse => "FREE_RESPONSE",
            Self::PseudoNumeric => "PSEUDO_NUMERIC",
            Self::Numeric => "NUMERIC",
            Self::Stonk => "STONK",
            Self::Poll => "POLL",
            Self::BountiedQuestion => "BOUNTIED_QUESTION",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for OutcomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the two input markets a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MarketSide {
    A,
    B,
}

impl fmt::Display for MarketSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// AMM liquidity reserves.
///
/// The product `yes * no` is invariant across trades until liquidity is
/// added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    #[serde(rename = "YES")]
    pub yes: f64,
    #[serde(rename = "NO")]
    pub no: f64,
}

impl Pool {
    #[must_use]
    pub const fn new(yes: f64, no: f64) -> Self {
        Self { yes, no }
    }

    /// The constant product `k = YES * NO`.
    #[must_use]
    pub fn constant_product(&self) -> f64 {
        self.yes * self.no
    }

    /// Reserves consistent with invariant `k` at probability `p`.
    ///
    /// `p` must lie strictly inside (0, 1); the endpoints produce infinities.
    #[must_use]
    pub fn at_probability(k: f64, p: f64) -> Self {
        Self {
            yes: (k * (1.0 - p) / p).sqrt(),
            no: (k * p / (1.0 - p)).sqrt(),
        }
    }

    /// Probability of YES implied by the reserves alone.
    #[must_use]
    pub fn implied_probability(&self) -> f64 {
        self.no / (self.yes + self.no)
    }
}

/// A market as read from the platform, before any validation.
///
/// Fields other than the ones the engine needs are ignored on
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContractId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub outcome_type: OutcomeType,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub pool: Option<Pool>,
}

impl MarketSnapshot {
    /// Create an anonymous binary snapshot.
    #[must_use]
    pub const fn binary(probability: f64, pool: Pool) -> Self {
        Self {
            id: None,
            slug: None,
            question: None,
            outcome_type: OutcomeType::Binary,
            probability: Some(probability),
            pool: Some(pool),
        }
    }

    /// Attach the contract id used for order placement.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ContractId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Human-readable label: the question, the slug, the id, or a placeholder.
    #[must_use]
    pub fn label(&self) -> &str {
        self.question
            .as_deref()
            .or(self.slug.as_deref())
            .or(self.id.as_ref().map(ContractId::as_str))
            .unwrap_or("<unnamed market>")
    }

    /// Parse a snapshot from a platform JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Parse`] on malformed JSON or a missing
    /// `outcomeType`.
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

/// Rejection from [`BinaryMarket::try_from_snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub enum MarketRejection {
    NotBinary(NotBinaryReason),
    Degenerate(DegenerateReason),
}

/// A snapshot known to be binary with a usable probability and pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryMarket {
    probability: f64,
    pool: Pool,
}

impl BinaryMarket {
    /// Validate a snapshot for AMM pricing.
    ///
    /// # Domain Invariants
    ///
    /// - outcome type is `BINARY`
    /// - probability and pool are present
    /// - probability lies strictly inside (0, 1)
    /// - both reserves are positive and finite
    /// - their product is finite
    ///
    /// # Errors
    ///
    /// Returns [`MarketRejection`] naming the first violated invariant.
    pub fn try_from_snapshot(snapshot: &MarketSnapshot) -> Result<Self, MarketRejection> {
        if snapshot.outcome_type != OutcomeType::Binary {
            return Err(MarketRejection::NotBinary(
                NotBinaryReason::WrongOutcomeType(snapshot.outcome_type),
            ));
        }
        let probability = snapshot
            .probability
            .ok_or(MarketRejection::NotBinary(NotBinaryReason::MissingProbability))?;
        let pool = snapshot
            .pool
            .ok_or(MarketRejection::NotBinary(NotBinaryReason::MissingPool))?;

        Self::try_new(probability, pool).map_err(MarketRejection::Degenerate)
    }

    /// Validate raw numbers for AMM pricing.
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateReason`] if the probability is outside (0, 1),
    /// either reserve is not a positive finite number, or their product
    /// overflows.
    pub fn try_new(probability: f64, pool: Pool) -> Result<Self, DegenerateReason> {
        if !(probability > 0.0 && probability < 1.0) {
            return Err(DegenerateReason::ProbabilityOutOfRange(probability));
        }
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(pool.yes) || !positive(pool.no) {
            return Err(DegenerateReason::NonPositivePool {
                yes: pool.yes,
                no: pool.no,
            });
        }
        if !pool.constant_product().is_finite() {
            return Err(DegenerateReason::UnboundedProduct {
                yes: pool.yes,
                no: pool.no,
            });
        }
        Ok(Self { probability, pool })
    }

    #[must_use]
    pub const fn probability(&self) -> f64 {
        self.probability
    }

    #[must_use]
    pub const fn pool(&self) -> Pool {
        self.pool
    }

    /// The pool's constant product.
    #[must_use]
    pub fn k(&self) -> f64 {
        self.pool.constant_product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKET_JSON: &str = r#"{
        "id": "4aQ9jFzJ",
        "creatorUsername": "alice",
        "slug": "will-it-rain-tomorrow",
        "question": "Will it rain tomorrow?",
        "outcomeType": "BINARY",
        "mechanism": "cpmm-1",
        "probability": 0.3,
        "pool": { "YES": 700, "NO": 300 },
        "p": 0.5,
        "totalLiquidity": 458.26
    }"#;

    #[test]
    fn parses_platform_market_document() {
        let snapshot = MarketSnapshot::from_json_str(MARKET_JSON).unwrap();

        assert_eq!(snapshot.id, Some(ContractId::from("4aQ9jFzJ")));
        assert_eq!(snapshot.outcome_type, OutcomeType::Binary);
        assert_eq!(snapshot.probability, Some(0.3));
        assert_eq!(snapshot.pool, Some(Pool::new(700.0, 300.0)));
        assert_eq!(snapshot.label(), "Will it rain tomorrow?");
    }

    #[test]
    fn unknown_outcome_type_is_preserved_as_unknown() {
        let snapshot =
            MarketSnapshot::from_json_str(r#"{"outcomeType": "QUADRATIC_FUNDING"}"#).unwrap();
        assert_eq!(snapshot.outcome_type, OutcomeType::Unknown);
        assert!(snapshot.pool.is_none());
    }

    #[test]
    fn multiple_choice_parses_without_probability() {
        let snapshot = MarketSnapshot::from_json_str(
            r#"{"outcomeType": "MULTIPLE_CHOICE", "answers": []}"#,
        )
        .unwrap();
        assert_eq!(snapshot.outcome_type, OutcomeType::MultipleChoice);
        assert!(snapshot.probability.is_none());
    }

    #[test]
    fn missing_outcome_type_is_a_parse_error() {
        assert!(matches!(
            MarketSnapshot::from_json_str(r#"{"probability": 0.5}"#),
            Err(SnapshotError::Parse(_))
        ));
    }

    #[test]
    fn pool_implied_probability_matches_reserves() {
        let pool = Pool::new(700.0, 300.0);
        assert!((pool.implied_probability() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn at_probability_preserves_constant_product() {
        let k = 700.0 * 300.0;
        for p in [0.01, 0.2, 0.5, 0.77, 0.99] {
            let pool = Pool::at_probability(k, p);
            assert!(((pool.constant_product() - k) / k).abs() < 1e-9);
            assert!((pool.implied_probability() - p).abs() < 1e-9);
        }
    }

    #[test]
    fn binary_market_rejects_wrong_outcome_type() {
        let mut snapshot = MarketSnapshot::binary(0.5, Pool::new(100.0, 100.0));
        snapshot.outcome_type = OutcomeType::MultipleChoice;

        assert_eq!(
            BinaryMarket::try_from_snapshot(&snapshot),
            Err(MarketRejection::NotBinary(NotBinaryReason::WrongOutcomeType(
                OutcomeType::MultipleChoice
            )))
        );
    }

    #[test]
    fn binary_market_rejects_missing_fields() {
        let mut snapshot = MarketSnapshot::binary(0.5, Pool::new(100.0, 100.0));
        snapshot.pool = None;
        assert_eq!(
            BinaryMarket::try_from_snapshot(&snapshot),
            Err(MarketRejection::NotBinary(NotBinaryReason::MissingPool))
        );

        snapshot.probability = None;
        assert_eq!(
            BinaryMarket::try_from_snapshot(&snapshot),
            Err(MarketRejection::NotBinary(NotBinaryReason::MissingProbability))
        );
    }

    #[test]
    fn binary_market_rejects_degenerate_numbers() {
        assert!(matches!(
            BinaryMarket::try_new(1.0, Pool::new(1.0, 1.0)),
            Err(DegenerateReason::ProbabilityOutOfRange(_))
        ));
        assert!(matches!(
            BinaryMarket::try_new(f64::NAN, Pool::new(1.0, 1.0)),
            Err(DegenerateReason::ProbabilityOutOfRange(_))
        ));
        assert!(matches!(
            BinaryMarket::try_new(0.5, Pool::new(0.0, 1.0)),
            Err(DegenerateReason::NonPositivePool { .. })
        ));
        assert!(matches!(
            BinaryMarket::try_new(0.3, Pool::new(1e200, 1e200)),
            Err(DegenerateReason::UnboundedProduct { .. })
        ));
    }

    #[test]
    fn binary_market_exposes_constant_product() {
        let market = BinaryMarket::try_new(0.6, Pool::new(600.0, 400.0)).unwrap();
        assert_eq!(market.k(), 240_000.0);
        assert_eq!(market.probability(), 0.6);
    }
}
