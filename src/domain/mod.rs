//! Exchange-agnostic domain logic.

pub mod amm;
pub mod arbitrage;
pub mod error;
pub mod execution;
pub mod id;
pub mod market;

// Core domain types
pub use id::{ContractId, MarketSlug};
pub use market::{BinaryMarket, MarketSide, MarketSnapshot, OutcomeType, Pool};

// AMM primitives
pub use amm::{no_trade_info, yes_trade_info, BondingCurve, ConstantProduct, TradeInfo};

// Engine
pub use arbitrage::{
    calculate_arbitrage, ArbitrageCalculation, ArbitrageConfig, ArbitrageEngine,
    CalculationMode, ParseModeError,
};

// Execution planning
pub use execution::{leg_outcomes, ExecutionPlan, OrderRequest, Outcome, ScaleFactor};
