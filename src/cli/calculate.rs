//! Handler for the `calculate` command.

use serde_json::json;
use tracing::info;

use crate::cli::output;
use crate::cli::MarketArgs;
use crate::config::Config;
use crate::domain::{
    leg_outcomes, ArbitrageCalculation, ArbitrageEngine, CalculationMode, MarketSnapshot,
};
use crate::error::Result;

/// Execute `calculate`.
pub fn execute(args: &MarketArgs, config: &Config) -> Result<()> {
    let calculation = compute(args, config)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "calculate",
            "calculation": calculation,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    render(&calculation);
    Ok(())
}

/// Load both snapshots and run the engine with the configured thresholds.
pub(crate) fn compute(args: &MarketArgs, config: &Config) -> Result<ArbitrageCalculation> {
    let market_a = MarketSnapshot::load(&args.market_a)?;
    let market_b = MarketSnapshot::load(&args.market_b)?;
    let mode = args
        .mode
        .map_or(config.arbitrage.default_mode, CalculationMode::from);

    info!(
        market_a = market_a.label(),
        market_b = market_b.label(),
        mode = %mode,
        "calculating arbitrage"
    );

    let engine = ArbitrageEngine::new(config.arbitrage.engine.clone());
    Ok(engine.calculate(&market_a, &market_b, mode)?)
}

/// Print a calculation as labeled fields.
pub(crate) fn render(calculation: &ArbitrageCalculation) {
    let (outcome_a, outcome_b) = leg_outcomes(calculation.mode());

    output::section("Markets");
    output::field("A", describe(calculation.market_a()));
    output::field("B", describe(calculation.market_b()));

    output::section(&format!("Arbitrage ({})", calculation.mode()));
    match calculation.new_probability() {
        Some(target) => output::field("Target", percent(target)),
        None => {
            if let Some(target) = calculation.new_probability_a() {
                output::field("Target A", percent(target));
            }
            if let Some(target) = calculation.new_probability_b() {
                output::field("Target B", percent(target));
            }
        }
    }
    output::field(
        "Bet A",
        format!("{:.2} on {}", calculation.bet_amount_a(), outcome_a),
    );
    output::field(
        "Bet B",
        format!("{:.2} on {}", calculation.bet_amount_b(), outcome_b),
    );
    output::field("Total", format!("{:.2}", calculation.total_bet()));
    output::field(
        "Profit",
        output::signed(calculation.profit(), format!("{:.2}", calculation.profit())),
    );

    if calculation.mode() == CalculationMode::Classic && calculation.profit() <= 0.0 {
        output::warning("classic mode reports the trade even when it does not pay");
    }
}

fn describe(market: &MarketSnapshot) -> String {
    match market.probability {
        Some(p) => format!("{} @ {}", market.label(), percent(p)),
        None => market.label().to_string(),
    }
}

fn percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}
