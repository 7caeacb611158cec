//! Calculation mode listing and explanation.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::domain::CalculationMode;
use crate::error::Result;

#[derive(Tabled)]
struct ModeRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Buys")]
    buys: &'static str,
    #[tabled(rename = "Requires")]
    requires: &'static str,
}

const fn buys(mode: CalculationMode) -> &'static str {
    match mode {
        CalculationMode::HorseRace => "NO on A, NO on B",
        CalculationMode::Classic | CalculationMode::Equilibrium | CalculationMode::Average => {
            "YES on A, NO on B"
        }
    }
}

const fn requires(mode: CalculationMode) -> &'static str {
    match mode {
        CalculationMode::HorseRace => "pA + pB > 1",
        CalculationMode::Classic | CalculationMode::Equilibrium | CalculationMode::Average => {
            "pA < pB"
        }
    }
}

const fn target_rule(mode: CalculationMode) -> &'static str {
    match mode {
        CalculationMode::Classic | CalculationMode::Average => {
            "Both markets are moved to (pA + pB) / 2."
        }
        CalculationMode::Equilibrium => {
            "Both markets are moved to one probability, found by bisection on (pA, pB), \
             at which the position pays the same whichever way it resolves."
        }
        CalculationMode::HorseRace => {
            "A is moved down to t and B down to 1 - t, with t found by bisection so the \
             position pays the same whichever market wins."
        }
    }
}

const fn threshold_rule(mode: CalculationMode) -> &'static str {
    match mode {
        CalculationMode::Classic => "Never rejected: the result is reported even at a loss.",
        CalculationMode::Equilibrium | CalculationMode::Average | CalculationMode::HorseRace => {
            "Rejected unless both bets and the profit exceed min_amount."
        }
    }
}

/// List available calculation modes.
pub fn list() -> Result<()> {
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    if output::is_json() {
        let modes: Vec<_> = CalculationMode::ALL
            .iter()
            .map(|mode| {
                json!({
                    "name": mode.as_str(),
                    "buys": buys(*mode),
                    "requires": requires(*mode),
                    "summary": mode.description(),
                })
            })
            .collect();
        output::json_output(json!({
            "command": "modes.list",
            "modes": modes,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Calculation modes");

    let rows: Vec<ModeRow> = CalculationMode::ALL
        .iter()
        .map(|mode| ModeRow {
            name: mode.as_str(),
            buys: buys(*mode),
            requires: requires(*mode),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());

    output::hint(&format!(
        "run {} for details",
        output::highlight("manarb modes explain <name>")
    ));

    Ok(())
}

/// Explain a specific calculation mode.
pub fn explain(name: &str) -> Result<()> {
    let mode: CalculationMode = name.parse()?;

    if output::is_json() {
        output::json_output(json!({
            "command": "modes.explain",
            "mode": mode.as_str(),
            "summary": mode.description(),
            "buys": buys(mode),
            "requires": requires(mode),
            "target": target_rule(mode),
            "threshold": threshold_rule(mode),
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section(mode.as_str());
    output::note(mode.description());
    output::field("Buys", buys(mode));
    output::field("Requires", requires(mode));
    output::field("Target", target_rule(mode));
    output::field("Threshold", threshold_rule(mode));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explain_rejects_unknown_mode() {
        assert!(explain("median").is_err());
    }

    #[test]
    fn only_classic_skips_threshold() {
        for mode in CalculationMode::ALL {
            let skips = threshold_rule(mode).starts_with("Never");
            assert_eq!(skips, mode == CalculationMode::Classic);
        }
    }
}
