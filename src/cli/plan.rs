//! Handler for the `plan` command.
//!
//! Prints the orders an execution layer would submit. Nothing is sent.

use serde_json::json;
use tabled::{Table, Tabled};
use tracing::info;

use crate::cli::calculate;
use crate::cli::output;
use crate::cli::PlanArgs;
use crate::config::Config;
use crate::domain::{ExecutionPlan, OrderRequest, ScaleFactor};
use crate::error::Result;

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "Market")]
    side: String,
    #[tabled(rename = "Contract")]
    contract: String,
    #[tabled(rename = "Buy")]
    outcome: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl From<&OrderRequest> for OrderRow {
    fn from(order: &OrderRequest) -> Self {
        Self {
            side: order.side.to_string(),
            contract: order.contract_id.to_string(),
            outcome: order.outcome.to_string(),
            amount: order.amount.to_string(),
        }
    }
}

/// Execute `plan`.
pub fn execute(args: &PlanArgs, config: &Config) -> Result<()> {
    let scale = ScaleFactor::new(args.scale)?;
    let calculation = calculate::compute(&args.markets, config)?;
    let plan = ExecutionPlan::build(&calculation, scale)?;

    info!(
        mode = %plan.mode(),
        scale = scale.percent(),
        orders = plan.orders().len(),
        total = %plan.total_amount(),
        "execution plan built"
    );

    if output::is_json() {
        output::json_output(json!({
            "command": "plan",
            "calculation": calculation,
            "plan": plan,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    calculate::render(&calculation);

    output::section(&format!("Orders at {}%", scale.percent()));
    let rows: Vec<OrderRow> = plan.orders().iter().map(OrderRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    output::field("Total", plan.total_amount());
    output::field(
        "Est. profit",
        output::signed(
            calculation.profit() * scale.fraction(),
            plan.expected_profit(),
        ),
    );
    output::note("dry run: no orders were sent");

    Ok(())
}
