//! Handler for the `slug` command.

use serde_json::json;

use crate::cli::output;
use crate::cli::SlugArgs;
use crate::domain::MarketSlug;
use crate::error::Result;

/// Execute `slug`.
pub fn execute(args: &SlugArgs) -> Result<()> {
    let slug = MarketSlug::parse(&args.input)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "slug",
            "input": args.input,
            "slug": slug,
        }));
        return Ok(());
    }

    println!("{slug}");
    Ok(())
}
