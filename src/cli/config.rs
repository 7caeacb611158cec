//! Handler for the `config` command group.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cli::output;
use crate::config::{self, Config};
use crate::error::Result;

fn source(explicit: Option<&Path>) -> (PathBuf, bool) {
    match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => {
            let path = config::default_path();
            let exists = path.exists();
            (path, exists)
        }
    }
}

/// Execute `config show`.
pub fn execute_show(explicit: Option<&Path>) -> Result<()> {
    let config = Config::resolve(explicit)?;
    let (path, from_file) = source(explicit);

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "from_file": from_file,
            "config": config,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    if from_file {
        output::field("File", path.display());
    } else {
        output::field("File", "(defaults)");
    }

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::section("Arbitrage");
    output::field("Default mode", config.arbitrage.default_mode);
    output::field("Min amount", config.arbitrage.engine.min_amount);
    output::field("Iterations", config.arbitrage.engine.iterations);

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(explicit: Option<&Path>) -> Result<()> {
    let (path, from_file) = source(explicit);
    Config::resolve(explicit)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "from_file": from_file,
            "valid": true,
        }));
        return Ok(());
    }

    if from_file {
        output::success(&format!("{} is valid", path.display()));
    } else {
        output::success("no config file found, built-in defaults are valid");
        output::hint(&format!("create {} to override them", path.display()));
    }
    Ok(())
}
