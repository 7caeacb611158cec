//! Command-line interface definitions.
//!
//! Defines the CLI structure for the manarb application using `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::CalculationMode;

/// Arbitrage calculator for constant-product binary prediction markets
#[derive(Parser, Debug)]
#[command(name = "manarb")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file [default: ~/.manarb/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Calculation mode as accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Midpoint target, reported even at a loss
    Classic,
    /// Target where both resolutions pay the same
    Equilibrium,
    /// Midpoint target, rejected when unprofitable
    Average,
    /// NO on both markets when probabilities over-sum
    #[value(alias = "horseRace", alias = "horse_race")]
    HorseRace,
}

impl From<ModeArg> for CalculationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Classic => Self::Classic,
            ModeArg::Equilibrium => Self::Equilibrium,
            ModeArg::Average => Self::Average,
            ModeArg::HorseRace => Self::HorseRace,
        }
    }
}

/// Top-level subcommands for the manarb CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute bet sizes and guaranteed profit for two markets
    Calculate(MarketArgs),

    /// Compute arbitrage and print the orders that would realize it
    Plan(PlanArgs),

    /// Explore calculation modes
    #[command(subcommand)]
    Modes(ModesCommand),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Extract the market slug from a URL or slug
    Slug(SlugArgs),
}

/// Subcommands for `manarb modes`.
#[derive(Subcommand, Debug)]
pub enum ModesCommand {
    /// List all calculation modes.
    List,
    /// Explain one calculation mode.
    Explain {
        /// Mode name (e.g., "equilibrium", "horse-race").
        name: String,
    },
}

/// Subcommands for `manarb config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file.
    Validate,
}

/// The two market snapshots and the calculation mode.
#[derive(Parser, Debug)]
pub struct MarketArgs {
    /// JSON snapshot of market A (the cheaper YES)
    #[arg(short = 'a', long)]
    pub market_a: PathBuf,

    /// JSON snapshot of market B
    #[arg(short = 'b', long)]
    pub market_b: PathBuf,

    /// Calculation mode [default: from config]
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,
}

/// Arguments for the `plan` subcommand.
#[derive(Parser, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub markets: MarketArgs,

    /// Percentage of the calculated bets to place (0-100)
    #[arg(short, long, default_value_t = 100.0)]
    pub scale: f64,
}

/// Arguments for the `slug` subcommand.
#[derive(Parser, Debug)]
pub struct SlugArgs {
    /// Market URL or bare slug
    pub input: String,
}
