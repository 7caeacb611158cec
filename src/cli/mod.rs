//! Command-line interface.
//!
//! [`command`] holds the `clap` definitions; each subcommand has a handler
//! module that prints through [`output`].

pub mod calculate;
mod command;
pub mod config;
pub mod modes;
pub mod output;
pub mod plan;
pub mod slug;

pub use command::{
    Cli, ColorChoice, Commands, ConfigCommand, MarketArgs, ModeArg, ModesCommand, PlanArgs,
    SlugArgs,
};

use crate::config::{Config, LoggingConfig};
use crate::error::Result;

/// Apply the global output flags.
pub fn configure_output(cli: &Cli) {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));
    output::set_color(match cli.color {
        ColorChoice::Auto if cli.json => Some(false),
        ColorChoice::Auto => None,
        ColorChoice::Always => Some(true),
        ColorChoice::Never => Some(false),
    });
}

/// Dispatch a parsed command line.
///
/// Logging is initialized from the resolved configuration before any
/// handler runs. An unusable configuration falls back to default logging so
/// `config` subcommands can report the problem themselves.
pub fn run(cli: &Cli) -> Result<()> {
    let explicit = cli.config.as_deref();
    let resolved = Config::resolve(explicit);
    match &resolved {
        Ok(config) => config.logging.init(cli.verbose, cli.quiet),
        Err(_) => LoggingConfig::default().init(cli.verbose, cli.quiet),
    }

    match &cli.command {
        Commands::Calculate(args) => calculate::execute(args, &resolved?),
        Commands::Plan(args) => plan::execute(args, &resolved?),
        Commands::Modes(ModesCommand::List) => modes::list(),
        Commands::Modes(ModesCommand::Explain { name }) => modes::explain(name),
        Commands::Config(ConfigCommand::Show) => config::execute_show(explicit),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(explicit),
        Commands::Slug(args) => slug::execute(args),
    }
}
