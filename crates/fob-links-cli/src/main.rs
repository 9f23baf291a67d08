//! fob-links CLI entry point.
//!
//! Parses arguments, loads settings, initializes logging and dispatches the
//! subcommand.

use clap::Parser;
use fob_links_cli::{cli, commands, config::LinksConfig, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let config = LinksConfig::load(args.config.as_deref()).map_err(error::cli_error_to_miette)?;

    logger::init_logger(args.verbose || config.debug, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Scan(scan_args) => commands::scan_execute(scan_args, config).await,
        cli::Command::Watch(watch_args) => commands::watch_execute(watch_args, config).await,
    };

    result.map_err(error::cli_error_to_miette)
}
