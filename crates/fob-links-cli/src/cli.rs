//! Command-line interface definition for fob-links.
//!
//! - `fob-links scan <files...>` - print the links of each style sheet
//! - `fob-links watch <root>` - re-print links as files change

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// fob-links - alias-aware @use/@import links for Sass and CSS
#[derive(Parser, Debug)]
#[command(
    name = "fob-links",
    version,
    about = "Resolve @use/@import links in Sass and CSS files",
    long_about = "fob-links resolves the @use and @import specifiers of style sheets,\n\
                  expanding path aliases from the nearest tsconfig.json or jsconfig.json."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a fob-links.json settings file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the links of one or more style sheets
    Scan(ScanArgs),

    /// Watch a directory and print links whenever a style sheet changes
    Watch(WatchArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Style sheets to scan
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Print links as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Print cache statistics after scanning
    #[arg(long)]
    pub stats: bool,
}

#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    /// Directory to watch recursively
    #[arg(default_value = ".", value_name = "ROOT")]
    pub root: PathBuf,

    /// Debounce window for repeated events on the same file
    #[arg(long, default_value_t = 100, value_name = "MS")]
    pub debounce: u64,
}
