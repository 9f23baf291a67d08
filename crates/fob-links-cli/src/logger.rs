//! Logging setup for the fob-links CLI.
//!
//! The library crate only emits `tracing` events; this module installs the
//! subscriber that prints them.
//!
//! - `--verbose` (or `debug: true` in settings): debug level for fob-links crates
//! - `--quiet`: errors only
//! - otherwise `RUST_LOG`, falling back to info level

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "fob_links=debug,fob_links_cli=debug";
const QUIET_FILTER: &str = "fob_links=error";
const DEFAULT_FILTER: &str = "fob_links=info,fob_links_cli=info";

/// Initialize the tracing subscriber. Call once, before anything logs.
///
/// `verbose` wins over `quiet`, which wins over `RUST_LOG`.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize the tracing subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_color())
        .compact();

    // Ignore a second initialization instead of panicking.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
