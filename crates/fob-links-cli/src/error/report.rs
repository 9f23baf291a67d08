//! Miette diagnostic conversion for CLI errors.

use crate::error::{CliError, ConfigError};
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::FileNotFound(path) => miette::miette!(
            "File not found: {}\n\nHint: Paths are resolved against the working directory",
            path.display()
        ),
        CliError::InvalidUtf8(path) => miette::miette!(
            "{} is not valid UTF-8\n\nHint: Style sheets must be UTF-8 encoded",
            path.display()
        ),
        CliError::Watch(e) => miette::miette!(
            "File watcher error: {}\n\nHint: Check that the directory exists and the watch limit is not exhausted",
            e
        ),
        _ => miette::miette!("{}", err),
    }
}

/// Convert ConfigError to miette Report
pub fn config_error_to_miette(err: ConfigError) -> Report {
    miette::miette!("Configuration error: {}", err)
}
