//! Error handling for the fob-links CLI.
//!
//! Command failures are `CliError`s built with `thiserror`; `main` turns them
//! into `miette` reports through [`cli_error_to_miette`]. Link resolution
//! itself never fails; errors come from the CLI's own file handling.

mod report;

pub use report::cli_error_to_miette;

use fob_links::RuntimeError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings file or environment could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A style sheet could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    /// A style sheet is not valid UTF-8
    #[error("{} is not valid UTF-8", .0.display())]
    InvalidUtf8(PathBuf),

    /// I/O errors from the terminal or signal handling
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File watching errors
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file passed to `--config` doesn't exist
    #[error("Config file not found: {}\n\nHint: Create a fob-links.json file or check the --config path", .0.display())]
    NotFound(PathBuf),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for attaching a path to runtime failures.
pub trait ResultExt<T> {
    /// Attach the path that was being read.
    fn with_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, RuntimeError> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| match source {
            RuntimeError::FileNotFound(_) => CliError::FileNotFound(path.as_ref().to_path_buf()),
            source => CliError::Read {
                path: path.as_ref().to_path_buf(),
                source,
            },
        })
    }
}
