//! Error types for link resolution.
//!
//! None of these escape [`StyleLinker::extract_links`](crate::StyleLinker::extract_links):
//! the linker absorbs every failure and produces no link for the affected
//! specifier. They surface from the lower-level components so callers that
//! use those directly can tell a broken configuration from a missing one.

use std::path::PathBuf;

use thiserror::Error;

use crate::runtime::RuntimeError;

pub type Result<T> = std::result::Result<T, LinkError>;

#[derive(Debug, Error)]
pub enum LinkError {
    /// Filesystem access failed (missing file, permissions, I/O)
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// The configuration file is not valid JSON
    #[error("malformed config {}: {source}", path.display())]
    MalformedConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration file is not UTF-8
    #[error("config is not valid UTF-8: {}", .0.display())]
    InvalidUtf8(PathBuf),
}

impl LinkError {
    /// Whether this error means "nothing there" rather than "something broken".
    pub fn is_not_found(&self) -> bool {
        matches!(self, LinkError::Runtime(RuntimeError::FileNotFound(_)))
    }
}
