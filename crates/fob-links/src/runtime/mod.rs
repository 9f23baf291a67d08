//! Filesystem runtime abstraction for fob-links
//!
//! Every filesystem touch made by the link engine goes through the `Runtime`
//! trait: reading configuration files, reading modification timestamps and
//! probing whether a candidate path is a file or a directory. Hosts (the CLI,
//! an editor bridge, tests) supply an implementation.

pub mod native;

// Test utilities (available in test builds)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub use native::NativeRuntime;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Other runtime error
    #[error("Runtime error: {0}")]
    Other(String),
}

/// File metadata
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// File size in bytes
    pub size: u64,
    /// Whether this is a directory
    pub is_dir: bool,
    /// Whether this is a file
    pub is_file: bool,
    /// Last modified timestamp (nanoseconds since epoch)
    pub modified: Option<u64>,
}

/// What a probe found at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Nothing exists there, or the probe failed
    Missing,
    /// A regular file
    File,
    /// A directory
    Directory,
    /// Something that exists but is neither a file nor a directory
    Other,
}

impl From<&FileMetadata> for PathKind {
    fn from(metadata: &FileMetadata) -> Self {
        if metadata.is_file {
            PathKind::File
        } else if metadata.is_dir {
            PathKind::Directory
        } else {
            PathKind::Other
        }
    }
}

/// Platform runtime trait
///
/// # Example
///
/// ```rust,ignore
/// use fob_links::runtime::{FileMetadata, Runtime, RuntimeResult};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct MyRuntime;
///
/// #[async_trait]
/// impl Runtime for MyRuntime {
///     async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
///         // Platform-specific implementation
///     }
///
///     // ... implement other methods
/// }
/// ```
#[async_trait]
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file from the filesystem
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Get file metadata
    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Classify a path. Errors collapse to [`PathKind::Missing`].
    async fn probe(&self, path: &Path) -> PathKind {
        match self.metadata(path).await {
            Ok(metadata) => PathKind::from(&metadata),
            Err(_) => PathKind::Missing,
        }
    }

    /// Check if a path is a regular file. Errors count as "no".
    async fn is_file(&self, path: &Path) -> bool {
        self.probe(path).await == PathKind::File
    }
}
