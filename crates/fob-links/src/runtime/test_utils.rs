//! Test utilities for fob-links.
//!
//! - `CountingRuntime`: the native runtime with per-operation call counters,
//!   so tests can assert that a cached lookup never reached the filesystem.
//!
//! Tests run against a real temporary directory (`tempfile::TempDir`) rather
//! than a mocked filesystem.

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{FileMetadata, NativeRuntime, Runtime, RuntimeResult};

/// Native runtime that records how often each operation was called.
///
/// ```rust,ignore
/// let runtime = CountingRuntime::new();
/// runtime.read_file(&path).await?;
/// assert_eq!(runtime.reads(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CountingRuntime {
    inner: NativeRuntime,
    reads: AtomicUsize,
    stats: AtomicUsize,
    exists: AtomicUsize,
}

impl CountingRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `read_file` calls.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `metadata` calls (probes included).
    pub fn stats(&self) -> usize {
        self.stats.load(Ordering::SeqCst)
    }

    /// Number of `exists` calls.
    pub fn exists_calls(&self) -> usize {
        self.exists.load(Ordering::SeqCst)
    }

    /// Every filesystem touch, whatever the kind.
    pub fn total(&self) -> usize {
        self.reads() + self.stats() + self.exists_calls()
    }

    pub fn reset(&self) {
        self.reads.store(0, Ordering::SeqCst);
        self.stats.store(0, Ordering::SeqCst);
        self.exists.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl Runtime for CountingRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_file(path).await
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        self.stats.fetch_add(1, Ordering::SeqCst);
        self.inner.metadata(path).await
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists.fetch_add(1, Ordering::SeqCst);
        self.inner.exists(path)
    }
}
