//! Nearest-configuration lookup.
//!
//! Walks from a directory towards the filesystem root looking for the first
//! directory that holds one of the configured configuration file names.
//! Every directory the walk passes through is memoized with the walk's final
//! answer, so sibling documents and anything below an already visited
//! directory resolve without touching the filesystem.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::runtime::{PathKind, Runtime};

/// Per-directory cache of the nearest configuration file.
///
/// `None` values are cached too: a directory with no configuration anywhere
/// above it is answered from the cache on the next lookup.
#[derive(Debug)]
pub struct ConfigLocator {
    file_names: Vec<String>,
    cache: RwLock<FxHashMap<PathBuf, Option<PathBuf>>>,
}

impl ConfigLocator {
    /// Create a locator probing `file_names` in order.
    pub fn new(file_names: Vec<String>) -> Self {
        Self {
            file_names,
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    /// Find the nearest configuration file at or above `directory`.
    ///
    /// The filesystem root itself is never probed. Probe failures count as
    /// "not there" and the walk continues upward.
    pub async fn locate(&self, directory: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
        let mut visited: Vec<PathBuf> = Vec::new();
        let mut current = directory;

        let found = loop {
            let cached = self.cache.read().get(current).cloned();
            if let Some(cached) = cached {
                tracing::trace!(dir = %current.display(), "config location cache hit");
                break cached;
            }

            visited.push(current.to_path_buf());

            let Some(parent) = current.parent() else {
                break None;
            };

            if let Some(config) = self.probe_directory(current, runtime).await {
                break Some(config);
            }

            current = parent;
        };

        if !visited.is_empty() {
            let mut cache = self.cache.write();
            for dir in visited {
                cache.insert(dir, found.clone());
            }
        }

        match &found {
            Some(path) => {
                tracing::debug!(dir = %directory.display(), config = %path.display(), "located config")
            }
            None => tracing::debug!(dir = %directory.display(), "no config above directory"),
        }

        found
    }

    async fn probe_directory(&self, dir: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
        for name in &self.file_names {
            let candidate = dir.join(name);
            if runtime.probe(&candidate).await != PathKind::Missing {
                return Some(candidate);
            }
        }
        None
    }

    /// Forget every cached answer for `dir` and the directories below it.
    ///
    /// Called when a configuration file appears in or disappears from `dir`:
    /// only lookups that started at or below `dir` can have seen it.
    pub fn invalidate_under(&self, dir: &Path) -> usize {
        let mut cache = self.cache.write();
        let before = cache.len();
        cache.retain(|key, _| !key.starts_with(dir));
        before - cache.len()
    }

    /// Drop all cached answers.
    pub fn clear(&self) {
        self.cache.write().clear();
    }

    /// Number of cached directories.
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}
