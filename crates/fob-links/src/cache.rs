//! Per-document link cache and cache statistics.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::links::DocumentLink;

/// Shared, immutable list of links for one document.
pub type Links = Arc<[DocumentLink]>;

#[derive(Debug, Default)]
struct DocumentEntry {
    /// Bumped on every invalidation
    generation: u64,
    links: Option<Links>,
}

/// Links per document path, invalidated when the document is edited.
///
/// Each document carries a generation counter. A scan records the generation
/// it started at and [`store`](Self::store) refuses to publish its result if
/// the document was invalidated in the meantime.
#[derive(Debug, Default)]
pub struct DocumentLinkCache {
    entries: RwLock<FxHashMap<PathBuf, DocumentEntry>>,
    stats: RwLock<CacheStats>,
}

/// Token handed out by [`DocumentLinkCache::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

impl DocumentLinkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached links for `path`, counting the lookup as a hit or a miss.
    pub fn get(&self, path: &Path) -> Option<Links> {
        let links = self
            .entries
            .read()
            .get(path)
            .and_then(|entry| entry.links.clone());

        let mut stats = self.stats.write();
        if links.is_some() {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }
        links
    }

    /// Start a scan of `path`.
    pub fn begin(&self, path: &Path) -> Generation {
        let generation = self
            .entries
            .read()
            .get(path)
            .map_or(0, |entry| entry.generation);
        Generation(generation)
    }

    /// Publish the result of a scan started at `generation`.
    ///
    /// Returns `false` (and drops `links`) when the document was invalidated
    /// after the scan began.
    pub fn store(&self, path: &Path, generation: Generation, links: Links) -> bool {
        let mut entries = self.entries.write();
        let entry = entries.entry(path.to_path_buf()).or_default();
        if entry.generation != generation.0 {
            tracing::debug!(document = %path.display(), "discarding stale scan");
            return false;
        }
        entry.links = Some(links);
        true
    }

    /// Drop the cached links for `path`; the next request re-scans.
    pub fn invalidate(&self, path: &Path) {
        let mut entries = self.entries.write();
        let entry = entries.entry(path.to_path_buf()).or_default();
        entry.generation += 1;
        entry.links = None;
        self.stats.write().invalidations += 1;
    }

    /// Forget the links of `path`, e.g. when its editor tab closes.
    ///
    /// The generation counter survives so a scan still in flight cannot
    /// publish into the closed document.
    pub fn remove(&self, path: &Path) {
        let mut entries = self.entries.write();
        let entry = entries.entry(path.to_path_buf()).or_default();
        entry.generation += 1;
        entry.links = None;
    }

    /// Whether links are currently cached for `path`.
    pub fn contains(&self, path: &Path) -> bool {
        self.entries
            .read()
            .get(path)
            .is_some_and(|entry| entry.links.is_some())
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.read().clone()
    }
}

/// Counters describing how well the caches are doing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
    /// Configuration files actually parsed (cache misses of the alias builder)
    pub config_parses: u64,
}

impl CacheStats {
    pub fn total_requests(&self) -> u64 {
        self.hits + self.misses
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cache Analysis:")?;
        writeln!(f, "  Hit rate: {:.1}%", self.hit_rate() * 100.0)?;
        writeln!(f, "  Hits: {}", self.hits)?;
        writeln!(f, "  Misses: {}", self.misses)?;
        writeln!(f, "  Invalidations: {}", self.invalidations)?;
        write!(f, "  Config parses: {}", self.config_parses)
    }
}
