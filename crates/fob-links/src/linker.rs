//! Link extraction for whole documents.
//!
//! `StyleLinker` owns every cache (config locations, alias tables, document
//! links) and wires the locator, alias builder and resolver together:
//!
//! ```text
//! Document ──▶ ConfigLocator ──▶ AliasTableBuilder ──▶ ImportResolver ──▶ Runtime
//!    │                                                        │
//!    └──────────────────── DocumentLinkCache ◀────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::aliases::{AliasTable, AliasTableBuilder};
use crate::cache::{CacheStats, DocumentLinkCache, Links};
use crate::config::LinkerConfig;
use crate::links::{Document, DocumentLink, scan_imports};
use crate::locator::ConfigLocator;
use crate::resolver::ImportResolver;
use crate::runtime::Runtime;

/// File change event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    /// File was modified
    Modified(PathBuf),
    /// File was created
    Created(PathBuf),
    /// File was removed
    Removed(PathBuf),
}

impl FileChange {
    /// Get the path affected by this change.
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }
}

/// Produces document links for style sheets, caching every step.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use fob_links::{Document, NativeRuntime, StyleLinker};
///
/// # async fn example() {
/// let linker = StyleLinker::new(Arc::new(NativeRuntime));
/// let document = Document::new("/proj/src/app.scss", "@use \"@styles/button\";");
///
/// for link in linker.extract_links(&document).await.iter() {
///     println!("{:?} -> {}", link.range, link.target.display());
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct StyleLinker {
    runtime: Arc<dyn Runtime>,
    config: LinkerConfig,
    locator: ConfigLocator,
    aliases: AliasTableBuilder,
    resolver: ImportResolver,
    documents: DocumentLinkCache,
}

impl StyleLinker {
    /// Create a linker with the default configuration.
    pub fn new(runtime: Arc<dyn Runtime>) -> Self {
        Self::with_config(runtime, LinkerConfig::default())
    }

    pub fn with_config(runtime: Arc<dyn Runtime>, config: LinkerConfig) -> Self {
        Self {
            locator: ConfigLocator::new(config.config_file_names.clone()),
            aliases: AliasTableBuilder::new(),
            resolver: ImportResolver::new(&config),
            documents: DocumentLinkCache::new(),
            runtime,
            config,
        }
    }

    /// Links for every resolvable `@use` / `@import` in `document`, in
    /// textual order.
    ///
    /// Never fails: an unresolvable specifier, a missing or broken
    /// configuration file, or a filesystem error only means fewer links.
    /// The result is cached until [`document_changed`](Self::document_changed).
    pub async fn extract_links(&self, document: &Document) -> Links {
        if let Some(links) = self.documents.get(document.path()) {
            tracing::trace!(document = %document.path().display(), "document link cache hit");
            return links;
        }

        let generation = self.documents.begin(document.path());
        let links: Links = self.scan(document).await.into();
        self.documents
            .store(document.path(), generation, Arc::clone(&links));
        links
    }

    async fn scan(&self, document: &Document) -> Vec<DocumentLink> {
        let runtime = self.runtime.as_ref();

        let Some(dir) = document.directory() else {
            return Vec::new();
        };
        let Some(config_path) = self.locator.locate(dir, runtime).await else {
            return Vec::new();
        };

        let aliases = match self.aliases.build(&config_path, runtime).await {
            Ok(table) => table,
            Err(e) if e.is_not_found() => {
                tracing::debug!(config = %config_path.display(), "config vanished before it could be read");
                Arc::new(AliasTable::new())
            }
            Err(e) => {
                tracing::warn!("{}; continuing without aliases", e);
                Arc::new(AliasTable::new())
            }
        };

        let mut links = Vec::new();
        for import in scan_imports(&document.text) {
            if let Some(target) = self
                .resolver
                .resolve(document.path(), &import.specifier, &aliases, runtime)
                .await
            {
                links.push(DocumentLink {
                    range: import.range,
                    target,
                });
            }
        }

        tracing::debug!(
            document = %document.path().display(),
            links = links.len(),
            "scanned document"
        );
        links
    }

    /// The document was edited; its next request re-scans.
    pub fn document_changed(&self, path: &Path) {
        self.documents.invalidate(path);
    }

    /// The document was closed; drop everything cached for it.
    pub fn document_closed(&self, path: &Path) {
        self.documents.remove(path);
    }

    /// React to a filesystem event.
    ///
    /// - configuration file created or removed: forget config locations at and
    ///   below its directory (and the alias table, when removed)
    /// - configuration file modified: nothing, alias tables re-parse on the
    ///   next timestamp check
    /// - style document: invalidate its links
    ///
    /// Document links of other documents are left alone.
    pub fn file_changed(&self, change: &FileChange) {
        let path = change.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return;
        };

        if self.config.is_config_file_name(name) {
            if matches!(change, FileChange::Modified(_)) {
                return;
            }
            if let Some(dir) = path.parent() {
                let forgotten = self.locator.invalidate_under(dir);
                tracing::debug!(
                    config = %path.display(),
                    forgotten,
                    "config file appeared or disappeared"
                );
            }
            if matches!(change, FileChange::Removed(_)) {
                self.aliases.remove(path);
            }
            return;
        }

        if self.is_style_document(path) {
            self.documents.invalidate(path);
        }
    }

    /// Whether links for `path` are cached and current.
    pub fn is_cached(&self, path: &Path) -> bool {
        self.documents.contains(path)
    }

    /// Whether `path` has one of the configured style extensions.
    pub fn is_style_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.config.is_style_extension(ext))
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            config_parses: self.aliases.parse_count(),
            ..self.documents.stats()
        }
    }

    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    pub fn runtime(&self) -> &Arc<dyn Runtime> {
        &self.runtime
    }

    pub fn locator(&self) -> &ConfigLocator {
        &self.locator
    }

    pub fn alias_tables(&self) -> &AliasTableBuilder {
        &self.aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::test_utils::CountingRuntime;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn file_change_path() {
        let path = PathBuf::from("/project/src/app.scss");

        let change = FileChange::Modified(path.clone());
        assert_eq!(change.path(), path.as_path());

        let change = FileChange::Created(path.clone());
        assert_eq!(change.path(), path.as_path());

        let change = FileChange::Removed(path.clone());
        assert_eq!(change.path(), path.as_path());
    }

    #[test]
    fn style_documents_follow_configured_extensions() {
        let linker = StyleLinker::new(Arc::new(CountingRuntime::new()));
        assert!(linker.is_style_document(Path::new("/p/a.scss")));
        assert!(linker.is_style_document(Path::new("/p/a.SASS")));
        assert!(!linker.is_style_document(Path::new("/p/a.ts")));
        assert!(!linker.is_style_document(Path::new("/p/Makefile")));
    }

    #[tokio::test]
    async fn document_without_config_has_no_links_and_is_cached() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("foo.scss"), "").unwrap();
        let runtime = Arc::new(CountingRuntime::new());
        let linker = StyleLinker::new(runtime.clone());
        let document = Document::new(temp.path().join("app.scss"), "@use './foo';");

        assert!(linker.extract_links(&document).await.is_empty());

        runtime.reset();
        assert!(linker.extract_links(&document).await.is_empty());
        assert_eq!(runtime.total(), 0);
        assert!(linker.is_cached(document.path()));
    }

    #[tokio::test]
    async fn malformed_config_degrades_to_relative_resolution() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("tsconfig.json"), "{ not json").unwrap();
        fs::write(root.join("foo.scss"), "").unwrap();

        let linker = StyleLinker::new(Arc::new(CountingRuntime::new()));
        let document = Document::new(root.join("app.scss"), "@use '@x/y';\n@use './foo';");

        let links = linker.extract_links(&document).await;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, root.join("foo.scss"));
    }

    #[tokio::test]
    async fn stats_include_config_parses() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("tsconfig.json"), "{}").unwrap();

        let linker = StyleLinker::new(Arc::new(CountingRuntime::new()));
        let document = Document::new(root.join("app.scss"), "");
        linker.extract_links(&document).await;
        linker.extract_links(&document).await;

        let stats = linker.stats();
        assert_eq!(stats.config_parses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }
}
