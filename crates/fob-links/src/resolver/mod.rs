//! Import specifier resolution.
//!
//! 1. The first alias (declaration order) that prefixes the specifier wins
//! 2. Aliased: each base directory is tried in order
//! 3. Not aliased: the specifier is resolved next to the document, with
//!    extension probing

mod extensions;

pub use extensions::{try_extensions, try_index_files};

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::aliases::{AliasMatch, AliasTable};
use crate::config::LinkerConfig;
use crate::runtime::{PathKind, Runtime};

/// Resolves `@use` / `@import` specifiers to files on disk.
#[derive(Debug, Clone)]
pub struct ImportResolver {
    style_extensions: Vec<String>,
    index_files: Vec<String>,
}

impl ImportResolver {
    /// Create a new resolver with the given configuration.
    pub fn new(config: &LinkerConfig) -> Self {
        Self {
            style_extensions: config.style_extensions.clone(),
            index_files: config.index_files.clone(),
        }
    }

    /// Resolve `specifier`, written in the document at `document_path`.
    ///
    /// Returns `None` when nothing on disk matches; filesystem errors along the
    /// way count as "not there".
    pub async fn resolve(
        &self,
        document_path: &Path,
        specifier: &str,
        aliases: &AliasTable,
        runtime: &dyn Runtime,
    ) -> Option<PathBuf> {
        let resolved = match aliases.find_match(specifier) {
            Some(matched) => self.resolve_alias(&matched, runtime).await,
            None => self.resolve_relative(document_path, specifier, runtime).await,
        };

        match &resolved {
            Some(path) => tracing::debug!(specifier, target = %path.display(), "resolved import"),
            None => tracing::debug!(specifier, from = %document_path.display(), "unresolved import"),
        }

        resolved
    }

    /// Resolve against the document's own directory, appending each style
    /// extension in turn.
    pub async fn resolve_relative(
        &self,
        document_path: &Path,
        specifier: &str,
        runtime: &dyn Runtime,
    ) -> Option<PathBuf> {
        let dir = document_path.parent()?;
        let base = dir.join(specifier).clean();
        try_extensions(&base, &self.style_extensions, runtime).await
    }

    /// Walk the alias's base directories in order.
    ///
    /// A base whose candidate does not exist is skipped. The first candidate
    /// that exists ends the walk: a file is returned, a directory yields its
    /// index file (or nothing), anything else yields nothing.
    pub async fn resolve_alias(
        &self,
        matched: &AliasMatch<'_>,
        runtime: &dyn Runtime,
    ) -> Option<PathBuf> {
        // Never absolute, or `join` would replace the base.
        let remainder = matched.remainder.trim_start_matches('/');

        for base in matched.bases {
            let candidate = if remainder.is_empty() {
                base.clone()
            } else {
                base.join(remainder).clean()
            };

            match runtime.probe(&candidate).await {
                PathKind::Missing => {
                    tracing::trace!(alias = matched.alias, candidate = %candidate.display(), "alias base miss");
                    continue;
                }
                PathKind::File => return Some(candidate),
                PathKind::Directory => {
                    return try_index_files(&candidate, &self.index_files, runtime).await;
                }
                PathKind::Other => return None,
            }
        }

        None
    }
}

impl Default for ImportResolver {
    fn default() -> Self {
        Self::new(&LinkerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::test_utils::CountingRuntime;
    use crate::runtime::{FileMetadata, RuntimeError, RuntimeResult};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::fs;
    use tempfile::TempDir;

    /// Reports `special` as neither file nor directory and every other path
    /// as missing, recording each metadata call.
    #[derive(Debug)]
    struct SpecialFileRuntime {
        special: PathBuf,
        queried: Mutex<Vec<PathBuf>>,
    }

    #[async_trait]
    impl Runtime for SpecialFileRuntime {
        async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
            Err(RuntimeError::FileNotFound(path.to_path_buf()))
        }

        async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
            self.queried.lock().push(path.to_path_buf());
            if path == self.special {
                Ok(FileMetadata {
                    size: 0,
                    is_dir: false,
                    is_file: false,
                    modified: None,
                })
            } else {
                Err(RuntimeError::FileNotFound(path.to_path_buf()))
            }
        }

        fn exists(&self, path: &Path) -> bool {
            path == self.special
        }
    }

    fn create_files(root: &Path, files: &[&str]) {
        for file in files {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
    }

    fn table(entries: &[(&str, Vec<PathBuf>)]) -> AliasTable {
        let mut table = AliasTable::new();
        for (alias, bases) in entries {
            table.insert(*alias, bases.clone());
        }
        table
    }

    #[tokio::test]
    async fn alias_directory_resolves_to_index() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        create_files(root, &["styles/button/index.scss", "src/app.scss"]);

        let aliases = table(&[("@styles", vec![root.join("styles")])]);
        let resolved = ImportResolver::default()
            .resolve(
                &root.join("src/app.scss"),
                "@styles/button",
                &aliases,
                &CountingRuntime::new(),
            )
            .await;

        assert_eq!(resolved, Some(root.join("styles/button/index.scss")));
    }

    #[tokio::test]
    async fn index_wins_over_main() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        create_files(root, &["styles/button/index.scss", "styles/button/main.scss"]);

        let aliases = table(&[("@styles", vec![root.join("styles")])]);
        let resolved = ImportResolver::default()
            .resolve(&root.join("app.scss"), "@styles/button", &aliases, &CountingRuntime::new())
            .await;

        assert_eq!(resolved, Some(root.join("styles/button/index.scss")));
    }

    #[tokio::test]
    async fn falls_back_to_main() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        create_files(root, &["styles/button/main.scss"]);

        let aliases = table(&[("@styles", vec![root.join("styles")])]);
        let resolved = ImportResolver::default()
            .resolve(&root.join("app.scss"), "@styles/button", &aliases, &CountingRuntime::new())
            .await;

        assert_eq!(resolved, Some(root.join("styles/button/main.scss")));
    }

    #[tokio::test]
    async fn alias_file_is_returned_directly() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        create_files(root, &["styles/_vars.scss"]);

        let aliases = table(&[("@styles", vec![root.join("styles")])]);
        let resolved = ImportResolver::default()
            .resolve(&root.join("app.scss"), "@styles/_vars.scss", &aliases, &CountingRuntime::new())
            .await;

        assert_eq!(resolved, Some(root.join("styles/_vars.scss")));
    }

    #[tokio::test]
    async fn multi_base_alias_skips_missing_base() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        create_files(root, &["b/colors.scss"]);
        fs::create_dir_all(root.join("a")).unwrap();

        let aliases = table(&[("@lib", vec![root.join("a"), root.join("b")])]);
        let runtime = CountingRuntime::new();
        let resolved = ImportResolver::default()
            .resolve(&root.join("app.scss"), "@lib/colors.scss", &aliases, &runtime)
            .await;

        assert_eq!(resolved, Some(root.join("b/colors.scss")));
        // a/colors.scss probed first, then b/colors.scss.
        assert_eq!(runtime.stats(), 2);
    }

    #[tokio::test]
    async fn empty_directory_is_terminal() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("a/button")).unwrap();
        create_files(root, &["b/button/index.scss"]);

        let aliases = table(&[("@lib", vec![root.join("a"), root.join("b")])]);
        let resolved = ImportResolver::default()
            .resolve(&root.join("app.scss"), "@lib/button", &aliases, &CountingRuntime::new())
            .await;

        assert_eq!(resolved, None);
    }

    #[tokio::test]
    async fn alias_does_not_probe_extensions() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        create_files(root, &["styles/button.scss"]);

        let aliases = table(&[("@styles", vec![root.join("styles")])]);
        let resolved = ImportResolver::default()
            .resolve(&root.join("app.scss"), "@styles/button", &aliases, &CountingRuntime::new())
            .await;

        assert_eq!(resolved, None);
    }

    #[tokio::test]
    async fn bare_alias_resolves_to_base_itself() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        create_files(root, &["theme/index.scss"]);

        let aliases = table(&[("@theme", vec![root.join("theme")])]);
        let resolved = ImportResolver::default()
            .resolve(&root.join("app.scss"), "@theme", &aliases, &CountingRuntime::new())
            .await;

        assert_eq!(resolved, Some(root.join("theme/index.scss")));
    }

    #[tokio::test]
    async fn relative_fallback_prefers_scss_over_css() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        create_files(root, &["src/foo.scss", "src/foo.css"]);

        let resolved = ImportResolver::default()
            .resolve(&root.join("src/app.scss"), "./foo", &AliasTable::new(), &CountingRuntime::new())
            .await;

        assert_eq!(resolved, Some(root.join("src/foo.scss")));
    }

    #[tokio::test]
    async fn relative_fallback_handles_parent_segments() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        create_files(root, &["shared/mixins.sass"]);

        let resolved = ImportResolver::default()
            .resolve(
                &root.join("src/app.scss"),
                "../shared/mixins",
                &AliasTable::new(),
                &CountingRuntime::new(),
            )
            .await;

        assert_eq!(resolved, Some(root.join("shared/mixins.sass")));
    }

    #[tokio::test]
    async fn unaliased_specifier_uses_relative_fallback() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        create_files(root, &["src/variables.css", "styles/x/index.scss"]);

        let aliases = table(&[("@styles", vec![root.join("styles")])]);
        let resolved = ImportResolver::default()
            .resolve(&root.join("src/app.scss"), "variables", &aliases, &CountingRuntime::new())
            .await;

        assert_eq!(resolved, Some(root.join("src/variables.css")));
    }

    #[tokio::test]
    async fn unresolvable_specifier_is_none() {
        let temp = TempDir::new().unwrap();
        let resolved = ImportResolver::default()
            .resolve(
                &temp.path().join("app.scss"),
                "./missing",
                &AliasTable::new(),
                &CountingRuntime::new(),
            )
            .await;

        assert_eq!(resolved, None);
    }

    #[tokio::test]
    async fn absolute_remainder_stays_inside_alias_base() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        create_files(root, &["styles/button.scss", "outside/button.scss"]);

        let aliases = table(&[("@styles", vec![root.join("styles")])]);
        let runtime = CountingRuntime::new();
        let resolver = ImportResolver::default();

        let escaping = format!("@styles/{}", root.join("outside/button.scss").display());
        let resolved = resolver
            .resolve(&root.join("app.scss"), &escaping, &aliases, &runtime)
            .await;
        assert_eq!(resolved, None);

        let resolved = resolver
            .resolve(&root.join("app.scss"), "@styles//button.scss", &aliases, &runtime)
            .await;
        assert_eq!(resolved, Some(root.join("styles/button.scss")));
    }

    #[tokio::test]
    async fn special_file_in_first_base_ends_the_walk() {
        let first = PathBuf::from("/proj/a");
        let second = PathBuf::from("/proj/b");
        let runtime = SpecialFileRuntime {
            special: first.join("fifo"),
            queried: Mutex::new(Vec::new()),
        };

        let aliases = table(&[("@styles", vec![first.clone(), second])]);
        let resolved = ImportResolver::default()
            .resolve(Path::new("/proj/app.scss"), "@styles/fifo", &aliases, &runtime)
            .await;

        assert_eq!(resolved, None);
        assert_eq!(*runtime.queried.lock(), [first.join("fifo")]);
    }
}
