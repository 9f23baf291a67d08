//! `fob-links watch` - keep printing links while a project changes.
//!
//! 1. Start the file watcher on the root
//! 2. Scan every style sheet under the root and print its links
//! 3. Forward each file event to the linker and re-print links of style
//!    sheets that were created or modified
//! 4. Stop on Ctrl+C

use crate::cli::WatchArgs;
use crate::commands::{link_records, read_document};
use crate::config::LinksConfig;
use crate::error::{CliError, Result};
use crate::ui;
use crate::watcher::{DEFAULT_IGNORE_PATTERNS, FileWatcher, should_ignore};
use fob_links::{FileChange, NativeRuntime, Runtime, StyleLinker};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::signal;
use walkdir::WalkDir;

/// Execute the watch command.
///
/// # Errors
///
/// Fails when the root doesn't exist or the watcher cannot be started.
/// Style sheets that cannot be read are reported and skipped.
pub async fn execute(args: WatchArgs, config: LinksConfig) -> Result<()> {
    if !config.enabled {
        tracing::debug!("fob-links is disabled by configuration");
        return Ok(());
    }

    let root = args
        .root
        .canonicalize()
        .map_err(|_| CliError::FileNotFound(args.root.clone()))?;

    let runtime: Arc<dyn Runtime> = Arc::new(NativeRuntime);
    let linker = StyleLinker::with_config(Arc::clone(&runtime), config.linker);
    let ignore_patterns: Vec<String> = DEFAULT_IGNORE_PATTERNS
        .iter()
        .map(|p| p.to_string())
        .collect();

    // Watch before the initial scan so no edit falls in between.
    let (watcher, mut change_rx) =
        FileWatcher::new(root.clone(), ignore_patterns.clone(), args.debounce)?;

    let files = collect_style_files(&root, &ignore_patterns, &linker);
    tracing::debug!(root = %root.display(), files = files.len(), "initial scan");
    for path in &files {
        print_document(&linker, runtime.as_ref(), &root, path).await;
    }

    ui::info(&format!(
        "Watching {} ({} style sheets). Press Ctrl+C to stop",
        watcher.root().display(),
        files.len()
    ));

    loop {
        tokio::select! {
            Some(change) = change_rx.recv() => {
                handle_file_change(&linker, runtime.as_ref(), &root, change).await;
            }

            _ = signal::ctrl_c() => {
                tracing::debug!("{}", linker.stats());
                break;
            }
        }
    }

    Ok(())
}

/// Style sheets under `root`, sorted, skipping ignored and hidden paths.
fn collect_style_files(root: &Path, ignore_patterns: &[String], linker: &StyleLinker) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !should_ignore(entry.path(), root, ignore_patterns))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && linker.is_style_document(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

async fn handle_file_change(
    linker: &StyleLinker,
    runtime: &dyn Runtime,
    root: &Path,
    change: FileChange,
) {
    tracing::debug!(?change, "file changed");
    linker.file_changed(&change);

    match &change {
        FileChange::Removed(path) if linker.is_style_document(path) => {
            linker.document_closed(path);
        }
        FileChange::Created(path) | FileChange::Modified(path)
            if linker.is_style_document(path) =>
        {
            print_document(linker, runtime, root, path).await;
        }
        _ => {}
    }
}

async fn print_document(linker: &StyleLinker, runtime: &dyn Runtime, root: &Path, path: &Path) {
    let display = path.strip_prefix(root).unwrap_or(path);
    match read_document(runtime, path, display).await {
        Ok(document) => {
            let records = link_records(linker, &document, display).await;
            ui::print_links(&records);
        }
        Err(e) => ui::warning(&e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn patterns() -> Vec<String> {
        DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn collects_style_files_only() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        for file in [
            "src/app.scss",
            "src/theme.css",
            "src/main.ts",
            "node_modules/pkg/index.scss",
            ".cache/old.scss",
            "tsconfig.json",
        ] {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }

        let linker = StyleLinker::new(Arc::new(NativeRuntime));
        let files = collect_style_files(root, &patterns(), &linker);
        assert_eq!(files, [root.join("src/app.scss"), root.join("src/theme.css")]);
    }

    #[tokio::test]
    async fn modified_style_sheet_is_rescanned() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("tsconfig.json"), "{}").unwrap();
        fs::write(root.join("a.scss"), "").unwrap();
        let path = root.join("app.scss");
        fs::write(&path, "").unwrap();

        let runtime = NativeRuntime;
        let linker = StyleLinker::new(Arc::new(runtime));
        print_document(&linker, &runtime, root, &path).await;

        fs::write(&path, "@use './a';").unwrap();
        handle_file_change(&linker, &runtime, root, FileChange::Modified(path.clone())).await;

        let stats = linker.stats();
        assert_eq!(stats.invalidations, 1);
        assert_eq!(stats.misses, 2);
        assert!(linker.is_cached(&path));
    }

    #[tokio::test]
    async fn removed_style_sheet_is_closed() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("tsconfig.json"), "{}").unwrap();
        let path = root.join("app.scss");
        fs::write(&path, "").unwrap();

        let runtime = NativeRuntime;
        let linker = StyleLinker::new(Arc::new(runtime));
        print_document(&linker, &runtime, root, &path).await;
        assert!(linker.is_cached(&path));

        fs::remove_file(&path).unwrap();
        handle_file_change(&linker, &runtime, root, FileChange::Removed(path.clone())).await;
        assert!(!linker.is_cached(&path));
    }
}
