//! File system watcher with debouncing.
//!
//! Watches a project directory recursively and turns `notify` events into
//! [`FileChange`]s for the link engine, skipping hidden paths and the
//! configured ignore patterns.

use crate::error::{CliError, Result};
use fob_links::{FileChange, NativeRuntime, Runtime};
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Directories never worth watching for style sheets.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &["node_modules", "target", "dist"];

/// Recursive watcher feeding a channel of [`FileChange`]s.
///
/// Repeated events for the same path inside the debounce window are dropped.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl FileWatcher {
    /// Start watching `root`.
    ///
    /// # Errors
    ///
    /// Returns error if `root` doesn't exist or the watcher cannot be created.
    pub fn new(
        root: PathBuf,
        ignore_patterns: Vec<String>,
        debounce_ms: u64,
    ) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if !NativeRuntime.exists(&root) {
            return Err(CliError::FileNotFound(root));
        }

        let (tx, rx) = mpsc::channel(100);

        let debounce = Duration::from_millis(debounce_ms);
        let mut last_event: Option<(FileChange, Instant)> = None;
        let watch_root = root.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("watch error: {}", e);
                    return;
                }
            };

            for (position, path) in event.paths.iter().enumerate() {
                if should_ignore(path, &watch_root, &ignore_patterns) {
                    continue;
                }
                let Some(change) = to_file_change(&event.kind, path, position) else {
                    continue;
                };

                let now = Instant::now();
                if let Some((last, at)) = &last_event {
                    if *last == change && now.duration_since(*at) < debounce {
                        continue;
                    }
                }
                last_event = Some((change.clone(), now));

                // Receiver gone means the command is shutting down.
                let _ = tx.blocking_send(change);
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    /// Get the root directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Map a notify event kind onto a [`FileChange`] for `path`, the
/// `position`-th path of the event.
///
/// Renames count as removal of the old name and creation of the new one; a
/// two-path rename event lists the old name first.
fn to_file_change(kind: &EventKind, path: &Path, position: usize) -> Option<FileChange> {
    let path = path.to_path_buf();
    match kind {
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) if position == 0 => {
            Some(FileChange::Removed(path))
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => Some(FileChange::Created(path)),
        EventKind::Create(_) => Some(FileChange::Created(path)),
        EventKind::Remove(_) => Some(FileChange::Removed(path)),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => Some(FileChange::Removed(path)),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => Some(FileChange::Created(path)),
        EventKind::Modify(_) => Some(FileChange::Modified(path)),
        _ => None,
    }
}

/// Whether `path` is outside `root`, hidden, or matched by an ignore pattern.
///
/// Patterns starting with `*` match a suffix (`*.log`); anything else
/// matches a path component (`node_modules`).
pub(crate) fn should_ignore(path: &Path, root: &Path, ignore_patterns: &[String]) -> bool {
    let Ok(rel_path) = path.strip_prefix(root) else {
        return true;
    };

    let path_str = rel_path.to_string_lossy();

    for pattern in ignore_patterns {
        if let Some(suffix) = pattern.strip_prefix('*') {
            if path_str.ends_with(suffix) {
                return true;
            }
        } else if rel_path
            .components()
            .any(|c| c.as_os_str() == pattern.as_str())
        {
            return true;
        }
    }

    rel_path.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|name| name.starts_with('.') && name != "." && name != "..")
    })
}
