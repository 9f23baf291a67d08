//! Extension and index-file probing.
//!
//! Both helpers go through the runtime's `probe`, so a failed stat is simply
//! "not found" and the next candidate is tried.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::runtime::{PathKind, Runtime};

/// Try `base` as-is, then `base.<ext>` for each extension in order.
///
/// The extension is appended, never substituted: `theme.dark` becomes
/// `theme.dark.scss`, not `theme.scss`.
pub async fn try_extensions(
    base: &Path,
    extensions: &[String],
    runtime: &dyn Runtime,
) -> Option<PathBuf> {
    if runtime.probe(base).await == PathKind::File {
        return Some(base.to_path_buf());
    }

    for ext in extensions {
        let candidate = with_suffix(base, ext);
        if runtime.probe(&candidate).await == PathKind::File {
            return Some(candidate);
        }
    }

    None
}

/// Return the first index file that exists inside `dir`.
pub async fn try_index_files(
    dir: &Path,
    index_files: &[String],
    runtime: &dyn Runtime,
) -> Option<PathBuf> {
    for name in index_files {
        let candidate = dir.join(name);
        if runtime.probe(&candidate).await == PathKind::File {
            return Some(candidate);
        }
    }

    None
}

fn with_suffix(base: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::NativeRuntime;
    use std::fs;
    use tempfile::TempDir;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn exact_file_wins_over_suffixes() {
        let temp = TempDir::new().unwrap();
        let exact = temp.path().join("theme");
        fs::write(&exact, "").unwrap();
        fs::write(temp.path().join("theme.scss"), "").unwrap();

        let found = try_extensions(&exact, &strings(&["scss"]), &NativeRuntime).await;
        assert_eq!(found, Some(exact));
    }

    #[tokio::test]
    async fn suffixes_follow_declared_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("foo.scss"), "").unwrap();
        fs::write(temp.path().join("foo.css"), "").unwrap();

        let found = try_extensions(
            &temp.path().join("foo"),
            &strings(&["sass", "scss", "css"]),
            &NativeRuntime,
        )
        .await;
        assert_eq!(found, Some(temp.path().join("foo.scss")));
    }

    #[tokio::test]
    async fn suffix_is_appended_not_substituted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("theme.dark.scss"), "").unwrap();

        let found =
            try_extensions(&temp.path().join("theme.dark"), &strings(&["scss"]), &NativeRuntime)
                .await;
        assert_eq!(found, Some(temp.path().join("theme.dark.scss")));
    }

    #[tokio::test]
    async fn directories_are_not_files() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("button")).unwrap();

        let found =
            try_extensions(&temp.path().join("button"), &strings(&["scss"]), &NativeRuntime).await;
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn index_files_follow_declared_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("index.scss"), "").unwrap();
        fs::write(temp.path().join("main.scss"), "").unwrap();

        let order = strings(&["index.scss", "main.scss"]);
        let found = try_index_files(temp.path(), &order, &NativeRuntime).await;
        assert_eq!(found, Some(temp.path().join("index.scss")));

        fs::remove_file(temp.path().join("index.scss")).unwrap();
        let found = try_index_files(temp.path(), &order, &NativeRuntime).await;
        assert_eq!(found, Some(temp.path().join("main.scss")));
    }
}
