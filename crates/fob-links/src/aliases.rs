//! Path alias tables read from `tsconfig.json` / `jsconfig.json`.
//!
//! `compilerOptions.paths` maps alias patterns to target patterns:
//!
//! ```json
//! { "compilerOptions": { "paths": { "@styles/*": ["./src/styles/*", "./vendor/*"] } } }
//! ```
//!
//! becomes the table entry `"@styles" → ["<config dir>/src/styles", "<config dir>/vendor"]`.
//! Targets are made absolute once, at parse time, against the directory of
//! the configuration file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use parking_lot::Mutex;
use path_clean::PathClean;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{LinkError, Result};
use crate::runtime::Runtime;

/// Wildcard suffix stripped from alias keys and targets.
const WILDCARD_SUFFIX: &str = "/*";

/// Ordered alias → base directories mapping.
///
/// Keys are unique and keep declaration order; the order decides which alias
/// wins when several are prefixes of the same specifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: IndexMap<String, Vec<PathBuf>>,
}

/// An alias matched against a specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasMatch<'a> {
    pub alias: &'a str,
    pub bases: &'a [PathBuf],
    /// The specifier with the alias stripped, e.g. `/button` for `@styles/button`.
    pub remainder: &'a str,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an alias. A replaced alias keeps its original position.
    pub fn insert(&mut self, alias: impl Into<String>, bases: Vec<PathBuf>) {
        self.entries.insert(alias.into(), bases);
    }

    pub fn get(&self, alias: &str) -> Option<&[PathBuf]> {
        self.entries.get(alias).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.entries
            .iter()
            .map(|(alias, bases)| (alias.as_str(), bases.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First alias, in declaration order, that is a literal prefix of `specifier`.
    pub fn find_match<'a>(&'a self, specifier: &'a str) -> Option<AliasMatch<'a>> {
        self.entries.iter().find_map(|(alias, bases)| {
            specifier.strip_prefix(alias.as_str()).map(|remainder| AliasMatch {
                alias,
                bases,
                remainder,
            })
        })
    }

    /// Parse the text of a configuration file located at `config_path`.
    ///
    /// Only a syntax error is reported; a missing or wrong-typed
    /// `compilerOptions.paths` yields an empty table and bad entries are
    /// skipped one by one.
    pub fn parse(config_path: &Path, text: &str) -> Result<Self> {
        let cleaned = strip_trailing_commas(&strip_jsonc_comments(text));
        let value: Value =
            serde_json::from_str(&cleaned).map_err(|source| LinkError::MalformedConfig {
                path: config_path.to_path_buf(),
                source,
            })?;

        let config: ProjectConfig = serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::debug!(config = %config_path.display(), "ignoring compilerOptions: {}", e);
            ProjectConfig::default()
        });

        let paths = config
            .compiler_options
            .and_then(|options| options.paths)
            .unwrap_or_default();

        let config_dir = config_path.parent().unwrap_or(Path::new(""));
        let mut table = AliasTable::new();

        for (pattern, targets) in paths {
            let alias = strip_wildcard(&pattern);
            if alias.is_empty() {
                tracing::debug!(pattern = %pattern, "skipping catch-all alias");
                continue;
            }

            let Value::Array(targets) = targets else {
                tracing::debug!(alias = %alias, "skipping alias whose targets are not an array");
                continue;
            };

            let bases = targets
                .iter()
                .filter_map(|target| match target {
                    Value::String(target) => Some(config_dir.join(strip_wildcard(target)).clean()),
                    other => {
                        tracing::debug!(alias = %alias, "skipping non-string target {}", other);
                        None
                    }
                })
                .collect();

            table.insert(alias, bases);
        }

        Ok(table)
    }
}

fn strip_wildcard(pattern: &str) -> &str {
    pattern.strip_suffix(WILDCARD_SUFFIX).unwrap_or(pattern)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectConfig {
    #[serde(default)]
    compiler_options: Option<CompilerOptions>,
}

#[derive(Debug, Default, Deserialize)]
struct CompilerOptions {
    #[serde(default)]
    paths: Option<IndexMap<String, Value>>,
}

/// Remove `//` and `/* */` comments outside string literals.
///
/// Line comments keep their newline and block comments become a single space,
/// so parser error positions still point at the right line.
fn strip_jsonc_comments(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => i = skip_string(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                out.push_str(&input[copied..i]);
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                copied = i;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                out.push_str(&input[copied..i]);
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    i += 1;
                }
                i = (i + 2).min(bytes.len());
                out.push(' ');
                copied = i;
            }
            _ => i += 1,
        }
    }

    out.push_str(&input[copied..]);
    out
}

/// Remove commas directly followed (modulo whitespace) by `}` or `]`.
fn strip_trailing_commas(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => i = skip_string(bytes, i),
            b',' => {
                let next = bytes[i + 1..]
                    .iter()
                    .find(|b| !b.is_ascii_whitespace())
                    .copied();
                if matches!(next, Some(b'}') | Some(b']')) {
                    out.push_str(&input[copied..i]);
                    copied = i + 1;
                }
                i += 1;
            }
            _ => i += 1,
        }
    }

    out.push_str(&input[copied..]);
    out
}

/// Index just past the string literal opening at `start`.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// A parsed alias table together with the timestamp it was parsed at.
#[derive(Debug, Clone)]
pub struct ConfigCacheEntry {
    pub table: Arc<AliasTable>,
    /// Modification time observed before reading (milliseconds since epoch)
    pub modified: Option<u64>,
    pub config_path: PathBuf,
}

impl ConfigCacheEntry {
    fn is_fresh(&self, modified: Option<u64>) -> bool {
        matches!((self.modified, modified), (Some(cached), Some(current)) if cached == current)
    }
}

type Slot = Arc<tokio::sync::Mutex<Option<ConfigCacheEntry>>>;

/// Builds alias tables and caches them per configuration file.
///
/// A cached table is reused while the file's modification time is unchanged.
/// Builds for the same path are serialized on a per-path async lock, so two
/// documents scanned at once never parse the same configuration twice.
#[derive(Debug, Default)]
pub struct AliasTableBuilder {
    slots: Mutex<FxHashMap<PathBuf, Slot>>,
    parses: AtomicU64,
}

impl AliasTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the alias table for `config_path`, re-parsing only when the
    /// file's modification time moved.
    pub async fn build(&self, config_path: &Path, runtime: &dyn Runtime) -> Result<Arc<AliasTable>> {
        let slot = self.slot(config_path);
        let mut entry = slot.lock().await;

        let modified = runtime.metadata(config_path).await?.modified;
        if let Some(cached) = entry.as_ref().filter(|cached| cached.is_fresh(modified)) {
            tracing::trace!(config = %config_path.display(), "alias table cache hit");
            return Ok(Arc::clone(&cached.table));
        }

        let bytes = runtime.read_file(config_path).await?;
        let text =
            String::from_utf8(bytes).map_err(|_| LinkError::InvalidUtf8(config_path.to_path_buf()))?;
        let table = Arc::new(AliasTable::parse(config_path, &text)?);
        self.parses.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(
            config = %config_path.display(),
            aliases = table.len(),
            "parsed alias table"
        );

        *entry = Some(ConfigCacheEntry {
            table: Arc::clone(&table),
            modified,
            config_path: config_path.to_path_buf(),
        });

        Ok(table)
    }

    fn slot(&self, config_path: &Path) -> Slot {
        Arc::clone(
            self.slots
                .lock()
                .entry(config_path.to_path_buf())
                .or_default(),
        )
    }

    /// The cached entry for `config_path`, if any, without freshness checks.
    pub fn cached(&self, config_path: &Path) -> Option<ConfigCacheEntry> {
        let slot = self.slots.lock().get(config_path).cloned()?;
        slot.try_lock().ok().and_then(|entry| entry.clone())
    }

    /// Forget the table for `config_path`.
    pub fn remove(&self, config_path: &Path) -> bool {
        self.slots.lock().remove(config_path).is_some()
    }

    /// How many times a configuration file was actually parsed.
    pub fn parse_count(&self) -> u64 {
        self.parses.load(Ordering::Relaxed)
    }
}
