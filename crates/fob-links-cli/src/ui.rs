//! Terminal output for links and status messages.
//!
//! Links go to stdout, one per line:
//!
//! ```text
//! src/app.scss:1:7-1:21 -> /project/src/styles/button/index.scss
//! ```
//!
//! Lines and columns are one-based. Status messages go to stderr.

use fob_links::{DocumentLink, LineIndex, Position};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

static COLORS: AtomicBool = AtomicBool::new(false);

/// Decide once whether output is colored.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
}

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR, then falls back to terminal detection.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    !is_ci() && console::user_attended()
}

/// One link, as printed by `scan --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRecord {
    pub file: PathBuf,
    pub start: Position,
    pub end: Position,
    pub target: PathBuf,
}

impl LinkRecord {
    pub fn new(file: &Path, index: &LineIndex<'_>, link: &DocumentLink) -> Self {
        let (start, end) = index.range(link.range);
        Self {
            file: file.to_path_buf(),
            start,
            end,
            target: link.target.clone(),
        }
    }
}

/// `file:line:col-line:col -> target`, one-based.
pub fn format_link(record: &LinkRecord) -> String {
    let location = format!(
        "{}:{}:{}-{}:{}",
        record.file.display(),
        record.start.line + 1,
        record.start.character + 1,
        record.end.line + 1,
        record.end.character + 1,
    );
    let target = record.target.display().to_string();

    if colors_enabled() {
        format!("{} {} {}", location.cyan(), "->".dimmed(), target.green())
    } else {
        format!("{location} -> {target}")
    }
}

/// Print every link of one document to stdout.
pub fn print_links(records: &[LinkRecord]) {
    for record in records {
        println!("{}", format_link(record));
    }
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    } else {
        eprintln!("ℹ {message}");
    }
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {message}");
    }
}
