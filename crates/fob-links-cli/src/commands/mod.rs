//! Command implementations.
//!
//! - [`scan`] - print the links of the given style sheets
//! - [`watch`] - print links again whenever style sheets change
//!
//! Each command provides an `execute` function taking its parsed arguments
//! and the loaded settings.

pub mod scan;
pub mod watch;

pub use scan::execute as scan_execute;
pub use watch::execute as watch_execute;

use crate::error::{CliError, Result, ResultExt};
use crate::ui::LinkRecord;
use fob_links::{Document, LineIndex, Runtime, StyleLinker};
use std::path::Path;

/// Read a style sheet through the runtime. `display` names it in errors.
pub(crate) async fn read_document(
    runtime: &dyn Runtime,
    path: &Path,
    display: &Path,
) -> Result<Document> {
    let bytes = runtime.read_file(path).await.with_path(display)?;
    let text = String::from_utf8(bytes).map_err(|_| CliError::InvalidUtf8(display.to_path_buf()))?;
    Ok(Document::new(path, text))
}

/// Links of `document` as printable records labelled with `display`.
pub(crate) async fn link_records(
    linker: &StyleLinker,
    document: &Document,
    display: &Path,
) -> Vec<LinkRecord> {
    let links = linker.extract_links(document).await;
    let index = LineIndex::new(&document.text);
    links
        .iter()
        .map(|link| LinkRecord::new(display, &index, link))
        .collect()
}
