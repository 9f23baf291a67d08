//! Import statement scanning and text positions.
//!
//! The scanner finds `@use "..."` and `@import '...'` directives and reports
//! the byte range of the specifier between the quotes. [`LineIndex`] turns
//! those byte offsets into editor positions.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@(?:use|import)\s+(?:"([^"\r\n]*)"|'([^'\r\n]*)')"#)
        .expect("import pattern is valid")
});

/// A style document as handed over by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Absolute path, also the document's cache identity
    pub path: PathBuf,
    /// Full text
    pub text: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the document.
    pub fn directory(&self) -> Option<&Path> {
        self.path.parent()
    }
}

/// Half-open byte range into a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The slice of `text` this range covers.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// An import directive found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    pub specifier: String,
    /// Range of the specifier, quotes excluded
    pub range: TextRange,
}

/// A resolved import, ready to be rendered as a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentLink {
    pub range: TextRange,
    pub target: PathBuf,
}

/// All `@use` / `@import` directives in `text`, in textual order.
///
/// Directives with an empty specifier are skipped.
pub fn scan_imports(text: &str) -> Vec<ImportStatement> {
    IMPORT_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .filter(|m| !m.as_str().is_empty())
        .map(|m| ImportStatement {
            specifier: m.as_str().to_string(),
            range: TextRange::new(m.start(), m.end()),
        })
        .collect()
}

/// Zero-based line and column, the column counted in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Byte offset → line/column conversion for one text.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { text, line_starts }
    }

    /// Position of `offset`. Offsets past the end clamp to the end; offsets
    /// inside a multi-byte character snap back to its start.
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let character = self.text[line_start..offset].encode_utf16().count();

        Position::new(line as u32, character as u32)
    }

    /// Start and end positions of `range`.
    pub fn range(&self, range: TextRange) -> (Position, Position) {
        (self.position(range.start), self.position(range.end))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_use_and_import_with_both_quotes() {
        let text = "@use \"@styles/button\";\n@import 'vars';\n";
        let imports = scan_imports(text);

        assert_eq!(imports.len(), 2);
        assert_eq!(imports[0].specifier, "@styles/button");
        assert_eq!(imports[0].range.slice(text), "@styles/button");
        assert_eq!(imports[1].specifier, "vars");
        assert_eq!(imports[1].range.slice(text), "vars");
    }

    #[test]
    fn keeps_textual_order_and_skips_other_rules() {
        let text = r#"
            @forward "ignored";
            .a { color: red; }
            @import "second-a";
            @use "first" as f;
            @use 'third';
        "#;
        let specifiers: Vec<_> = scan_imports(text)
            .into_iter()
            .map(|import| import.specifier)
            .collect();
        assert_eq!(specifiers, ["second-a", "first", "third"]);
    }

    #[test]
    fn range_excludes_quotes_and_directive() {
        let text = "@use   \"x\";";
        let import = &scan_imports(text)[0];
        assert_eq!(import.range, TextRange::new(8, 9));
    }

    #[test]
    fn skips_empty_and_unterminated_specifiers() {
        assert!(scan_imports("@use \"\";").is_empty());
        assert!(scan_imports("@use \"open\n\";").is_empty());
        assert!(scan_imports("@use \"mixed';").is_empty());
    }

    #[test]
    fn positions_count_utf16_units() {
        let text = "a\n€😀@use 'x';";
        let index = LineIndex::new(text);
        let import = &scan_imports(text)[0];

        let (start, end) = index.range(import.range);
        // '€' is one UTF-16 unit, '😀' is two.
        assert_eq!(start, Position::new(1, 9));
        assert_eq!(end, Position::new(1, 10));
        assert_eq!(index.line_count(), 2);
    }

    #[test]
    fn positions_clamp_and_snap() {
        let text = "é";
        let index = LineIndex::new(text);
        assert_eq!(index.position(1), Position::new(0, 0));
        assert_eq!(index.position(99), Position::new(0, 1));
    }
}
