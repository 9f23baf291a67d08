//! # fob-links
//!
//! Turns `@use` / `@import` specifiers in Sass and CSS files into document
//! links, resolving the path aliases declared in the nearest `tsconfig.json`
//! or `jsconfig.json`.
//!
//! ```text
//! src/components/card.scss          tsconfig.json
//! ┌──────────────────────────┐      "paths": { "@styles/*": ["./src/styles/*"] }
//! │ @use "@styles/button";   │──┐
//! └──────────────────────────┘  └─▶ src/styles/button/index.scss
//! ```
//!
//! ## Resolution
//!
//! - the first alias (declaration order) prefixing the specifier is expanded
//!   against each of its target directories in turn
//! - an aliased directory resolves to its `index.scss`, else `main.scss`
//! - a specifier matching no alias resolves next to the document, trying the
//!   bare path and then `.sass`, `.scss`, `.css`
//!
//! ## Caching
//!
//! [`StyleLinker`] caches config locations per directory, alias tables per
//! configuration file (re-parsed when the file's modification time moves)
//! and links per document (dropped on [`StyleLinker::document_changed`]).
//!
//! All filesystem access goes through the [`Runtime`] trait; the crate only
//! emits `tracing` events and never installs a subscriber.

pub mod aliases;
pub mod cache;
pub mod config;
pub mod error;
pub mod linker;
pub mod links;
pub mod locator;
pub mod resolver;
pub mod runtime;

pub use aliases::{AliasMatch, AliasTable, AliasTableBuilder, ConfigCacheEntry};
pub use cache::{CacheStats, DocumentLinkCache, Links};
pub use config::LinkerConfig;
pub use error::{LinkError, Result};
pub use linker::{FileChange, StyleLinker};
pub use links::{Document, DocumentLink, ImportStatement, LineIndex, Position, TextRange, scan_imports};
pub use locator::ConfigLocator;
pub use resolver::ImportResolver;
pub use runtime::{FileMetadata, NativeRuntime, PathKind, Runtime, RuntimeError, RuntimeResult};
