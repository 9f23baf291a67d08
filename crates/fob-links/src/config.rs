//! Linker configuration.

use serde::{Deserialize, Serialize};

/// Default configuration file names, probed in this order in every directory.
pub const DEFAULT_CONFIG_FILE_NAMES: &[&str] = &["tsconfig.json", "jsconfig.json"];

/// Default suffixes tried when a specifier resolves relative to the document.
pub const DEFAULT_STYLE_EXTENSIONS: &[&str] = &["sass", "scss", "css"];

/// Default files looked up inside a directory an alias resolves to.
pub const DEFAULT_INDEX_FILES: &[&str] = &["index.scss", "main.scss"];

/// Options shared by the locator, the resolver and the linker.
///
/// Every field has a default, so a partial JSON object deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkerConfig {
    /// Configuration file names, in probe order.
    pub config_file_names: Vec<String>,

    /// Extensions (without the dot) appended during relative resolution, in order.
    pub style_extensions: Vec<String>,

    /// Index files tried inside an aliased directory, in order.
    pub index_files: Vec<String>,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            config_file_names: to_owned(DEFAULT_CONFIG_FILE_NAMES),
            style_extensions: to_owned(DEFAULT_STYLE_EXTENSIONS),
            index_files: to_owned(DEFAULT_INDEX_FILES),
        }
    }
}

impl LinkerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_file_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config_file_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_style_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.style_extensions = extensions
            .into_iter()
            .map(|ext| ext.into().trim_start_matches('.').to_string())
            .collect();
        self
    }

    pub fn with_index_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index_files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `name` is one of the configuration file names.
    pub fn is_config_file_name(&self, name: &str) -> bool {
        self.config_file_names.iter().any(|n| n == name)
    }

    /// Whether `extension` marks a style document.
    pub fn is_style_extension(&self, extension: &str) -> bool {
        self.style_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

fn to_owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
