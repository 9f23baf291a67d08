//! CLI settings.
//!
//! Loaded from multiple sources, later ones winning:
//! defaults → `fob-links.json` (or `--config <path>`) → `FOB_LINKS_*` environment.

use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use fob_links::{LinkerConfig, NativeRuntime, Runtime};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "fob-links.json";

/// Prefix of the environment variables that override the settings file.
pub const ENV_PREFIX: &str = "FOB_LINKS_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinksConfig {
    /// When false, commands do nothing.
    pub enabled: bool,

    /// Debug logging, same as `--verbose`.
    pub debug: bool,

    /// Options handed to the link engine.
    #[serde(flatten)]
    pub linker: LinkerConfig,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debug: false,
            linker: LinkerConfig::default(),
        }
    }
}

impl LinksConfig {
    /// Load settings from defaults, the settings file and the environment.
    ///
    /// An explicit `config_path` must exist; the default `fob-links.json` is
    /// optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(config_path, ENV_PREFIX)
    }

    pub(crate) fn load_with_env(config_path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let runtime = NativeRuntime;
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match config_path {
            Some(path) if !runtime.exists(path) => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                runtime
                    .exists(default_path)
                    .then(|| default_path.to_path_buf())
            }
        };

        if let Some(path) = config_file {
            tracing::debug!(path = %path.display(), "loading settings file");
            figment = figment.merge(Json::file(path));
        }

        // FOB_LINKS_STYLE_EXTENSIONS -> styleExtensions
        figment = figment.merge(
            Env::prefixed(env_prefix)
                .lowercase(false)
                .map(|key| camel_case(key.as_str()).into()),
        );

        figment.extract().map_err(|e| {
            ConfigError::InvalidValue {
                field: "configuration".to_string(),
                value: e.to_string(),
                hint: "Check fob-links.json syntax and field types".to_string(),
            }
            .into()
        })
    }
}

fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, word) in key.split('_').filter(|w| !w.is_empty()).enumerate() {
        let word = word.to_ascii_lowercase();
        if i == 0 {
            out.push_str(&word);
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.push(first.to_ascii_uppercase());
                out.extend(chars);
            }
        }
    }
    out
}
