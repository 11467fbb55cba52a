use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info};

use crate::theme::Theme;

pub const DEFAULT_TASKS_KEY: &str = "tasks";
pub const DEFAULT_THEME_KEY: &str = "theme";
pub const DEFAULT_EMPTY_PLACEHOLDER: &str = "No tasks pending.";

/// Settings shared by every front end. Every field has a default, so an
/// empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub storage: StorageConfig,
    pub theme: ThemeConfig,
    pub view: ViewConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub tasks_key: String,
    pub theme_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            tasks_key: DEFAULT_TASKS_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Applied when nothing usable is stored under the theme key.
    pub default: Theme,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub empty_placeholder: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            empty_placeholder: DEFAULT_EMPTY_PLACEHOLDER.to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let cfg: Config = toml::from_str(raw).context("failed to parse tasklist config")?;
        debug!(?cfg, "parsed config");
        Ok(cfg)
    }

    #[tracing::instrument]
    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let cfg = Self::from_toml_str(&raw)
            .with_context(|| format!("invalid config in {}", path.display()))?;
        info!(config = %path.display(), "loaded config");
        Ok(cfg)
    }
}
