use std::path::{Path, PathBuf};

use anyhow::anyhow;
use tasklist_core::Config;
use tracing::{debug, warn};

const APP_DIR: &str = "tasklist";
const CONFIG_FILE_NAME: &str = "tasklist.toml";

pub fn resolve_data_dir(override_dir: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = override_dir {
        return Ok(path.to_path_buf());
    }
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| anyhow!("could not determine a data directory; pass --data"))
}

/// An explicit `--config` must exist. The per-user file is optional.
#[tracing::instrument]
pub fn load_config(override_path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = override_path {
        return Config::load_file(path);
    }

    let Some(path) = dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
    else {
        warn!("no config directory on this platform; using defaults");
        return Ok(Config::default());
    };

    if path.exists() {
        Config::load_file(&path)
    } else {
        debug!(config = %path.display(), "no config file; using defaults");
        Ok(Config::default())
    }
}
