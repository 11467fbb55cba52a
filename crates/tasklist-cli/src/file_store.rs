use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tasklist_core::KeyValueStore;
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub const STORE_FILE_NAME: &str = "store.json";

/// Key-value storage kept as one JSON object on disk. Every write replaces
/// the file atomically, and the in-memory map only changes once it has.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl JsonFileStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;
        let path = data_dir.join(STORE_FILE_NAME);

        let items = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed reading {}", path.display()))?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)
                    .with_context(|| format!("failed parsing {}", path.display()))?
            }
        } else {
            BTreeMap::new()
        };

        info!(store = %path.display(), keys = items.len(), "opened file store");
        Ok(Self { path, items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[tracing::instrument(skip(self, items), fields(file = %self.path.display()))]
    fn flush(&self, items: &BTreeMap<String, String>) -> anyhow::Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create a temp file in {}", dir.display()))?;
        serde_json::to_writer_pretty(&mut temp, items)?;
        writeln!(temp)?;
        temp.flush()?;

        temp.persist(&self.path)
            .map_err(|err| anyhow!("failed to persist {}: {}", self.path.display(), err))?;
        debug!(keys = items.len(), "flushed file store");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut next = self.items.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        self.items = next;
        Ok(())
    }
}
