use std::collections::BTreeMap;

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::store::TaskStore;
use crate::theme::Theme;

/// Synchronous string key-value storage, the shape of browser
/// `localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Process-local storage, used by tests and as a scratch backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the task list and theme preference under two
/// independent keys.
#[derive(Debug, Clone)]
pub struct Persistence<S> {
    storage: S,
    tasks_key: String,
    theme_key: String,
    default_theme: Theme,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(storage: S, cfg: &Config) -> Self {
        Self {
            storage,
            tasks_key: cfg.storage.tasks_key.clone(),
            theme_key: cfg.storage.theme_key.clone(),
            default_theme: cfg.theme.default,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// An absent key is an empty store. A present key replaces the store
    /// verbatim.
    #[tracing::instrument(skip(self), fields(key = %self.tasks_key))]
    pub fn load_tasks(&self) -> anyhow::Result<TaskStore> {
        let raw = self
            .storage
            .get_item(&self.tasks_key)
            .with_context(|| format!("failed reading '{}'", self.tasks_key))?;

        let Some(raw) = raw else {
            debug!("no stored tasks; starting empty");
            return Ok(TaskStore::new());
        };

        let store: TaskStore = serde_json::from_str(&raw)
            .with_context(|| format!("failed parsing tasks stored under '{}'", self.tasks_key))?;
        info!(count = store.len(), "loaded tasks");
        Ok(store)
    }

    #[tracing::instrument(skip(self, store), fields(key = %self.tasks_key, count = store.len()))]
    pub fn save_tasks(&mut self, store: &TaskStore) -> anyhow::Result<()> {
        let json = serde_json::to_string(store).context("failed to serialize tasks")?;
        self.storage
            .set_item(&self.tasks_key, &json)
            .with_context(|| format!("failed writing '{}'", self.tasks_key))?;
        debug!(bytes = json.len(), "saved tasks");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(key = %self.theme_key))]
    pub fn load_theme(&self) -> anyhow::Result<Theme> {
        let stored = self
            .storage
            .get_item(&self.theme_key)
            .with_context(|| format!("failed reading '{}'", self.theme_key))?;
        let theme = match stored.as_deref() {
            Some(value) => Theme::from_storage(value).unwrap_or_else(|| {
                warn!(value, "unrecognised stored theme; using the configured default");
                self.default_theme
            }),
            None => self.default_theme,
        };
        debug!(%theme, "loaded theme");
        Ok(theme)
    }

    #[tracing::instrument(skip(self), fields(key = %self.theme_key))]
    pub fn save_theme(&mut self, theme: Theme) -> anyhow::Result<()> {
        self.storage
            .set_item(&self.theme_key, theme.storage_value())
            .with_context(|| format!("failed writing '{}'", self.theme_key))?;
        debug!(%theme, "saved theme");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persistence(storage: MemoryStore) -> Persistence<MemoryStore> {
        Persistence::new(storage, &Config::default())
    }

    #[test]
    fn absent_keys_use_defaults() {
        let p = persistence(MemoryStore::new());
        assert!(p.load_tasks().expect("load").is_empty());
        assert_eq!(p.load_theme().expect("theme"), Theme::Dark);
    }

    #[test]
    fn writes_tasks_as_plain_json_array() {
        let mut store = TaskStore::new();
        store.add(Some("Buy milk"), 5);
        let mut p = persistence(MemoryStore::new());
        p.save_tasks(&store).expect("save");

        let raw = p
            .storage()
            .get_item("tasks")
            .expect("get")
            .expect("present");
        assert_eq!(raw, r#"[{"id":5,"text":"Buy milk","done":false}]"#);
        assert_eq!(p.load_tasks().expect("load"), store);
    }

    #[test]
    fn malformed_tasks_are_an_error() {
        let p = persistence(MemoryStore::new().with_item("tasks", "{not json"));
        let err = p.load_tasks().expect_err("should fail");
        assert!(format!("{err:#}").contains("failed parsing tasks"));
    }

    #[test]
    fn theme_is_stored_as_literal_string() {
        let mut p = persistence(MemoryStore::new());
        p.save_theme(Theme::Light).expect("save");
        assert_eq!(
            p.storage().get_item("theme").expect("get").as_deref(),
            Some("light")
        );
        assert_eq!(p.load_theme().expect("load"), Theme::Light);
    }

    #[test]
    fn configured_keys_and_default_theme_apply() {
        let cfg = Config::from_toml_str(
            "[storage]\ntasks_key = \"t2\"\ntheme_key = \"th2\"\n[theme]\ndefault = \"light\"\n",
        )
        .expect("config");
        let mut p = Persistence::new(MemoryStore::new(), &cfg);
        assert_eq!(p.load_theme().expect("theme"), Theme::Light);

        p.save_tasks(&TaskStore::new()).expect("save");
        assert_eq!(p.storage().get_item("t2").expect("get").as_deref(), Some("[]"));
        assert_eq!(p.storage().get_item("tasks").expect("get"), None);
    }

    #[test]
    fn unknown_stored_theme_uses_configured_default() {
        let cfg = Config::from_toml_str("[theme]\ndefault = \"light\"\n").expect("config");
        let p = Persistence::new(MemoryStore::new().with_item("theme", "sepia"), &cfg);
        assert_eq!(p.load_theme().expect("theme"), Theme::Light);

        let p = persistence(MemoryStore::new().with_item("theme", "sepia"));
        assert_eq!(p.load_theme().expect("theme"), Theme::Dark);
    }
}
