use anyhow::anyhow;
use tasklist_core::{
  KeyValueStore,
  TextPrompt,
  Theme
};

/// `window.localStorage`, looked up on every call.
#[derive(
  Debug, Clone, Copy, Default,
)]
pub struct BrowserStorage;

impl BrowserStorage {
  fn local_storage()
  -> anyhow::Result<web_sys::Storage> {
    web_sys::window()
      .ok_or_else(|| {
        anyhow!("no window object")
      })?
      .local_storage()
      .map_err(|error| {
        anyhow!(
          "localStorage unavailable: \
           {error:?}"
        )
      })?
      .ok_or_else(|| {
        anyhow!(
          "localStorage is disabled"
        )
      })
  }
}

impl KeyValueStore for BrowserStorage {
  fn get_item(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Self::local_storage()?
      .get_item(key)
      .map_err(|error| {
        anyhow!(
          "localStorage.getItem({key}) \
           failed: {error:?}"
        )
      })
  }

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    Self::local_storage()?
      .set_item(key, value)
      .map_err(|error| {
        anyhow!(
          "localStorage.setItem({key}) \
           failed: {error:?}"
        )
      })
  }
}

/// Blocking `window.prompt`.
#[derive(
  Debug, Clone, Copy, Default,
)]
pub struct BrowserPrompt;

impl TextPrompt for BrowserPrompt {
  fn prompt(
    &self,
    message: &str,
    default: Option<&str>
  ) -> Option<String> {
    gloo::dialogs::prompt(
      message, default
    )
  }
}

pub fn now_millis() -> u64 {
  // Date.now() is a non-negative integral f64.
  js_sys::Date::now() as u64
}

/// Puts the theme class on `<body>`; applying the same theme twice is a
/// no-op.
pub fn apply_body_theme(theme: Theme) {
  let Some(body) = web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .and_then(|document| {
      document.body()
    })
  else {
    tracing::warn!(
      "no document body; theme not \
       applied"
    );
    return;
  };

  let result = body
    .class_list()
    .toggle_with_force(
      tasklist_core::theme::LIGHT_MODE_CLASS,
      theme == Theme::Light
    );
  if let Err(error) = result {
    tracing::error!(
      ?error,
      "failed applying theme class"
    );
  }
}
