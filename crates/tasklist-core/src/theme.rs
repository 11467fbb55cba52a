use std::fmt;

use serde::{Deserialize, Serialize};

/// CSS class carried by the root element while the light theme is applied.
pub const LIGHT_MODE_CLASS: &str = "light-mode";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn storage_value(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Reads a stored value. `None` for anything that is not a theme, so the
    /// caller decides the fallback.
    pub fn from_storage(stored: &str) -> Option<Self> {
        match stored {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Toggle control semantics: checked means light.
    pub fn from_checked(checked: bool) -> Self {
        if checked { Self::Light } else { Self::Dark }
    }

    pub fn is_checked(self) -> bool {
        self == Self::Light
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_value())
    }
}
