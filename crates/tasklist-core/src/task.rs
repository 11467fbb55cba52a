use serde::{Deserialize, Serialize};

/// A single to-do item.
///
/// Serialized as `{ "id": <integer>, "text": <string>, "done": <bool> }`,
/// which is the exact shape kept under the `tasks` storage key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    /// Builds an open task. `text` must already be trimmed and non-empty.
    pub fn new(id: u64, text: String) -> Self {
        Self {
            id,
            text,
            done: false,
        }
    }
}

/// Trims user input and rejects blank or cancelled entries.
///
/// `None` is the cancelled-prompt case.
pub fn normalize_text(input: Option<&str>) -> Option<String> {
    let trimmed = input?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_rejects_blank() {
        assert_eq!(
            normalize_text(Some("  Buy milk \n")).as_deref(),
            Some("Buy milk")
        );
        assert_eq!(normalize_text(Some("")), None);
        assert_eq!(normalize_text(Some(" \t ")), None);
        assert_eq!(normalize_text(None), None);
    }

    #[test]
    fn serializes_storage_shape() {
        let task = Task::new(1_700_000_000_000, "Write docs".to_string());
        let json = serde_json::to_value(&task).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "id": 1_700_000_000_000_u64, "text": "Write docs", "done": false })
        );
    }

    #[test]
    fn missing_done_defaults_to_false() {
        let task: Task =
            serde_json::from_str(r#"{"id":3,"text":"x"}"#).expect("parse");
        assert!(!task.done);
    }
}
