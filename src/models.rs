//! Frontend Models
//!
//! Data structures matching backend entities, plus the constants the
//! views share with the backend.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const INBOX_ID: &str = "inbox";
pub const INBOX_NAME: &str = "Inbox";
pub const DEFAULT_ICON: &str = "◆";
pub const DEFAULT_COLOR: &str = "#8B8B8B";

/// Colors handed out to new collections, in rotation
pub const COLLECTION_COLORS: &[&str] = &[
    "#E8A87C", "#85B8CB", "#C38D9E", "#41B3A3", "#D4A574", "#7FB685", "#CB8589", "#6C9BC2",
];

pub const KEY_FRAMELESS: &str = "frameless";
pub const KEY_BACKGROUND_OPACITY: &str = "background-opacity";
pub const KEY_BACKGROUND_BLUR: &str = "background-blur";
pub const KEY_BACKGROUND_BLUR_RADIUS: &str = "background-blur-radius";
pub const KEY_THEME: &str = "theme";
pub const DEFAULT_THEME: &str = "aura";

/// Theme keys and display names; colors live in the stylesheet
pub const THEMES: &[(&str, &str)] = &[
    ("aura", "Aura"),
    ("catppuccinMocha", "Catppuccin Mocha"),
    ("catppuccinMacchiato", "Catppuccin Macchiato"),
    ("catppuccinFrappe", "Catppuccin Frappe"),
    ("tokyoNight", "Tokyo Night"),
    ("rosePine", "Rose Pine"),
    ("rosePineMoon", "Rose Pine Moon"),
    ("dracula", "Dracula"),
    ("gruvbox", "Gruvbox"),
    ("nord", "Nord"),
    ("ayuDark", "Ayu Dark"),
    ("ayuMirage", "Ayu Mirage"),
    ("midnight", "Midnight"),
];

pub type SettingsMap = BTreeMap<String, String>;

/// Collection data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub sort_order: i64,
    pub archived_at: Option<i64>,
}

impl Collection {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: DEFAULT_ICON.to_string(),
            color: color.into(),
            sort_order: 0,
            archived_at: None,
        }
    }

    pub fn is_inbox(&self) -> bool {
        self.id == INBOX_ID
    }
}

/// Task data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub done: bool,
    pub collection_id: String,
    pub created_at: i64,
    pub sort_order: i64,
    pub archived_at: Option<i64>,
    #[serde(default = "default_priority")]
    pub priority: i64,
}

fn default_priority() -> i64 {
    -1
}

impl Task {
    /// Fresh, undone task at the top of its collection
    pub fn new(id: impl Into<String>, text: impl Into<String>, collection_id: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            done: false,
            collection_id: collection_id.into(),
            created_at,
            sort_order: 0,
            archived_at: None,
            priority: default_priority(),
        }
    }
}

/// One entry of a batch reorder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortUpdate {
    pub id: String,
    pub sort_order: i64,
}

/// Rows removed by "empty archive"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PurgeReport {
    pub tasks: usize,
    pub collections: usize,
}

/// Color for the next collection created when `count` already exist
pub fn next_collection_color(count: usize) -> &'static str {
    COLLECTION_COLORS[count % COLLECTION_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_colors_rotate() {
        assert_eq!(next_collection_color(0), "#E8A87C");
        assert_eq!(next_collection_color(COLLECTION_COLORS.len()), "#E8A87C");
        assert_eq!(next_collection_color(1), "#85B8CB");
    }

    #[test]
    fn test_task_deserializes_without_priority() {
        let json = r#"{"id":"a","text":"x","done":true,"collection_id":"inbox",
            "created_at":5,"sort_order":0,"archived_at":null}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.done);
        assert_eq!(task.priority, -1);
    }
}
