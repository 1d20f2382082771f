//! Collection Entity
//!
//! A named, colored grouping of tasks. The `inbox` collection is the
//! protected default: it can be renamed but never archived or deleted.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

pub const INBOX_ID: &str = "inbox";
pub const INBOX_NAME: &str = "Inbox";
pub const INBOX_ICON: &str = "○";
pub const DEFAULT_ICON: &str = "◆";
pub const DEFAULT_COLOR: &str = "#8B8B8B";

/// A collection of tasks shown in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    /// Glyph rendered next to the name
    pub icon: String,
    /// Hex color, e.g. "#85B8CB"
    pub color: String,
    pub sort_order: i64,
    pub archived_at: Option<i64>,
}

impl Collection {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: DEFAULT_ICON.to_string(),
            color: DEFAULT_COLOR.to_string(),
            sort_order: 0,
            archived_at: None,
        }
    }

    pub fn with_style(mut self, icon: impl Into<String>, color: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.color = color.into();
        self
    }

    /// The seeded default collection
    pub fn inbox() -> Self {
        Self::new(INBOX_ID, INBOX_NAME).with_style(INBOX_ICON, DEFAULT_COLOR)
    }

    pub fn is_inbox(&self) -> bool {
        is_inbox(&self.id)
    }
}

/// Sentinel check used by the archive/delete guards
pub fn is_inbox(id: &str) -> bool {
    id == INBOX_ID
}

impl Entity for Collection {
    fn id(&self) -> &str {
        &self.id
    }

    fn archived_at(&self) -> Option<i64> {
        self.archived_at
    }
}
