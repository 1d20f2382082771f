//! Task Entity
//!
//! A single to-do item belonging to exactly one collection.

use serde::{Deserialize, Serialize};
use super::collection::INBOX_ID;
use super::entity::Entity;

/// Stored priority for tasks created without one. Display priority is
/// positional, so this column is only carried for API compatibility.
pub const DEFAULT_PRIORITY: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub done: bool,
    pub collection_id: String,
    /// Epoch millis, set once at creation
    pub created_at: i64,
    /// Ordering among undone tasks of the same collection
    pub sort_order: i64,
    pub archived_at: Option<i64>,
    pub priority: i64,
}

impl Task {
    pub fn new(id: impl Into<String>, text: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            done: false,
            collection_id: collection_id.into(),
            created_at: 0,
            sort_order: 0,
            archived_at: None,
            priority: DEFAULT_PRIORITY,
        }
    }

    /// New task in the inbox
    pub fn in_inbox(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, INBOX_ID)
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }
}

impl Entity for Task {
    fn id(&self) -> &str {
        &self.id
    }

    fn archived_at(&self) -> Option<i64> {
        self.archived_at
    }
}

/// One entry of a batch reorder: the task and its new sort order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortUpdate {
    pub id: String,
    pub sort_order: i64,
}

impl SortUpdate {
    pub fn new(id: impl Into<String>, sort_order: i64) -> Self {
        Self { id: id.into(), sort_order }
    }
}

/// Scope of "clear completed"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearScope {
    All,
    Collection(String),
}

impl ClearScope {
    /// "all" and the UI's "__all__" pseudo-collection both mean every collection
    pub fn parse(scope: &str) -> Self {
        match scope {
            "all" | "__all__" => ClearScope::All,
            id => ClearScope::Collection(id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::in_inbox("t1", "Buy milk");
        assert_eq!(task.id(), "t1");
        assert_eq!(task.collection_id, "inbox");
        assert_eq!(task.priority, DEFAULT_PRIORITY);
        assert!(!task.done);
        assert!(!task.is_archived());
    }

    #[test]
    fn test_clear_scope_parse() {
        assert_eq!(ClearScope::parse("all"), ClearScope::All);
        assert_eq!(ClearScope::parse("__all__"), ClearScope::All);
        assert_eq!(ClearScope::parse("work"), ClearScope::Collection("work".to_string()));
    }
}
