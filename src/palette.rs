//! Command Palette
//!
//! Search over collections and pending tasks, plus keyboard selection.

use crate::optimistic::Mirror;
use crate::view_state::{collection_color, collection_name, ActiveView};

/// At most this many tasks are listed
pub const MAX_TASK_RESULTS: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub enum PaletteEntry {
    Collection {
        id: String,
        name: String,
        icon: String,
        color: String,
    },
    Task {
        id: String,
        text: String,
        collection_id: String,
        collection_name: String,
        collection_color: String,
    },
}

impl PaletteEntry {
    pub fn key(&self) -> String {
        match self {
            PaletteEntry::Collection { id, .. } => format!("c-{}", id),
            PaletteEntry::Task { id, .. } => format!("t-{}", id),
        }
    }

    /// View to open when the entry is chosen
    pub fn target_view(&self) -> ActiveView {
        match self {
            PaletteEntry::Collection { id, .. } => ActiveView::Collection(id.clone()),
            PaletteEntry::Task { collection_id, .. } => ActiveView::Collection(collection_id.clone()),
        }
    }
}

/// Case-insensitive substring match; an empty query lists everything
pub fn search(mirror: &Mirror, query: &str) -> Vec<PaletteEntry> {
    let q = query.trim().to_lowercase();
    let matches = |s: &str| q.is_empty() || s.to_lowercase().contains(&q);

    let collections = mirror
        .collections
        .iter()
        .filter(|c| matches(&c.name))
        .map(|c| PaletteEntry::Collection {
            id: c.id.clone(),
            name: c.name.clone(),
            icon: c.icon.clone(),
            color: c.color.clone(),
        });

    let tasks = mirror
        .tasks
        .iter()
        .filter(|t| !t.done && matches(&t.text))
        .take(MAX_TASK_RESULTS)
        .map(|t| PaletteEntry::Task {
            id: t.id.clone(),
            text: t.text.clone(),
            collection_id: t.collection_id.clone(),
            collection_name: collection_name(mirror, &t.collection_id),
            collection_color: collection_color(mirror, &t.collection_id),
        });

    collections.chain(tasks).collect()
}

/// Keep `selected` inside `0..len`
pub fn clamp_selection(selected: usize, len: usize) -> usize {
    selected.min(len.saturating_sub(1))
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaletteAction {
    None,
    Open(ActiveView),
    Close,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaletteState {
    pub query: String,
    pub selected: usize,
}

impl PaletteState {
    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.selected = 0;
    }

    pub fn handle_key(&mut self, key: &str, results: &[PaletteEntry]) -> PaletteAction {
        match key {
            "ArrowDown" => {
                self.selected = clamp_selection(self.selected + 1, results.len());
                PaletteAction::None
            }
            "ArrowUp" => {
                self.selected = self.selected.saturating_sub(1);
                PaletteAction::None
            }
            "Enter" => match results.get(clamp_selection(self.selected, results.len())) {
                Some(entry) => PaletteAction::Open(entry.target_view()),
                None => PaletteAction::None,
            },
            "Escape" => PaletteAction::Close,
            _ => PaletteAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Collection, Task, INBOX_ID, INBOX_NAME};

    fn mirror() -> Mirror {
        let mut m = Mirror {
            collections: vec![
                Collection::new(INBOX_ID, INBOX_NAME, "#8B8B8B"),
                Collection::new("work", "Work", "#E8A87C"),
            ],
            ..Default::default()
        };
        m.tasks.push(Task::new("t1", "Write report", "work", 1));
        m.tasks.push(Task::new("t2", "Buy milk", INBOX_ID, 2));
        let mut done = Task::new("t3", "Report done", "work", 3);
        done.done = true;
        m.tasks.push(done);
        m
    }

    #[test]
    fn test_empty_query_lists_collections_then_pending_tasks() {
        let results = search(&mirror(), "");
        let keys: Vec<String> = results.iter().map(PaletteEntry::key).collect();
        assert_eq!(keys, vec!["c-inbox", "c-work", "t-t1", "t-t2"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let results = search(&mirror(), "  REPORT ");
        assert_eq!(results.len(), 1);
        match &results[0] {
            PaletteEntry::Task { collection_name, .. } => assert_eq!(collection_name, "Work"),
            other => panic!("unexpected entry {:?}", other),
        }
    }

    #[test]
    fn test_task_results_are_capped() {
        let mut m = mirror();
        for i in 0..30 {
            m.tasks.push(Task::new(format!("x{}", i), format!("extra {}", i), INBOX_ID, i));
        }
        let tasks = search(&m, "extra")
            .into_iter()
            .filter(|e| matches!(e, PaletteEntry::Task { .. }))
            .count();
        assert_eq!(tasks, MAX_TASK_RESULTS);
    }

    #[test]
    fn test_keyboard_navigation() {
        let results = search(&mirror(), "");
        let mut state = PaletteState::default();

        state.handle_key("ArrowUp", &results);
        assert_eq!(state.selected, 0);
        for _ in 0..10 {
            state.handle_key("ArrowDown", &results);
        }
        assert_eq!(state.selected, 3);
        assert_eq!(
            state.handle_key("Enter", &results),
            PaletteAction::Open(ActiveView::Collection(INBOX_ID.into()))
        );
        assert_eq!(state.handle_key("Escape", &results), PaletteAction::Close);

        state.set_query("zzz".into());
        assert_eq!(state.selected, 0);
        assert_eq!(state.handle_key("Enter", &[]), PaletteAction::None);
    }
}
