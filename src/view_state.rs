//! Derived View State
//!
//! Everything the views show is computed from the mirror on each render:
//! the active view, filtered and sorted task lists, counts and lookups.

use crate::models::{
    Collection, SettingsMap, SortUpdate, Task, DEFAULT_COLOR, DEFAULT_THEME, INBOX_ID, INBOX_NAME,
    KEY_BACKGROUND_OPACITY, KEY_THEME,
};
use crate::optimistic::Mirror;

pub const ALL_VIEW: &str = "__all__";
pub const ARCHIVE_VIEW: &str = "__archive__";
pub const SETTINGS_VIEW: &str = "__settings__";

/// What the main pane is showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveView {
    All,
    Archive,
    Settings,
    Collection(String),
}

impl Default for ActiveView {
    fn default() -> Self {
        ActiveView::Collection(INBOX_ID.to_string())
    }
}

impl ActiveView {
    pub fn parse(key: &str) -> Self {
        match key {
            ALL_VIEW => ActiveView::All,
            ARCHIVE_VIEW => ActiveView::Archive,
            SETTINGS_VIEW => ActiveView::Settings,
            id => ActiveView::Collection(id.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            ActiveView::All => ALL_VIEW,
            ActiveView::Archive => ARCHIVE_VIEW,
            ActiveView::Settings => SETTINGS_VIEW,
            ActiveView::Collection(id) => id,
        }
    }

    pub fn collection_id(&self) -> Option<&str> {
        match self {
            ActiveView::Collection(id) => Some(id),
            _ => None,
        }
    }

    pub fn shows_tasks(&self) -> bool {
        matches!(self, ActiveView::All | ActiveView::Collection(_))
    }

    /// Drag to reorder only makes sense inside one collection
    pub fn can_drag(&self) -> bool {
        matches!(self, ActiveView::Collection(_))
    }

    /// Collection new tasks typed into the list go to
    pub fn add_target(&self) -> &str {
        self.collection_id().unwrap_or(INBOX_ID)
    }
}

/// Not-done first, then stored order, then newest first
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.done
            .cmp(&b.done)
            .then(a.sort_order.cmp(&b.sort_order))
            .then(b.created_at.cmp(&a.created_at))
    });
}

/// Active tasks shown by `view`, sorted; tasks of archived collections are hidden
pub fn visible_tasks(mirror: &Mirror, view: &ActiveView) -> Vec<Task> {
    let mut tasks: Vec<Task> = match view {
        ActiveView::All => mirror
            .tasks
            .iter()
            .filter(|t| mirror.collections.iter().any(|c| c.id == t.collection_id))
            .cloned()
            .collect(),
        ActiveView::Collection(id) => mirror
            .tasks
            .iter()
            .filter(|t| &t.collection_id == id)
            .cloned()
            .collect(),
        ActiveView::Archive | ActiveView::Settings => Vec::new(),
    };
    sort_tasks(&mut tasks);
    tasks
}

/// Split a sorted list into (pending, completed)
pub fn split_done(tasks: Vec<Task>) -> (Vec<Task>, Vec<Task>) {
    tasks.into_iter().partition(|t| !t.done)
}

pub fn priority_label(index: usize) -> String {
    format!("P{}", index)
}

/// 0.0 for the top pending task, 1.0 for the bottom one
pub fn priority_ratio(index: usize, pending: usize) -> f64 {
    if pending < 2 {
        return 0.0;
    }
    index as f64 / (pending - 1) as f64
}

pub fn pending_count(mirror: &Mirror, collection_id: &str) -> usize {
    mirror
        .tasks
        .iter()
        .filter(|t| !t.done && t.collection_id == collection_id)
        .count()
}

pub fn archive_count(mirror: &Mirror) -> usize {
    mirror.archived_tasks.len() + mirror.archived_collections.len()
}

pub fn collection_name(mirror: &Mirror, id: &str) -> String {
    mirror
        .collection(id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| INBOX_NAME.to_string())
}

pub fn collection_color(mirror: &Mirror, id: &str) -> String {
    mirror
        .collection(id)
        .map(|c| c.color.clone())
        .unwrap_or_else(|| DEFAULT_COLOR.to_string())
}

/// Collection a task-list view is about; unknown ids fall back to the first one
pub fn resolve_collection<'a>(mirror: &'a Mirror, view: &ActiveView) -> Option<&'a Collection> {
    let id = view.collection_id()?;
    mirror
        .collections
        .iter()
        .find(|c| c.id == id)
        .or_else(|| mirror.collections.first())
}

/// Title and accent color shown above the main pane
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub title: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

pub fn header(mirror: &Mirror, view: &ActiveView) -> Header {
    let fixed = |title: &str| Header {
        title: title.to_string(),
        icon: None,
        color: None,
    };
    match view {
        ActiveView::All => fixed("All Tasks"),
        ActiveView::Archive => fixed("Archive"),
        ActiveView::Settings => fixed("Settings"),
        ActiveView::Collection(_) => match resolve_collection(mirror, view) {
            Some(c) => Header {
                title: c.name.clone(),
                icon: Some(c.icon.clone()),
                color: Some(c.color.clone()),
            },
            None => fixed(INBOX_NAME),
        },
    }
}

/// New sort orders after dragging pending row `from` into `gap`
pub fn reorder_updates(pending: &[Task], from: usize, gap: usize) -> Option<Vec<SortUpdate>> {
    let reordered = leptos_dragdrop::reorder(pending, from, gap)?;
    Some(
        reordered
            .iter()
            .enumerate()
            .map(|(i, t)| SortUpdate {
                id: t.id.clone(),
                sort_order: i as i64,
            })
            .collect(),
    )
}

/// Value for the `--bg-alpha` CSS variable
pub fn background_alpha(settings: &SettingsMap) -> f64 {
    match settings.get(KEY_BACKGROUND_OPACITY).and_then(|v| v.trim().parse::<f64>().ok()) {
        Some(alpha) if !alpha.is_nan() => alpha.clamp(0.0, 1.0),
        _ => 1.0,
    }
}

pub fn theme_key(settings: &SettingsMap) -> String {
    settings
        .get(KEY_THEME)
        .filter(|t| !t.is_empty())
        .cloned()
        .unwrap_or_else(|| DEFAULT_THEME.to_string())
}
