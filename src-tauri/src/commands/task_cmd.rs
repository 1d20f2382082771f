//! Tauri Commands for Tasks
//!
//! Exposes task CRUD, ordering and archive operations to the frontend.

use tauri::State;
use nackle_store::{
    ArchivableRepository, ClearScope, PurgeReport, Repository, SortUpdate, Task, DEFAULT_PRIORITY, INBOX_ID,
};
use super::report;
use crate::AppState;

/// Active tasks of active collections, undone first
#[tauri::command]
pub async fn get_tasks(state: State<'_, AppState>) -> Result<Vec<Task>, String> {
    report("get_tasks", state.repos.tasks.list().await)
}

#[tauri::command]
pub async fn get_archived_tasks(state: State<'_, AppState>) -> Result<Vec<Task>, String> {
    report("get_archived_tasks", state.repos.tasks.list_archived().await)
}

/// Create a task at the top of its collection
#[tauri::command]
pub async fn add_task(
    state: State<'_, AppState>,
    id: Option<String>,
    text: String,
    collection_id: Option<String>,
    priority: Option<i64>,
) -> Result<Task, String> {
    let task = Task::new(
        id.unwrap_or_default(),
        text,
        collection_id.unwrap_or_else(|| INBOX_ID.to_string()),
    )
    .with_priority(priority.unwrap_or(DEFAULT_PRIORITY));
    report("add_task", state.repos.tasks.create(&task).await)
}

/// Flip done; returns the new value (`None` if the task is gone)
#[tauri::command]
pub async fn toggle_task(state: State<'_, AppState>, id: String) -> Result<Option<bool>, String> {
    report("toggle_task", state.repos.tasks.toggle(&id).await)
}

#[tauri::command]
pub async fn update_task_text(state: State<'_, AppState>, id: String, text: String) -> Result<(), String> {
    report("update_task_text", state.repos.tasks.update_text(&id, &text).await)
}

#[tauri::command]
pub async fn set_task_priority(state: State<'_, AppState>, id: String, priority: i64) -> Result<(), String> {
    report("set_task_priority", state.repos.tasks.set_priority(&id, priority).await)
}

#[tauri::command]
pub async fn move_task(state: State<'_, AppState>, id: String, collection_id: String) -> Result<(), String> {
    report("move_task", state.repos.tasks.move_to_collection(&id, &collection_id).await)
}

#[tauri::command]
pub async fn archive_task(state: State<'_, AppState>, id: String) -> Result<(), String> {
    report("archive_task", state.repos.tasks.archive(&id).await)
}

#[tauri::command]
pub async fn restore_task(state: State<'_, AppState>, id: String) -> Result<(), String> {
    report("restore_task", state.repos.tasks.restore(&id).await)
}

#[tauri::command]
pub async fn delete_task(state: State<'_, AppState>, id: String) -> Result<(), String> {
    report("delete_task", state.repos.tasks.delete(&id).await)
}

/// Hard delete from the archive view
#[tauri::command]
pub async fn delete_task_forever(state: State<'_, AppState>, id: String) -> Result<(), String> {
    report("delete_task_forever", state.repos.tasks.delete(&id).await)
}

/// Apply client-computed sort orders in one transaction
#[tauri::command]
pub async fn reorder_tasks(state: State<'_, AppState>, updates: Vec<SortUpdate>) -> Result<(), String> {
    report("reorder_tasks", state.repos.tasks.reorder(&updates).await)
}

/// Archive done tasks of one collection, or of all with "all" / "__all__"
#[tauri::command]
pub async fn clear_completed(state: State<'_, AppState>, scope: String) -> Result<usize, String> {
    let scope = ClearScope::parse(&scope);
    report("clear_completed", state.repos.tasks.clear_completed(&scope).await)
}

#[tauri::command]
pub async fn empty_archive(state: State<'_, AppState>) -> Result<PurgeReport, String> {
    report("empty_archive", state.repos.maintenance.empty_archive().await)
}
