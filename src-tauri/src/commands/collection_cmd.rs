//! Tauri Commands for Collections
//!
//! Exposes collection CRUD and the archive lifecycle to the frontend.

use tauri::State;
use nackle_store::{ArchivableRepository, Collection, Repository, DEFAULT_COLOR, DEFAULT_ICON};
use super::report;
use crate::AppState;

/// Active collections in sidebar order
#[tauri::command]
pub async fn get_collections(state: State<'_, AppState>) -> Result<Vec<Collection>, String> {
    report("get_collections", state.repos.collections.list().await)
}

#[tauri::command]
pub async fn get_archived_collections(state: State<'_, AppState>) -> Result<Vec<Collection>, String> {
    report("get_archived_collections", state.repos.collections.list_archived().await)
}

/// Create a collection at the end of the sidebar.
/// The frontend passes its own id so it can render the row immediately.
#[tauri::command]
pub async fn add_collection(
    state: State<'_, AppState>,
    id: Option<String>,
    name: String,
    icon: Option<String>,
    color: Option<String>,
) -> Result<Collection, String> {
    let collection = Collection::new(id.unwrap_or_default(), name).with_style(
        icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
        color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
    );
    report("add_collection", state.repos.collections.create(&collection).await)
}

#[tauri::command]
pub async fn rename_collection(state: State<'_, AppState>, id: String, name: String) -> Result<(), String> {
    report("rename_collection", state.repos.collections.rename(&id, &name).await)
}

/// Archive a collection together with its tasks (ignored for the inbox)
#[tauri::command]
pub async fn archive_collection(state: State<'_, AppState>, id: String) -> Result<(), String> {
    report("archive_collection", state.repos.collections.archive(&id).await)
}

#[tauri::command]
pub async fn restore_collection(state: State<'_, AppState>, id: String) -> Result<(), String> {
    report("restore_collection", state.repos.collections.restore(&id).await)
}

/// Permanently delete a collection and its tasks (ignored for the inbox)
#[tauri::command]
pub async fn delete_collection(state: State<'_, AppState>, id: String) -> Result<(), String> {
    report("delete_collection", state.repos.collections.delete(&id).await)
}
