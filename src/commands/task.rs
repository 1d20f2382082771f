//! Task Commands

use serde::Serialize;

use super::{call, call_unit, fetch, IdArgs};
use crate::models::{PurgeReport, SortUpdate, Task};
use crate::view_state::ALL_VIEW;

#[derive(Serialize)]
struct AddTaskArgs<'a> {
    id: &'a str,
    text: &'a str,
    #[serde(rename = "collectionId")]
    collection_id: &'a str,
    priority: i64,
}

#[derive(Serialize)]
struct TextArgs<'a> {
    id: &'a str,
    text: &'a str,
}

#[derive(Serialize)]
struct MoveTaskArgs<'a> {
    id: &'a str,
    #[serde(rename = "collectionId")]
    collection_id: &'a str,
}

#[derive(Serialize)]
struct ReorderArgs<'a> {
    updates: &'a [SortUpdate],
}

#[derive(Serialize)]
struct ScopeArgs<'a> {
    scope: &'a str,
}

pub async fn get_tasks() -> Result<Vec<Task>, String> {
    fetch("get_tasks").await
}

pub async fn get_archived_tasks() -> Result<Vec<Task>, String> {
    fetch("get_archived_tasks").await
}

/// Insert with the client-generated id; returns the stored row
pub async fn add_task(task: &Task) -> Result<Task, String> {
    let args = AddTaskArgs {
        id: &task.id,
        text: &task.text,
        collection_id: &task.collection_id,
        priority: task.priority,
    };
    call("add_task", &args).await
}

/// New `done` value, `None` when the task is gone
pub async fn toggle_task(id: &str) -> Result<Option<bool>, String> {
    call("toggle_task", &IdArgs { id }).await
}

pub async fn update_task_text(id: &str, text: &str) -> Result<(), String> {
    call_unit("update_task_text", &TextArgs { id, text }).await
}

pub async fn move_task(id: &str, collection_id: &str) -> Result<(), String> {
    call_unit("move_task", &MoveTaskArgs { id, collection_id }).await
}

pub async fn archive_task(id: &str) -> Result<(), String> {
    call_unit("archive_task", &IdArgs { id }).await
}

pub async fn restore_task(id: &str) -> Result<(), String> {
    call_unit("restore_task", &IdArgs { id }).await
}

pub async fn delete_task(id: &str) -> Result<(), String> {
    call_unit("delete_task", &IdArgs { id }).await
}

pub async fn delete_task_forever(id: &str) -> Result<(), String> {
    call_unit("delete_task_forever", &IdArgs { id }).await
}

pub async fn reorder_tasks(updates: &[SortUpdate]) -> Result<(), String> {
    call_unit("reorder_tasks", &ReorderArgs { updates }).await
}

/// Archive done tasks of one collection, or of all when `None`
pub async fn clear_completed(collection_id: Option<&str>) -> Result<usize, String> {
    let scope = collection_id.unwrap_or(ALL_VIEW);
    call("clear_completed", &ScopeArgs { scope }).await
}

pub async fn empty_archive() -> Result<PurgeReport, String> {
    fetch("empty_archive").await
}
