//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod collection;
mod settings;
mod task;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::models::{Collection, Task};
use crate::optimistic::Mutation;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"], catch)]
    async fn listen(event: &str, handler: &Closure<dyn FnMut(JsValue)>) -> Result<JsValue, JsValue>;
}

pub use collection::*;
pub use settings::*;
pub use task::*;

/// Command errors arrive as plain strings
fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

async fn call<A: Serialize, R: DeserializeOwned>(cmd: &str, args: &A) -> Result<R, String> {
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    let result = invoke(cmd, js_args).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

async fn call_unit<A: Serialize>(cmd: &str, args: &A) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    invoke(cmd, js_args).await.map_err(js_error)?;
    Ok(())
}

async fn fetch<R: DeserializeOwned>(cmd: &str) -> Result<R, String> {
    let result = invoke(cmd, JsValue::NULL).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

#[derive(Deserialize)]
struct EventEnvelope<T> {
    payload: T,
}

/// Subscribe to a backend push event for the lifetime of the page
pub async fn listen_event<T, F>(event: &str, mut handler: F) -> Result<(), String>
where
    T: DeserializeOwned + 'static,
    F: FnMut(T) + 'static,
{
    let name = event.to_string();
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |raw: JsValue| {
        match serde_wasm_bindgen::from_value::<EventEnvelope<T>>(raw) {
            Ok(envelope) => handler(envelope.payload),
            Err(e) => web_sys::console::error_1(&format!("[EVENT] bad {} payload: {}", name, e).into()),
        }
    });
    listen(event, &closure).await.map_err(js_error)?;
    closure.forget();
    Ok(())
}

/// Row the backend stored for an optimistic insert
pub enum Stored {
    Nothing,
    Collection(Collection),
    Task(Task),
}

/// Send one mutation to its backend command
pub async fn send(mutation: &Mutation) -> Result<Stored, String> {
    match mutation {
        Mutation::AddCollection(c) => add_collection(c).await.map(Stored::Collection),
        Mutation::RenameCollection { id, name } => rename_collection(id, name).await.map(|_| Stored::Nothing),
        Mutation::ArchiveCollection { id, .. } => archive_collection(id).await.map(|_| Stored::Nothing),
        Mutation::RestoreCollection { id } => restore_collection(id).await.map(|_| Stored::Nothing),
        Mutation::DeleteCollection { id } => delete_collection(id).await.map(|_| Stored::Nothing),
        Mutation::AddTask(t) => add_task(t).await.map(Stored::Task),
        Mutation::ToggleTask { id } => toggle_task(id).await.map(|_| Stored::Nothing),
        Mutation::UpdateTaskText { id, text } => update_task_text(id, text).await.map(|_| Stored::Nothing),
        Mutation::MoveTask { id, collection_id } => move_task(id, collection_id).await.map(|_| Stored::Nothing),
        Mutation::ArchiveTask { id, .. } => archive_task(id).await.map(|_| Stored::Nothing),
        Mutation::RestoreTask { id } => restore_task(id).await.map(|_| Stored::Nothing),
        Mutation::DeleteTask { id } => delete_task(id).await.map(|_| Stored::Nothing),
        Mutation::DeleteTaskForever { id } => delete_task_forever(id).await.map(|_| Stored::Nothing),
        Mutation::ReorderTasks(updates) => reorder_tasks(updates).await.map(|_| Stored::Nothing),
        Mutation::ClearCompleted { collection_id, .. } => {
            clear_completed(collection_id.as_deref()).await.map(|_| Stored::Nothing)
        }
        Mutation::EmptyArchive => empty_archive().await.map(|_| Stored::Nothing),
        Mutation::SaveSetting { key, value } => save_setting(key, value).await.map(|_| Stored::Nothing),
    }
}
