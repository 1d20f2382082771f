//! User Actions
//!
//! Each action builds a `Mutation`, applies it to the mirror right away and
//! queues it for the backend behind every earlier action. A rejected call
//! rolls the mirror back with the compensation `Mirror::apply` returned.

use std::cell::RefCell;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::capture::{capture_mutations, CaptureChoice};
use crate::commands::{self, Stored};
use crate::ids::{generate_id, now_millis};
use crate::models::{next_collection_color, Collection, SettingsMap, Task, INBOX_ID};
use crate::optimistic::{Compensation, Mirror, Mutation};
use crate::outbox::{Batch, Outbox};
use crate::store::{store_navigate, UiStore, UiStateStoreFields};
use crate::view_state::{reorder_updates, split_done, visible_tasks, ActiveView};

fn log_error(context: &str, err: &str) {
    web_sys::console::error_1(&format!("[{}] {}", context, err).into());
}

pub fn dispatch(store: UiStore, mutation: Mutation) {
    dispatch_all(store, vec![mutation]);
}

thread_local! {
    static OUTBOX: RefCell<Outbox> = RefCell::new(Outbox::default());
}

/// Apply all mutations now and queue them for the backend behind every
/// earlier dispatch.
pub fn dispatch_all(store: UiStore, mutations: Vec<Mutation>) {
    let batch: Batch = {
        let mirror_field = store.mirror();
        let mut mirror = mirror_field.write();
        mutations
            .into_iter()
            .map(|m| {
                let comp = mirror.apply(&m);
                (m, comp)
            })
            .collect()
    };
    if OUTBOX.with(|outbox| outbox.borrow_mut().push(batch)) {
        spawn_local(drain_outbox(store));
    }
}

async fn drain_outbox(store: UiStore) {
    while let Some(batch) = OUTBOX.with(|outbox| outbox.borrow_mut().next_batch()) {
        send_batch(store, batch).await;
    }
}

/// Send one batch in order. When a call fails it and every later one in
/// the batch are compensated, newest first.
async fn send_batch(store: UiStore, batch: Batch) {
    let mut queue = batch.into_iter();
    while let Some((mutation, comp)) = queue.next() {
        match commands::send(&mutation).await {
            Ok(Stored::Collection(stored)) => store.mirror().write().merge_stored_collection(&stored),
            Ok(Stored::Task(stored)) => store.mirror().write().merge_stored_task(&stored),
            Ok(Stored::Nothing) => {}
            Err(e) => {
                log_error(mutation.command_name(), &e);
                let mut undo: Vec<Compensation> = vec![comp];
                undo.extend(queue.by_ref().map(|(_, c)| c));
                let mirror_field = store.mirror();
                let mut mirror = mirror_field.write();
                for comp in undo.into_iter().rev() {
                    mirror.compensate(comp);
                }
                return;
            }
        }
    }
}

/// Fetch everything from the backend into a fresh mirror
pub async fn fetch_mirror() -> Result<Mirror, String> {
    Ok(Mirror {
        collections: commands::get_collections().await?,
        archived_collections: commands::get_archived_collections().await?,
        tasks: commands::get_tasks().await?,
        archived_tasks: commands::get_archived_tasks().await?,
        settings: commands::get_settings().await?,
    })
}

pub fn load_all(store: UiStore) {
    spawn_local(async move {
        match fetch_mirror().await {
            Ok(mirror) => {
                web_sys::console::log_1(
                    &format!(
                        "[APP] Loaded {} collections, {} tasks",
                        mirror.collections.len(),
                        mirror.tasks.len()
                    )
                    .into(),
                );
                store.mirror().set(mirror);
            }
            Err(e) => log_error("load", &e),
        }
        match commands::get_app_version().await {
            Ok(version) => store.app_version().set(version),
            Err(e) => log_error("get_app_version", &e),
        }
        store.loaded().set(true);
    });
}

/// Settings pushed by the backend replace ours
pub fn listen_settings(store: UiStore) {
    spawn_local(async move {
        let result = commands::listen_event(commands::SETTINGS_UPDATED, move |settings: SettingsMap| {
            store.mirror().write().settings = settings;
        })
        .await;
        if let Err(e) = result {
            log_error("listen", &e);
        }
    });
}

pub fn navigate(store: UiStore, view: ActiveView) {
    store_navigate(&store, view);
}

// ========================
// Collections
// ========================

/// Returns the id of the new collection
pub fn add_collection(store: UiStore, name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let id = generate_id();
    let collection = {
        let mirror = store.mirror().read_untracked();
        let mut c = Collection::new(id.clone(), name, next_collection_color(mirror.collections.len()));
        c.sort_order = mirror.collections.iter().map(|c| c.sort_order).max().unwrap_or(0) + 1;
        c
    };
    dispatch(store, Mutation::AddCollection(collection));
    Some(id)
}

pub fn rename_collection(store: UiStore, id: String, name: &str) {
    let name = name.trim();
    if name.is_empty() || id == INBOX_ID {
        return;
    }
    dispatch(store, Mutation::RenameCollection { id, name: name.to_string() });
}

/// Leaves the collection's view if it was open
fn leave_collection(store: UiStore, id: &str) {
    if store.active_view().get_untracked().collection_id() == Some(id) {
        store.active_view().set(ActiveView::default());
    }
}

pub fn archive_collection(store: UiStore, id: String) {
    if id == INBOX_ID {
        return;
    }
    leave_collection(store, &id);
    dispatch(store, Mutation::ArchiveCollection { id, at: now_millis() });
}

pub fn restore_collection(store: UiStore, id: String) {
    dispatch(store, Mutation::RestoreCollection { id });
}

pub fn delete_collection(store: UiStore, id: String) {
    if id == INBOX_ID {
        return;
    }
    leave_collection(store, &id);
    dispatch(store, Mutation::DeleteCollection { id });
}

// ========================
// Tasks
// ========================

pub fn add_task(store: UiStore, text: &str, collection_id: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    let task = Task::new(generate_id(), text, collection_id, now_millis());
    dispatch(store, Mutation::AddTask(task));
}

pub fn toggle_task(store: UiStore, id: String) {
    dispatch(store, Mutation::ToggleTask { id });
}

pub fn update_task_text(store: UiStore, id: String, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    dispatch(store, Mutation::UpdateTaskText { id, text: text.to_string() });
}

pub fn move_task(store: UiStore, id: String, collection_id: String) {
    dispatch(store, Mutation::MoveTask { id, collection_id });
}

pub fn archive_task(store: UiStore, id: String) {
    dispatch(store, Mutation::ArchiveTask { id, at: now_millis() });
}

pub fn restore_task(store: UiStore, id: String) {
    dispatch(store, Mutation::RestoreTask { id });
}

pub fn delete_task(store: UiStore, id: String) {
    dispatch(store, Mutation::DeleteTask { id });
}

pub fn delete_task_forever(store: UiStore, id: String) {
    dispatch(store, Mutation::DeleteTaskForever { id });
}

/// Drop pending row `from` into `gap`
pub fn reorder(store: UiStore, pending: &[Task], from: usize, gap: usize) {
    if let Some(updates) = reorder_updates(pending, from, gap) {
        dispatch(store, Mutation::ReorderTasks(updates));
    }
}

/// Global mouseup landed a drag; only concrete collection views reorder
pub fn drop_pending(store: UiStore, from: usize, gap: usize) {
    let view = store.active_view().get_untracked();
    if !view.can_drag() {
        return;
    }
    let (pending, _) = split_done(visible_tasks(&store.mirror().read_untracked(), &view));
    reorder(store, &pending, from, gap);
}

pub fn clear_completed(store: UiStore, view: &ActiveView) {
    let collection_id = view.collection_id().map(str::to_string);
    dispatch(store, Mutation::ClearCompleted { collection_id, at: now_millis() });
}

pub fn empty_archive(store: UiStore) {
    dispatch(store, Mutation::EmptyArchive);
}

/// Create the collection first when needed, then the task
pub fn capture(store: UiStore, choice: &CaptureChoice, text: &str) {
    let (mutations, view) = {
        let mirror = store.mirror().read_untracked();
        capture_mutations(choice, text, &mirror.collections, generate_id(), generate_id(), now_millis())
    };
    dispatch_all(store, mutations);
    store_navigate(&store, view);
}

// ========================
// Settings
// ========================

pub fn save_setting(store: UiStore, key: &str, value: String) {
    dispatch(store, Mutation::SaveSetting { key: key.to_string(), value });
}

/// Not optimistic: wipe, then reload everything
pub fn wipe_all_data(store: UiStore) {
    spawn_local(async move {
        if let Err(e) = commands::wipe_all_data().await {
            log_error("wipe_all_data", &e);
            return;
        }
        match fetch_mirror().await {
            Ok(mirror) => store.mirror().set(mirror),
            Err(e) => log_error("load", &e),
        }
        store.active_view().set(ActiveView::default());
    });
}
