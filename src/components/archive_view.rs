//! Archive View Component
//!
//! Archived collections and tasks with restore / delete-forever actions.

use leptos::prelude::*;

use crate::actions;
use crate::components::{DeleteConfirmButton, TaskItem};
use crate::models::Collection;
use crate::store::{use_ui_store, UiStateStoreFields};
use crate::view_state::archive_count;

#[component]
pub fn ArchiveView() -> impl IntoView {
    let store = use_ui_store();
    let archived_collections = move || store.mirror().read().archived_collections.clone();
    let archived_tasks = move || store.mirror().read().archived_tasks.clone();

    view! {
        <div class="archive-view">
            <Show when=move || archive_count(&store.mirror().read()) == 0>
                <div class="empty-state">
                    <span class="empty-icon">"⌂"</span>
                    <span>"Archive is empty"</span>
                </div>
            </Show>

            <Show when=move || !store.mirror().read().archived_collections.is_empty()>
                <div class="section-label">"Collections"</div>
                <For
                    each=archived_collections
                    key=|c| (c.id.clone(), c.name.clone())
                    children=move |c| view! { <ArchivedCollectionRow collection=c /> }
                />
            </Show>

            <Show when=move || !store.mirror().read().archived_tasks.is_empty()>
                <div class="section-label">"Tasks"</div>
                <For
                    each=archived_tasks
                    key=|t| (t.id.clone(), t.text.clone(), t.collection_id.clone())
                    children=move |t| view! { <TaskItem task=t archived=true show_collection=true /> }
                />
            </Show>
        </div>
    }
}

#[component]
fn ArchivedCollectionRow(collection: Collection) -> impl IntoView {
    let store = use_ui_store();
    let id = StoredValue::new(collection.id.clone());
    let style = format!("color: {}", collection.color);
    let task_count = move || {
        store
            .mirror()
            .read()
            .archived_tasks
            .iter()
            .filter(|t| t.collection_id == id.get_value())
            .count()
    };

    view! {
        <div class="archived-collection">
            <span class="collection-icon" style=style>{collection.icon}</span>
            <span class="collection-name">{collection.name}</span>
            <span class="badge">{task_count}</span>
            <button
                class="action-btn restore-btn"
                title="Restore collection"
                on:click=move |_| actions::restore_collection(store, id.get_value())
            >
                "↺"
            </button>
            <DeleteConfirmButton
                button_class="action-btn del-btn"
                title="Delete forever"
                on_confirm=move |_| actions::delete_collection(store, id.get_value())
            />
        </div>
    }
}
