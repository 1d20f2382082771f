//! Sidebar Component
//!
//! Navigation entries, the collection list with pending counts, inline
//! rename and the new-collection input.

use leptos::prelude::*;

use crate::actions;
use crate::components::DeleteConfirmButton;
use crate::models::Collection;
use crate::store::{use_ui_store, UiStateStoreFields};
use crate::view_state::{archive_count, pending_count, split_done, visible_tasks, ActiveView};

#[component]
pub fn Sidebar() -> impl IntoView {
    let store = use_ui_store();
    let (show_new, set_show_new) = signal(false);
    let (new_name, set_new_name) = signal(String::new());
    let new_ref = NodeRef::<leptos::html::Input>::new();

    let is_view = move |view: ActiveView| store.active_view().with(|v| *v == view);
    let all_count = move || split_done(visible_tasks(&store.mirror().read(), &ActiveView::All)).0.len();
    let archived_total = move || archive_count(&store.mirror().read());

    Effect::new(move |_| {
        if show_new.get() {
            request_animation_frame(move || {
                if let Some(input) = new_ref.get_untracked() {
                    let _ = input.focus();
                }
            });
        }
    });

    let submit_new = move || {
        if let Some(id) = actions::add_collection(store, &new_name.get_untracked()) {
            actions::navigate(store, ActiveView::Collection(id));
        }
        set_new_name.set(String::new());
        set_show_new.set(false);
    };

    view! {
        <aside class="sidebar">
            <div class="drag-region" data-tauri-drag-region></div>
            <div class="sidebar-header">
                <span class="logo">"◆"</span>
                <span class="logo-text">"NACKLE"</span>
            </div>

            <nav class="sidebar-nav">
                <div
                    class="collection-item"
                    class:active=move || is_view(ActiveView::All)
                    on:click=move |_| actions::navigate(store, ActiveView::All)
                >
                    <span class="collection-icon">"☰"</span>
                    <span class="collection-name">"All Tasks"</span>
                    <Show when=move || { all_count() > 0 }>
                        <span class="badge">{all_count}</span>
                    </Show>
                </div>
                <div
                    class="collection-item"
                    class:active=move || is_view(ActiveView::Archive)
                    on:click=move |_| actions::navigate(store, ActiveView::Archive)
                >
                    <span class="collection-icon">"⌂"</span>
                    <span class="collection-name">"Archive"</span>
                    <Show when=move || { archived_total() > 0 }>
                        <span class="badge">{archived_total}</span>
                    </Show>
                </div>
            </nav>

            <div class="collections-header">
                <span class="section-label">"Collections"</span>
                <button class="add-collection-btn" title="New collection" on:click=move |_| set_show_new.set(true)>
                    "+"
                </button>
            </div>

            <div class="collection-list">
                <For
                    each=move || store.mirror().read().collections.clone()
                    key=|c| (c.id.clone(), c.name.clone(), c.icon.clone(), c.color.clone())
                    children=move |collection| view! { <CollectionRow collection=collection /> }
                />
                <Show when=move || show_new.get()>
                    <input
                        class="inline-edit new-collection-input"
                        placeholder="Collection name"
                        node_ref=new_ref
                        prop:value=move || new_name.get()
                        on:input=move |ev| set_new_name.set(event_target_value(&ev))
                        on:blur=move |_| {
                            if new_name.get_untracked().trim().is_empty() {
                                set_show_new.set(false);
                            }
                        }
                        on:keydown=move |ev| match ev.key().as_str() {
                            "Enter" => submit_new(),
                            "Escape" => {
                                set_new_name.set(String::new());
                                set_show_new.set(false);
                            }
                            _ => {}
                        }
                    />
                </Show>
            </div>

            <div class="sidebar-footer">
                <div
                    class="collection-item"
                    class:active=move || is_view(ActiveView::Settings)
                    on:click=move |_| actions::navigate(store, ActiveView::Settings)
                >
                    <span class="collection-icon">"⚙"</span>
                    <span class="collection-name">"Settings"</span>
                </div>
            </div>
        </aside>
    }
}

/// One collection entry; double-click renames
#[component]
fn CollectionRow(collection: Collection) -> impl IntoView {
    let store = use_ui_store();
    let (editing, set_editing) = signal(false);
    let (edit_name, set_edit_name) = signal(String::new());
    let edit_ref = NodeRef::<leptos::html::Input>::new();

    let id = StoredValue::new(collection.id.clone());
    let is_inbox = collection.is_inbox();
    let name = collection.name.clone();
    let original_name = collection.name.clone();
    let icon_style = format!("color: {}", collection.color);
    let is_active = move || store.active_view().with(|v| v.collection_id() == Some(id.get_value().as_str()));
    let count = move || pending_count(&store.mirror().read(), &id.get_value());

    Effect::new(move |_| {
        if editing.get() {
            request_animation_frame(move || {
                if let Some(input) = edit_ref.get_untracked() {
                    let _ = input.focus();
                    input.select();
                }
            });
        }
    });

    let start_edit = move |_| {
        if is_inbox {
            return;
        }
        set_edit_name.set(original_name.clone());
        set_editing.set(true);
    };

    let save_edit = move || {
        if editing.get_untracked() {
            actions::rename_collection(store, id.get_value(), &edit_name.get_untracked());
            set_editing.set(false);
        }
    };

    view! {
        <div
            class="collection-item"
            class:active=is_active
            on:click=move |_| actions::navigate(store, ActiveView::Collection(id.get_value()))
            on:dblclick=start_edit
        >
            <span class="collection-icon" style=icon_style>
                {collection.icon}
            </span>
            {move || if editing.get() {
                view! {
                    <input
                        class="inline-edit"
                        node_ref=edit_ref
                        prop:value=move || edit_name.get()
                        on:input=move |ev| set_edit_name.set(event_target_value(&ev))
                        on:click=move |ev| ev.stop_propagation()
                        on:blur=move |_| save_edit()
                        on:keydown=move |ev| match ev.key().as_str() {
                            "Enter" => save_edit(),
                            "Escape" => set_editing.set(false),
                            _ => {}
                        }
                    />
                }.into_any()
            } else {
                view! { <span class="collection-name">{name.clone()}</span> }.into_any()
            }}
            <Show when=move || { count() > 0 }>
                <span class="badge">{count}</span>
            </Show>
            <Show when=move || is_active() && !is_inbox>
                <div class="col-actions">
                    <button
                        class="col-action-btn col-archive-btn"
                        title="Archive collection"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            actions::archive_collection(store, id.get_value());
                        }
                    >
                        "⌂"
                    </button>
                    <DeleteConfirmButton
                        button_class="col-action-btn col-del-btn"
                        title="Delete collection"
                        on_confirm=move |_| actions::delete_collection(store, id.get_value())
                    />
                </div>
            </Show>
        </div>
    }
}
