//! Top Bar Component
//!
//! Sidebar toggle, view title (click to rename a collection), counts and
//! the bulk archive / purge buttons.

use leptos::prelude::*;

use crate::actions;
use crate::components::DeleteConfirmButton;
use crate::models::INBOX_ID;
use crate::store::{use_ui_store, UiStateStoreFields};
use crate::view_state::{archive_count, header, resolve_collection, split_done, visible_tasks, ActiveView};

fn plural(n: usize, word: &str) -> String {
    format!("{} {}{}", n, word, if n == 1 { "" } else { "s" })
}

#[component]
pub fn TopBar() -> impl IntoView {
    let store = use_ui_store();
    let (editing, set_editing) = signal(false);
    let (edit_name, set_edit_name) = signal(String::new());
    let rename_ref = NodeRef::<leptos::html::Input>::new();

    let view_kind = move || store.active_view().get();
    let head = move || header(&store.mirror().read(), &store.active_view().read());
    let counts = move || {
        let (pending, completed) = split_done(visible_tasks(&store.mirror().read(), &store.active_view().read()));
        (pending.len(), completed.len())
    };
    let archived_total = move || archive_count(&store.mirror().read());

    // Renamable: a real collection other than the inbox
    let rename_target = move || {
        let mirror = store.mirror().read();
        resolve_collection(&mirror, &store.active_view().read())
            .filter(|c| c.id != INBOX_ID)
            .map(|c| (c.id.clone(), c.name.clone()))
    };

    Effect::new(move |_| {
        if editing.get() {
            request_animation_frame(move || {
                if let Some(input) = rename_ref.get_untracked() {
                    let _ = input.focus();
                    input.select();
                }
            });
        }
    });

    let start_rename = move |_| {
        if let Some((_, name)) = rename_target() {
            set_edit_name.set(name);
            set_editing.set(true);
        }
    };

    let save_rename = move || {
        if !editing.get_untracked() {
            return;
        }
        if let Some((id, name)) = rename_target() {
            let trimmed = edit_name.get_untracked().trim().to_string();
            if !trimmed.is_empty() && trimmed != name {
                actions::rename_collection(store, id, &trimmed);
            }
        }
        set_editing.set(false);
    };

    view! {
        <div class="top-bar" data-tauri-drag-region>
            <button
                class="toggle-sidebar"
                on:click=move |_| store.sidebar_open().update(|open| *open = !*open)
            >
                {move || if store.sidebar_open().get() { "◁" } else { "▷" }}
            </button>

            <div class="header-group">
                {move || head().icon.map(|icon| {
                    let style = format!("color: {}", head().color.unwrap_or_default());
                    view! { <span class="header-icon" style=style>{icon}</span> }
                })}
                {move || if editing.get() {
                    view! {
                        <input
                            class="title-input"
                            node_ref=rename_ref
                            prop:value=move || edit_name.get()
                            on:input=move |ev| set_edit_name.set(event_target_value(&ev))
                            on:blur=move |_| save_rename()
                            on:keydown=move |ev| match ev.key().as_str() {
                                "Enter" => save_rename(),
                                "Escape" => set_editing.set(false),
                                _ => {}
                            }
                        />
                    }.into_any()
                } else {
                    let editable = rename_target().is_some();
                    view! {
                        <h1
                            class="header-title"
                            class:header-title-editable=editable
                            title=editable.then_some("Click to rename")
                            on:click=start_rename
                        >
                            {head().title}
                        </h1>
                    }.into_any()
                }}
                {move || match view_kind() {
                    ActiveView::Settings => None,
                    ActiveView::Archive => Some(view! { <span class="count-pill">{plural(archived_total(), "item")}</span> }.into_any()),
                    _ => Some(view! { <span class="count-pill">{plural(counts().0, "task")}</span> }.into_any()),
                }}
            </div>

            <Show when=move || { view_kind().shows_tasks() && counts().1 > 0 }>
                <button class="clear-btn" on:click=move |_| actions::clear_completed(store, &view_kind())>
                    {move || format!("Archive done ({})", counts().1)}
                </button>
            </Show>
            <Show when=move || { view_kind() == ActiveView::Archive && archived_total() > 0 }>
                <DeleteConfirmButton
                    button_class="clear-btn danger-btn"
                    label="Delete all"
                    on_confirm=move |_| actions::empty_archive(store)
                />
            </Show>
        </div>
    }
}
