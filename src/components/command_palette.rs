//! Command Palette Component
//!
//! Ctrl/Cmd+P overlay searching collections and pending tasks.

use leptos::prelude::*;

use crate::palette::{search, PaletteAction, PaletteEntry, PaletteState};
use crate::store::{store_navigate, use_ui_store, UiStateStoreFields};

#[component]
pub fn CommandPalette() -> impl IntoView {
    let store = use_ui_store();
    let state = RwSignal::new(PaletteState::default());
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let results = Memo::new(move |_| {
        let query = state.with(|s| s.query.clone());
        search(&store.mirror().read(), &query)
    });

    // Fresh query each time it opens
    Effect::new(move |_| {
        if store.palette_open().get() {
            state.set(PaletteState::default());
            request_animation_frame(move || {
                if let Some(input) = input_ref.get_untracked() {
                    let _ = input.focus();
                }
            });
        }
    });

    let run = move |action: PaletteAction| match action {
        PaletteAction::Open(view) => store_navigate(&store, view),
        PaletteAction::Close => store.palette_open().set(false),
        PaletteAction::None => {}
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let key = ev.key();
        if matches!(key.as_str(), "ArrowDown" | "ArrowUp" | "Enter") {
            ev.prevent_default();
        }
        let mut next = state.get_untracked();
        let action = results.with_untracked(|r| next.handle_key(&key, r));
        state.set(next);
        run(action);
    };

    let rows = move || {
        let selected = state.with(|s| s.selected);
        let mut section = "";
        results
            .get()
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let label = match entry {
                    PaletteEntry::Collection { .. } => "Collections",
                    PaletteEntry::Task { .. } => "Tasks",
                };
                let heading = (label != section).then(|| view! { <div class="section-label">{label}</div> });
                section = label;
                let target = entry.target_view();
                let body = match entry {
                    PaletteEntry::Collection { name, icon, color, .. } => view! {
                        <span class="item-icon" style=format!("color: {}", color)>{icon}</span>
                        <span class="item-text">{name}</span>
                        <span class="item-meta"></span>
                    }.into_any(),
                    PaletteEntry::Task { text, collection_name, collection_color, .. } => view! {
                        <span class="item-icon task-dot">"■"</span>
                        <span class="item-text">{text}</span>
                        <span class="item-meta" style=format!("color: {}", collection_color)>{collection_name}</span>
                    }.into_any(),
                };
                view! {
                    {heading}
                    <div
                        class="palette-item"
                        class:active=i == selected
                        on:mouseenter=move |_| state.update(|s| s.selected = i)
                        on:click=move |_| run(PaletteAction::Open(target.clone()))
                    >
                        {body}
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <Show when=move || store.palette_open().get()>
            <div
                class="overlay"
                on:mousedown=move |ev| {
                    if ev.target() == ev.current_target() {
                        store.palette_open().set(false);
                    }
                }
            >
                <div class="modal palette">
                    <div class="input-row">
                        <span class="search-icon">"⌕"</span>
                        <input
                            class="modal-input"
                            placeholder="Search collections and tasks..."
                            node_ref=input_ref
                            prop:value=move || state.with(|s| s.query.clone())
                            on:input=move |ev| state.update(|s| s.set_query(event_target_value(&ev)))
                            on:keydown=on_keydown
                        />
                        <span class="hint">"esc"</span>
                    </div>
                    <div class="modal-list">
                        <Show when=move || results.with(|r| r.is_empty())>
                            <div class="empty-state">"No results"</div>
                        </Show>
                        {rows}
                    </div>
                </div>
            </div>
        </Show>
    }
}
