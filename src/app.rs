//! Nackle Frontend App
//!
//! App shell: sidebar, main pane and the two overlays.

use leptos::ev;
use leptos::prelude::*;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals};
use reactive_stores::Store;
use wasm_bindgen::JsCast;

use crate::actions;
use crate::components::{ArchiveView, CommandPalette, QuickCapture, SettingsPanel, Sidebar, TaskList, TopBar};
use crate::models::KEY_FRAMELESS;
use crate::shortcuts::{shortcut_for, Shortcut};
use crate::store::{store_navigate, UiState, UiStateStoreFields, UiStore};
use crate::view_state::{background_alpha, theme_key, ActiveView};

/// Theme attribute and background alpha live on the root element
fn apply_document_theme(theme: &str, alpha: f64) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let _ = root.set_attribute("data-theme", theme);
    if let Some(el) = root.dyn_ref::<web_sys::HtmlElement>() {
        let _ = el.style().set_property("--bg-alpha", &alpha.to_string());
    }
}

fn run_shortcut(store: UiStore, shortcut: Shortcut) {
    match shortcut {
        Shortcut::QuickCapture => {
            store.palette_open().set(false);
            store.capture_open().set(true);
        }
        Shortcut::ToggleSidebar => store.sidebar_open().update(|open| *open = !*open),
        Shortcut::Palette => {
            store.capture_open().set(false);
            store.palette_open().set(true);
        }
        Shortcut::Settings => store_navigate(&store, ActiveView::Settings),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let store: UiStore = Store::new(UiState::new());
    provide_context(store);

    // One drag session for the whole page; rows only report positions
    let dnd = create_dnd_signals();
    provide_context(dnd);
    bind_global_mouseup(dnd, move |from, gap| actions::drop_pending(store, from, gap));

    actions::load_all(store);
    actions::listen_settings(store);

    Effect::new(move |_| {
        let (theme, alpha) = {
            let mirror = store.mirror().read();
            (theme_key(&mirror.settings), background_alpha(&mirror.settings))
        };
        apply_document_theme(&theme, alpha);
    });

    let _ = window_event_listener(ev::keydown, move |ev| {
        if let Some(shortcut) = shortcut_for(&ev.key(), ev.ctrl_key() || ev.meta_key()) {
            ev.prevent_default();
            run_shortcut(store, shortcut);
        }
    });

    let frameless = move || store.mirror().read().setting(KEY_FRAMELESS) == Some("true");

    view! {
        <div class="app-shell" class:frameless=frameless>
            <Show when=move || store.loaded().get()>
                <Show when=move || store.sidebar_open().get()>
                    <Sidebar />
                </Show>
                <main class="main-pane">
                    <TopBar />
                    {move || match store.active_view().get() {
                        ActiveView::Settings => view! { <SettingsPanel /> }.into_any(),
                        ActiveView::Archive => view! { <ArchiveView /> }.into_any(),
                        _ => view! { <TaskList /> }.into_any(),
                    }}
                </main>
                <CommandPalette />
                <QuickCapture />
            </Show>
        </div>
    }
}
