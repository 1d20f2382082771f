//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::optimistic::Mirror;
use crate::view_state::ActiveView;

/// Global UI state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// Local copy of everything the backend holds
    pub mirror: Mirror,
    pub active_view: ActiveView,
    pub sidebar_open: bool,
    pub palette_open: bool,
    pub capture_open: bool,
    pub app_version: String,
    /// Set once the first full load has finished
    pub loaded: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            sidebar_open: true,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type UiStore = Store<UiState>;

/// Get the UI store from context
pub fn use_ui_store() -> UiStore {
    expect_context::<UiStore>()
}

/// Switch the main pane, closing any open overlay
pub fn store_navigate(store: &UiStore, view: ActiveView) {
    store.active_view().set(view);
    store.palette_open().set(false);
    store.capture_open().set(false);
}
