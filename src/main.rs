//! Nackle Frontend Entry Point

mod actions;
mod app;
mod capture;
mod commands;
mod components;
mod ids;
mod models;
mod optimistic;
mod outbox;
mod palette;
mod shortcuts;
mod store;
mod view_state;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
