//! Settings Panel Component
//!
//! Window appearance, theme, version and the wipe-all action.

use leptos::prelude::*;

use crate::actions;
use crate::components::DeleteConfirmButton;
use crate::models::{
    KEY_BACKGROUND_BLUR, KEY_BACKGROUND_BLUR_RADIUS, KEY_BACKGROUND_OPACITY, KEY_FRAMELESS, KEY_THEME, THEMES,
};
use crate::store::{use_ui_store, UiStateStoreFields};
use crate::view_state::{background_alpha, theme_key};

#[component]
pub fn SettingsPanel() -> impl IntoView {
    let store = use_ui_store();

    let setting = move |key: &'static str| move || store.mirror().read().setting(key).map(str::to_string);
    let frameless = setting(KEY_FRAMELESS);
    let blur = setting(KEY_BACKGROUND_BLUR);
    let blur_radius = setting(KEY_BACKGROUND_BLUR_RADIUS);
    let opacity = move || background_alpha(&store.mirror().read().settings);
    let theme = move || theme_key(&store.mirror().read().settings);

    let save_flag = move |key: &'static str| {
        move |ev: web_sys::Event| actions::save_setting(store, key, event_target_checked(&ev).to_string())
    };

    view! {
        <div class="settings-panel">
            <section class="settings-section">
                <div class="section-label">"Window"</div>
                <label class="setting-row">
                    <span class="setting-name">"Frameless window"</span>
                    <input
                        type="checkbox"
                        prop:checked=move || frameless().as_deref() == Some("true")
                        on:change=save_flag(KEY_FRAMELESS)
                    />
                </label>
                <label class="setting-row">
                    <span class="setting-name">"Background opacity"</span>
                    <input
                        type="range"
                        min="0"
                        max="1"
                        step="0.05"
                        prop:value=move || opacity().to_string()
                        on:change=move |ev| actions::save_setting(store, KEY_BACKGROUND_OPACITY, event_target_value(&ev))
                    />
                    <span class="setting-value">{move || format!("{:.0}%", opacity() * 100.0)}</span>
                </label>
                <label class="setting-row">
                    <span class="setting-name">"Background blur"</span>
                    <input
                        type="checkbox"
                        prop:checked=move || blur().as_deref() != Some("false")
                        on:change=save_flag(KEY_BACKGROUND_BLUR)
                    />
                </label>
                <label class="setting-row">
                    <span class="setting-name">"Blur radius"</span>
                    <input
                        type="number"
                        min="0"
                        max="100"
                        prop:value=move || blur_radius().unwrap_or_default()
                        on:change=move |ev| {
                            let radius = event_target_value(&ev).trim().parse::<u32>().unwrap_or(0);
                            actions::save_setting(store, KEY_BACKGROUND_BLUR_RADIUS, radius.to_string());
                        }
                    />
                </label>
            </section>

            <section class="settings-section">
                <div class="section-label">"Theme"</div>
                <select
                    class="theme-select"
                    on:change=move |ev| actions::save_setting(store, KEY_THEME, event_target_value(&ev))
                >
                    {THEMES
                        .iter()
                        .map(|(key, name)| {
                            let key = *key;
                            view! { <option value=key selected=move || theme() == key>{*name}</option> }
                        })
                        .collect_view()}
                </select>
            </section>

            <section class="settings-section">
                <div class="section-label">"About"</div>
                <div class="setting-row">
                    <span class="setting-name">"Version"</span>
                    <span class="setting-value">{move || store.app_version().get()}</span>
                </div>
            </section>

            <section class="settings-section danger-zone">
                <div class="section-label">"Data"</div>
                <div class="setting-row">
                    <span class="setting-name">"Delete every task and collection"</span>
                    <DeleteConfirmButton
                        button_class="danger-btn"
                        label="Wipe all data"
                        on_confirm=move |_| actions::wipe_all_data(store)
                    />
                </div>
            </section>
        </div>
    }
}
