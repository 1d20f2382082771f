//! Delete Confirm Button Component
//!
//! Inline confirmation for irreversible actions.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Unanswered confirmations fall back to the plain button after this long
const CONFIRM_TIMEOUT_MS: u32 = 4000;

/// Inline confirmation button
///
/// Shows `label` (default ×) initially. When clicked, shows "Sure?" with
/// ✓/✗ buttons.
///
/// # Arguments
/// * `button_class` - CSS class for the initial button
/// * `label` - Text of the initial button
/// * `on_confirm` - Callback to execute when the user confirms
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into, optional)] label: Option<String>,
    #[prop(into, optional)] title: Option<String>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);
    let label = label.unwrap_or_else(|| "×".to_string());

    let ask = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        set_confirming.set(true);
        spawn_local(async move {
            TimeoutFuture::new(CONFIRM_TIMEOUT_MS).await;
            let _ = set_confirming.try_set(false);
        });
    };

    view! {
        <Show when=move || !confirming.get()>
            <button class=button_class.clone() title=title.clone() on:click=ask>
                {label.clone()}
            </button>
        </Show>
        <Show when=move || confirming.get()>
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Sure?"</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
