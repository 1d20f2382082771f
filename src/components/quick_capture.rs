//! Quick Capture Component
//!
//! Ctrl/Cmd+N overlay: pick or create a collection, then type the task.

use leptos::prelude::*;

use crate::actions;
use crate::capture::{CaptureChoice, CaptureOutcome, CaptureState, CaptureStep};
use crate::store::{use_ui_store, UiStateStoreFields};

#[component]
pub fn QuickCapture() -> impl IntoView {
    let store = use_ui_store();
    let state = RwSignal::new(CaptureState::default());
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let options = Memo::new(move |_| {
        let mirror = store.mirror().read();
        state.with(|s| s.options(&mirror.collections))
    });

    let focus_input = move || {
        request_animation_frame(move || {
            if let Some(input) = input_ref.get_untracked() {
                let _ = input.focus();
            }
        });
    };

    Effect::new(move |_| {
        if store.capture_open().get() {
            state.set(CaptureState::default());
            focus_input();
        }
    });

    let run = move |outcome: CaptureOutcome| match outcome {
        CaptureOutcome::Submit { choice, text } => actions::capture(store, &choice, &text),
        CaptureOutcome::Close => store.capture_open().set(false),
        CaptureOutcome::None => {}
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let key = ev.key();
        if matches!(key.as_str(), "ArrowDown" | "ArrowUp" | "Enter") {
            ev.prevent_default();
        }
        let step_before = state.with_untracked(|s| s.step);
        let mut next = state.get_untracked();
        let outcome = {
            let mirror = store.mirror().read_untracked();
            next.handle_key(&key, &mirror.collections)
        };
        let step_changed = next.step != step_before;
        state.set(next);
        if step_changed {
            focus_input();
        }
        run(outcome);
    };

    let choose = move |choice: CaptureChoice| {
        state.update(|s| s.choose(choice));
        focus_input();
    };

    let rows = move || {
        let selected = state.with(|s| s.selected);
        options
            .get()
            .into_iter()
            .enumerate()
            .map(|(i, choice)| {
                let body = match &choice {
                    CaptureChoice::Existing(c) => view! {
                        <span class="item-icon" style=format!("color: {}", c.color)>{c.icon.clone()}</span>
                        <span class="item-text">{c.name.clone()}</span>
                    }.into_any(),
                    CaptureChoice::Create(name) => view! {
                        <span class="item-icon create-item">"+"</span>
                        <span class="item-text create-item">{format!("Create \"{}\"", name)}</span>
                    }.into_any(),
                };
                view! {
                    <div
                        class="palette-item"
                        class:active=i == selected
                        on:mouseenter=move |_| state.update(|s| s.selected = i)
                        on:click=move |_| choose(choice.clone())
                    >
                        {body}
                    </div>
                }
            })
            .collect_view()
    };

    let in_task_step = move || state.with(|s| s.step == CaptureStep::Task);

    view! {
        <Show when=move || store.capture_open().get()>
            <div
                class="overlay"
                on:mousedown=move |ev| {
                    if ev.target() == ev.current_target() {
                        store.capture_open().set(false);
                    }
                }
            >
                <div class="modal capture">
                    <div class="step-label">
                        {move || if in_task_step() { "2 · enter task" } else { "1 · pick collection" }}
                    </div>
                    <div class="input-row">
                        {move || state.with(|s| s.choice.clone()).map(|choice| {
                            let is_new = matches!(choice, CaptureChoice::Create(_));
                            view! {
                                <span class="selected-badge">
                                    {if is_new { "+ " } else { "" }}
                                    {choice.name().to_string()}
                                    <span
                                        class="badge-x"
                                        on:click=move |_| {
                                            state.update(|s| s.back());
                                            focus_input();
                                        }
                                    >
                                        "×"
                                    </span>
                                </span>
                            }
                        })}
                        <input
                            class="modal-input"
                            node_ref=input_ref
                            placeholder=move || if in_task_step() { "What needs doing?" } else { "Collection..." }
                            prop:value=move || state.with(|s| s.query.clone())
                            on:input=move |ev| state.update(|s| s.set_query(event_target_value(&ev)))
                            on:keydown=on_keydown
                        />
                        <span class="hint">{move || if in_task_step() { "enter" } else { "esc" }}</span>
                    </div>
                    <Show when=move || !in_task_step()>
                        <div class="modal-list">{rows}</div>
                    </Show>
                </div>
            </div>
        </Show>
    }
}
