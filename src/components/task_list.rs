//! Task List Component
//!
//! Pending tasks (draggable inside a collection) above completed ones,
//! with an input for adding tasks to the current view.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mouseleave, DndSignals};

use crate::actions;
use crate::components::TaskItem;
use crate::store::{use_ui_store, UiStateStoreFields};
use crate::view_state::{split_done, visible_tasks};

#[component]
pub fn TaskList() -> impl IntoView {
    let store = use_ui_store();
    let dnd = expect_context::<DndSignals>();
    let (new_text, set_new_text) = signal(String::new());

    let lists = Memo::new(move |_| split_done(visible_tasks(&store.mirror().read(), &store.active_view().read())));
    let pending = move || lists.with(|(p, _)| p.clone());
    let completed = move || lists.with(|(_, c)| c.clone());
    let show_collection = move || !store.active_view().with(|v| v.can_drag());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let target = store.active_view().with_untracked(|v| v.add_target().to_string());
        actions::add_task(store, &new_text.get_untracked(), &target);
        set_new_text.set(String::new());
    };

    view! {
        <div class="task-list" class:dragging=move || dnd.dragging_read.get().is_some() on:mouseleave=make_on_mouseleave(dnd)>
            <form class="new-task-form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Add a task..."
                    prop:value=move || new_text.get()
                    on:input=move |ev| set_new_text.set(event_target_value(&ev))
                />
            </form>

            <Show when=move || lists.with(|(p, c)| p.is_empty() && c.is_empty())>
                <div class="empty-state">"Nothing here yet"</div>
            </Show>

            <For
                each=move || {
                    let rows = pending();
                    let total = rows.len();
                    rows.into_iter().enumerate().map(move |(i, t)| (i, total, t)).collect::<Vec<_>>()
                }
                key=|(i, total, t)| (*i, *total, t.id.clone(), t.text.clone(), t.collection_id.clone(), t.done)
                children=move |(index, total, task)| {
                    view! {
                        <TaskItem
                            task=task
                            position=(index, total)
                            show_collection=show_collection()
                            draggable=!show_collection()
                        />
                    }
                }
            />

            <Show when=move || lists.with(|(_, c)| !c.is_empty())>
                <div class="completed-section">
                    <div class="section-label">"Completed"</div>
                    <For
                        each=completed
                        key=|t| (t.id.clone(), t.text.clone(), t.collection_id.clone(), t.done)
                        children=move |task| view! { <TaskItem task=task show_collection=show_collection() /> }
                    />
                </div>
            </Show>
        </div>
    }
}
