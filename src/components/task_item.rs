//! Task Item Component
//!
//! One task row: checkbox, inline-editable text, positional priority
//! pill, collection badge, move selector and row actions.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mousedown, make_on_row_mousemove, DndSignals, DropTarget};

use crate::actions;
use crate::components::DeleteConfirmButton;
use crate::models::Task;
use crate::store::{use_ui_store, UiStateStoreFields};
use crate::view_state::{collection_color, collection_name, priority_label, priority_ratio, ActiveView};

/// Task row
///
/// Props:
/// - position: (index among pending tasks, pending count); only pending rows carry one
/// - show_collection: show the owning collection as a badge
/// - draggable: row can be dragged to reorder
/// - archived: row lives in the archive view
#[component]
pub fn TaskItem(
    task: Task,
    #[prop(optional)] position: Option<(usize, usize)>,
    #[prop(optional)] show_collection: bool,
    #[prop(optional)] draggable: bool,
    #[prop(optional)] archived: bool,
) -> impl IntoView {
    let store = use_ui_store();
    let dnd = expect_context::<DndSignals>();
    let (editing, set_editing) = signal(false);
    let (edit_text, set_edit_text) = signal(String::new());
    let edit_ref = NodeRef::<leptos::html::Input>::new();

    let id = StoredValue::new(task.id.clone());
    let text = StoredValue::new(task.text.clone());
    let collection_id = StoredValue::new(task.collection_id.clone());
    let done = task.done;
    let index = position.map(|(i, _)| i).unwrap_or(0);
    let draggable = draggable && !done && !archived && position.is_some();

    let on_mousedown = make_on_mousedown(dnd, index);
    let on_mousemove = make_on_row_mousemove(dnd, index);
    let is_dragged = move || draggable && dnd.dragging_read.get() == Some(index);
    let drop_before = move || draggable && dnd.drop_target_read.get() == Some(DropTarget::Gap(index));
    let drop_after = move || {
        draggable
            && position.is_some_and(|(i, total)| i + 1 == total)
            && dnd.drop_target_read.get() == Some(DropTarget::Gap(index + 1))
    };

    Effect::new(move |_| {
        if editing.get() {
            request_animation_frame(move || {
                if let Some(input) = edit_ref.get_untracked() {
                    let _ = input.focus();
                }
            });
        }
    });

    let start_edit = move |_| {
        if done || archived || dnd.drag_just_ended_read.get_untracked() {
            return;
        }
        set_edit_text.set(text.get_value());
        set_editing.set(true);
    };

    let save_edit = move || {
        if !editing.get_untracked() {
            return;
        }
        let trimmed = edit_text.get_untracked().trim().to_string();
        if !trimmed.is_empty() && trimmed != text.get_value() {
            actions::update_task_text(store, id.get_value(), &trimmed);
        }
        set_editing.set(false);
    };

    let priority = position.filter(|_| !done && !archived).map(|(i, total)| {
        let style = format!("--priority-ratio: {:.3}", priority_ratio(i, total));
        view! { <span class="priority-pill" style=style>{priority_label(i)}</span> }
    });

    let badge = show_collection.then(|| {
        let name = move || collection_name(&store.mirror().read(), &collection_id.get_value());
        let style = move || format!("color: {}", collection_color(&store.mirror().read(), &collection_id.get_value()));
        view! {
            <span
                class="task-badge"
                style=style
                title=move || format!("Go to {}", name())
                on:click=move |ev| {
                    ev.stop_propagation();
                    actions::navigate(store, ActiveView::Collection(collection_id.get_value()));
                }
            >
                {name}
            </span>
        }
    });

    let mover = (!archived).then(|| {
        view! {
            <select
                class="move-select"
                title="Move to collection"
                on:mousedown=move |ev| ev.stop_propagation()
                on:change=move |ev| {
                    let target = event_target_value(&ev);
                    if target != collection_id.get_value() {
                        actions::move_task(store, id.get_value(), target);
                    }
                }
            >
                <For
                    each=move || store.mirror().read().collections.clone()
                    key=|c| (c.id.clone(), c.name.clone())
                    children=move |c| {
                        let selected = c.id == collection_id.get_value();
                        view! { <option value=c.id selected=selected>{c.name}</option> }
                    }
                />
            </select>
        }
    });

    let actions_view = if archived {
        view! {
            <button class="action-btn restore-btn" title="Restore" on:click=move |_| actions::restore_task(store, id.get_value())>
                "↺"
            </button>
            <DeleteConfirmButton
                button_class="action-btn del-btn"
                title="Delete forever"
                on_confirm=move |_| actions::delete_task_forever(store, id.get_value())
            />
        }.into_any()
    } else {
        view! {
            <button class="action-btn archive-btn" title="Archive" on:click=move |_| actions::archive_task(store, id.get_value())>
                "⌂"
            </button>
            <DeleteConfirmButton
                button_class="action-btn del-btn"
                title="Delete"
                on_confirm=move |_| actions::delete_task(store, id.get_value())
            />
        }.into_any()
    };

    view! {
        <div
            class="task-item"
            class:done=done
            class:archived=archived
            class:draggable=draggable
            class:is-dragging=is_dragged
            class:drop-before=drop_before
            class:drop-after=drop_after
            on:mousedown=move |ev| if draggable { on_mousedown(ev) }
            on:mousemove=move |ev| if draggable { on_mousemove(ev) }
        >
            <button
                class="checkbox"
                class:checked=done
                disabled=archived
                on:click=move |_| actions::toggle_task(store, id.get_value())
            >
                {if done { "✓" } else { "" }}
            </button>

            {move || if editing.get() {
                view! {
                    <input
                        class="task-edit"
                        node_ref=edit_ref
                        prop:value=move || edit_text.get()
                        on:input=move |ev| set_edit_text.set(event_target_value(&ev))
                        on:blur=move |_| save_edit()
                        on:keydown=move |ev| match ev.key().as_str() {
                            "Enter" => save_edit(),
                            "Escape" => set_editing.set(false),
                            _ => {}
                        }
                    />
                }.into_any()
            } else {
                view! { <span class="task-text" on:click=start_edit>{text.get_value()}</span> }.into_any()
            }}

            {priority}
            {badge}
            <div class="task-actions">
                {mover}
                {actions_view}
            </div>
        </div>
    }
}
