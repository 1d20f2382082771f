//! Leptos DragDrop Utilities
//!
//! Mouse-event drag-and-drop for flat, ordered lists.
//! Rows are addressed by their index in the rendered list; a drop lands
//! in a gap between rows (gap `i` sits just above row `i`).
//! Uses movement threshold to distinguish click from drag.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Drop target: the gap a dragged row would be inserted into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget {
    Gap(usize),
}

impl DropTarget {
    pub fn gap(self) -> usize {
        match self {
            DropTarget::Gap(gap) => gap,
        }
    }
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_read: ReadSignal<Option<usize>>,
    pub dragging_write: WriteSignal<Option<usize>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Row under mousedown that has not moved far enough to drag yet
    pub pending_read: ReadSignal<Option<usize>>,
    pub pending_write: WriteSignal<Option<usize>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_read, dragging_write) = signal(None::<usize>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<usize>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_read,
        dragging_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// Move the row at `from` into `gap` (`0..=len`).
///
/// Returns the reordered list, or `None` when the drop would not change
/// the order (dropping a row into the gap directly above or below itself).
pub fn reorder<T: Clone>(items: &[T], from: usize, gap: usize) -> Option<Vec<T>> {
    let to = target_index(items.len(), from, gap)?;
    let mut out = items.to_vec();
    let moved = out.remove(from);
    out.insert(to, moved);
    Some(out)
}

/// Final index of the moved row, `None` for a no-op or out-of-range drag
pub fn target_index(len: usize, from: usize, gap: usize) -> Option<usize> {
    if from >= len {
        return None;
    }
    let gap = gap.min(len);
    let to = if gap > from { gap - 1 } else { gap };
    (to != from).then_some(to)
}

/// Whether `gap` would leave the dragged row in place
pub fn is_noop_gap(from: usize, gap: usize) -> bool {
    gap == from || gap == from + 1
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_write.set(None);
    dnd.drag_just_ended_write.set(true);

    // Swallow the click that follows mouseup
    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for draggable rows
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Ignore presses on inputs and buttons inside the row
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() {
                return;
            }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() {
                return;
            }
        }
        dnd.pending_write.set(Some(index));
        dnd.start_x_write.set(ev.client_x());
        dnd.start_y_write.set(ev.client_y());
    }
}

/// Create mousemove handler for rows: picks the gap above or below the
/// row depending on which half the pointer is over
pub fn make_on_row_mousemove(dnd: DndSignals, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        let Some(dragging) = dnd.dragging_read.get_untracked() else {
            return;
        };
        let Some(row) = ev.current_target().and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok()) else {
            return;
        };
        let rect = row.get_bounding_client_rect();
        let below = f64::from(ev.client_y()) > rect.top() + rect.height() / 2.0;
        let gap = if below { index + 1 } else { index };

        let target = (!is_noop_gap(dragging, gap)).then_some(DropTarget::Gap(gap));
        if dnd.drop_target_read.get_untracked() != target {
            dnd.drop_target_write.set(target);
        }
    }
}

/// Create mouseleave handler for the list container
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Create mousemove handler for document - starts drag if moved enough
fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_read.get_untracked();
        if pending.is_none() || dnd.dragging_read.get_untracked().is_some() {
            return;
        }
        let dx = (ev.client_x() - dnd.start_x_read.get_untracked()).abs();
        let dy = (ev.client_y() - dnd.start_y_read.get_untracked()).abs();
        if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
            dnd.dragging_write.set(pending);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Bind global mouseup handler for drop detection.
/// `on_drop(from, gap)` fires only for real drags onto a gap.
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(usize, usize) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging = dnd.dragging_read.get_untracked();
        let drop_target = dnd.drop_target_read.get_untracked();

        dnd.pending_write.set(None);
        end_drag(&dnd);

        if let (Some(from), Some(target)) = (dragging, drop_target) {
            on_drop(from, target.gap());
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_last_to_front() {
        let items = ["A", "B", "C"];
        assert_eq!(reorder(&items, 2, 0), Some(vec!["C", "A", "B"]));
    }

    #[test]
    fn test_move_first_to_end() {
        let items = ["A", "B", "C"];
        assert_eq!(reorder(&items, 0, 3), Some(vec!["B", "C", "A"]));
        // Gaps past the end clamp to the end
        assert_eq!(reorder(&items, 0, 10), Some(vec!["B", "C", "A"]));
    }

    #[test]
    fn test_move_down_accounts_for_removed_row() {
        let items = ["A", "B", "C", "D"];
        assert_eq!(target_index(4, 0, 2), Some(1));
        assert_eq!(reorder(&items, 0, 2), Some(vec!["B", "A", "C", "D"]));
    }

    #[test]
    fn test_adjacent_gaps_are_noops() {
        let items = ["A", "B", "C"];
        assert_eq!(reorder(&items, 1, 1), None);
        assert_eq!(reorder(&items, 1, 2), None);
        assert!(is_noop_gap(1, 1));
        assert!(is_noop_gap(1, 2));
        assert!(!is_noop_gap(1, 0));
    }

    #[test]
    fn test_out_of_range_source() {
        assert_eq!(reorder(&["A"], 3, 0), None);
        assert_eq!(reorder::<&str>(&[], 0, 0), None);
    }
}
