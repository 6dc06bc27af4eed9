//! Drag-to-reorder for whole lists.
//!
//! The resolver captures the rendered card order when a drag begins and
//! tracks a single drop placeholder relative to the other cards. The target
//! index it produces is counted with the dragged list already taken out,
//! which is what `ListStore::reorder_list` expects.

use log::debug;

/// Where the drop placeholder sits, relative to another card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    Before(String),
    After(String),
}

/// A resolved drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDrop {
    pub list_id: String,
    pub target_index: usize,
}

#[derive(Debug, Clone)]
struct DragState {
    source: String,
    /// Rendered container order at drag start, source included
    order: Vec<String>,
    placeholder: Option<Placeholder>,
}

impl DragState {
    /// Card ids other than the source, in rendered order
    fn others(&self) -> impl Iterator<Item = &String> {
        self.order.iter().filter(move |id| **id != self.source)
    }
}

#[derive(Debug, Default)]
pub struct ReorderResolver {
    drag: Option<DragState>,
}

impl ReorderResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `list_id`. Any drag already in progress is abandoned.
    /// Returns false if `list_id` is not among the rendered cards.
    pub fn begin(&mut self, list_id: &str, rendered_order: Vec<String>) -> bool {
        if !rendered_order.iter().any(|id| id == list_id) {
            self.drag = None;
            return false;
        }
        debug!("event=drag_begin module=reorder id={}", list_id);
        self.drag = Some(DragState {
            source: list_id.to_string(),
            order: rendered_order,
            placeholder: None,
        });
        true
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Id of the list being dragged
    pub fn source(&self) -> Option<&str> {
        self.drag.as_ref().map(|d| d.source.as_str())
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.drag.as_ref().and_then(|d| d.placeholder.as_ref())
    }

    /// Pointer is over `target_id`; `pointer_fraction` is its vertical
    /// position within that card (0.0 top, 1.0 bottom). The upper half puts
    /// the placeholder before the card, the lower half after it. Hovering the
    /// source card or an unknown card leaves the placeholder where it is.
    pub fn move_over(&mut self, target_id: &str, pointer_fraction: f32) {
        let Some(drag) = &mut self.drag else {
            return;
        };
        if target_id == drag.source || !drag.order.iter().any(|id| id == target_id) {
            return;
        }
        drag.placeholder = Some(if pointer_fraction < 0.5 {
            Placeholder::Before(target_id.to_string())
        } else {
            Placeholder::After(target_id.to_string())
        });
    }

    /// Placeholder position as a slot among `anchors`, the cards it may sit
    /// beside: 0 is before the first anchor, `anchors.len()` after the last.
    /// `None` when the placeholder is unset or beside a card not in `anchors`.
    pub fn slot(&self, anchors: &[String]) -> Option<usize> {
        let drag = self.drag.as_ref()?;
        let (anchor, offset) = anchor_of(drag.placeholder.as_ref()?);
        anchors
            .iter()
            .filter(|id| **id != drag.source)
            .position(|id| id == anchor)
            .map(|i| i + offset)
    }

    /// Put the placeholder at `slot` among `anchors` (clamped). Keyboard move
    /// mode passes only the cards on screen, so the marker is always drawn.
    pub fn move_to_slot(&mut self, anchors: &[String], slot: usize) {
        let Some(drag) = &mut self.drag else {
            return;
        };
        let anchors: Vec<&String> = anchors.iter().filter(|id| **id != drag.source).collect();
        let Some(last) = anchors.last() else {
            // Nothing to move around
            return;
        };
        drag.placeholder = Some(match anchors.get(slot) {
            Some(id) => Placeholder::Before((*id).clone()),
            None => Placeholder::After((*last).clone()),
        });
    }

    /// Finish the drag. `None` if nothing was being dragged or the
    /// placeholder was never positioned (treated as a cancel).
    pub fn drop(&mut self) -> Option<ResolvedDrop> {
        let drag = self.drag.take()?;
        let target_index = target_index(&drag)?;
        debug!(
            "event=drag_drop module=reorder id={} target_index={}",
            drag.source, target_index
        );
        Some(ResolvedDrop {
            list_id: drag.source,
            target_index,
        })
    }

    /// Abandon the drag with no effect
    pub fn cancel(&mut self) {
        if let Some(drag) = self.drag.take() {
            debug!("event=drag_cancel module=reorder id={}", drag.source);
        }
    }
}

fn anchor_of(placeholder: &Placeholder) -> (&String, usize) {
    match placeholder {
        Placeholder::Before(id) => (id, 0),
        Placeholder::After(id) => (id, 1),
    }
}

/// Drop index counted over every other rendered card, hidden ones included
fn target_index(drag: &DragState) -> Option<usize> {
    let (anchor, offset) = anchor_of(drag.placeholder.as_ref()?);
    drag.others().position(|id| id == anchor).map(|i| i + offset)
}
