use super::store::FieldStore;
use crate::model::FieldId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragLocation {
    pub index: usize,
}

/// What a drag gesture reports once it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragResult {
    pub draggable_id: FieldId,
    pub source: DragLocation,
    // None when dropped outside the list or cancelled
    pub destination: Option<DragLocation>,
}

/// Applies a finished gesture to the store as a single move.
///
/// Returns `false` when nothing changed: no destination, an out-of-range
/// index, or a source slot that no longer holds the dragged field.
pub fn apply_drag_end(store: &mut FieldStore, result: &DragResult) -> bool {
    let Some(dest) = result.destination else {
        return false;
    };
    if store.get(result.source.index).map(|f| f.id) != Some(result.draggable_id) {
        return false;
    }
    store.reorder_field(result.source.index, dest.index)
}

/// In-progress gesture fed by the keyboard or mouse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    id: FieldId,
    source: usize,
    over: Option<usize>,
}

impl DragGesture {
    pub fn lift(id: FieldId, index: usize) -> Self {
        Self {
            id,
            source: index,
            over: Some(index),
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn over(&self) -> Option<usize> {
        self.over
    }

    pub fn move_to(&mut self, index: usize, len: usize) {
        if len == 0 {
            self.over = None;
        } else {
            self.over = Some(index.min(len - 1));
        }
    }

    pub fn move_by(&mut self, delta: isize, len: usize) {
        let cur = self.over.unwrap_or(self.source) as isize;
        let next = (cur + delta).max(0) as usize;
        self.move_to(next, len);
    }

    pub fn hover_outside(&mut self) {
        self.over = None;
    }

    pub fn drop(self) -> DragResult {
        DragResult {
            draggable_id: self.id,
            source: DragLocation { index: self.source },
            destination: self.over.map(|index| DragLocation { index }),
        }
    }

    pub fn cancel(self) -> DragResult {
        DragResult {
            draggable_id: self.id,
            source: DragLocation { index: self.source },
            destination: None,
        }
    }

    /// Display order of list positions while the gesture hovers over a slot.
    pub fn preview_order(&self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        if let Some(dest) = self.over {
            if self.source < len && dest < len {
                let moved = order.remove(self.source);
                order.insert(dest, moved);
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldType;

    fn store_with(n: usize) -> FieldStore {
        let mut s = FieldStore::default();
        for _ in 0..n {
            s.add_field(FieldType::Number);
        }
        s
    }

    fn ids(store: &FieldStore) -> Vec<u64> {
        store.fields().iter().map(|f| f.id.0).collect()
    }

    #[test]
    fn missing_destination_is_a_noop() {
        let mut s = store_with(3);
        let res = DragResult {
            draggable_id: FieldId(1),
            source: DragLocation { index: 0 },
            destination: None,
        };
        assert!(!apply_drag_end(&mut s, &res));
        assert_eq!(ids(&s), vec![1, 2, 3]);
    }

    #[test]
    fn drop_moves_one_element() {
        let mut s = store_with(4);
        let res = DragResult {
            draggable_id: FieldId(4),
            source: DragLocation { index: 3 },
            destination: Some(DragLocation { index: 0 }),
        };
        assert!(apply_drag_end(&mut s, &res));
        assert_eq!(ids(&s), vec![4, 1, 2, 3]);
    }

    #[test]
    fn stale_draggable_id_is_ignored() {
        let mut s = store_with(3);
        let res = DragResult {
            draggable_id: FieldId(3),
            source: DragLocation { index: 0 },
            destination: Some(DragLocation { index: 2 }),
        };
        assert!(!apply_drag_end(&mut s, &res));
        assert_eq!(ids(&s), vec![1, 2, 3]);
    }

    #[test]
    fn gesture_tracks_hover_and_clamps() {
        let mut g = DragGesture::lift(FieldId(2), 1);
        g.move_by(-5, 4);
        assert_eq!(g.over(), Some(0));
        g.move_by(10, 4);
        assert_eq!(g.over(), Some(3));
        let res = g.drop();
        assert_eq!(res.source.index, 1);
        assert_eq!(res.destination, Some(DragLocation { index: 3 }));
    }

    #[test]
    fn gesture_outside_or_cancelled_has_no_destination() {
        let mut g = DragGesture::lift(FieldId(1), 0);
        g.move_to(2, 3);
        g.hover_outside();
        assert_eq!(g.clone().drop().destination, None);
        g.move_to(1, 3);
        assert_eq!(g.cancel().destination, None);
    }

    #[test]
    fn preview_order_shows_item_at_hover_slot() {
        let mut g = DragGesture::lift(FieldId(1), 0);
        g.move_to(2, 4);
        assert_eq!(g.preview_order(4), vec![1, 2, 0, 3]);
        g.hover_outside();
        assert_eq!(g.preview_order(4), vec![0, 1, 2, 3]);
    }
}
