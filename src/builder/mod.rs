//! Field list state machine, independent of the terminal front end.

pub mod confirm;
pub mod drag;
pub mod edit;
pub mod focus;
pub mod store;

use crate::model::{Field, FieldId, FieldType};
use confirm::{ConfirmAction, ConfirmOutcome};
use drag::DragResult;
use edit::EditSelection;
use store::FieldStore;

/// Read-only view handed to rendering.
#[derive(Debug, Clone, Copy)]
pub struct FormSnapshot<'a> {
    pub fields: &'a [Field],
    pub selection: Option<&'a EditSelection>,
    pub pending: Option<&'a ConfirmAction>,
}

#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    store: FieldStore,
    selection: Option<EditSelection>,
    pending: Option<ConfirmAction>,
}

impl FormBuilder {
    pub fn new(default_options: Vec<String>) -> Self {
        Self {
            store: FieldStore::with_default_options(default_options),
            selection: None,
            pending: None,
        }
    }

    pub fn snapshot(&self) -> FormSnapshot<'_> {
        FormSnapshot {
            fields: self.store.fields(),
            selection: self.selection.as_ref(),
            pending: self.pending.as_ref(),
        }
    }

    pub fn fields(&self) -> &[Field] {
        self.store.fields()
    }

    pub fn selection(&self) -> Option<&EditSelection> {
        self.selection.as_ref()
    }

    pub fn pending(&self) -> Option<&ConfirmAction> {
        self.pending.as_ref()
    }

    pub fn add_field(&mut self, kind: FieldType) -> FieldId {
        self.store.add_field(kind)
    }

    // ---- confirmation (two-step) ------------------------------------------

    pub fn request_delete(&mut self, index: usize) -> bool {
        match self.store.get(index) {
            Some(f) => {
                self.pending = Some(ConfirmAction::DeleteField { index, id: f.id });
                true
            }
            None => false,
        }
    }

    pub fn request_reset(&mut self) {
        self.pending = Some(ConfirmAction::ResetAll);
    }

    pub fn resolve_confirm(&mut self, accepted: bool) -> ConfirmOutcome {
        let Some(action) = self.pending.take() else {
            return ConfirmOutcome::Nothing;
        };
        if !accepted {
            return ConfirmOutcome::Declined(action);
        }
        match action {
            ConfirmAction::DeleteField { index, id } => {
                // The modal blocks other input, so the staged index still
                // points at `id`; fall back to a lookup regardless.
                let pos = match self.store.get(index) {
                    Some(f) if f.id == id => Some(index),
                    _ => self.store.position_of(id),
                };
                let Some(removed) = pos.and_then(|i| self.store.delete_field(i)) else {
                    return ConfirmOutcome::Nothing;
                };
                if self.selection.as_ref().map(|s| s.id()) == Some(removed.id) {
                    self.selection = None;
                }
                self.resync_selection();
                ConfirmOutcome::Deleted {
                    id: removed.id,
                    label: removed.label,
                }
            }
            ConfirmAction::ResetAll => {
                let removed = self.store.len();
                self.store.reset();
                self.selection = None;
                ConfirmOutcome::Reset { removed }
            }
        }
    }

    // ---- ordering ---------------------------------------------------------

    pub fn reorder_field(&mut self, source: usize, destination: usize) -> bool {
        let moved = self.store.reorder_field(source, destination);
        self.resync_selection();
        moved
    }

    pub fn drag_end(&mut self, result: &DragResult) -> bool {
        let moved = drag::apply_drag_end(&mut self.store, result);
        self.resync_selection();
        moved
    }

    // ---- edit selection ---------------------------------------------------

    pub fn open_edit(&mut self, index: usize) -> bool {
        match self.store.get(index) {
            Some(f) => {
                self.selection = Some(EditSelection::new(f, index));
                true
            }
            None => false,
        }
    }

    pub fn update_edit_label(&mut self, label: impl Into<String>) -> bool {
        match &mut self.selection {
            Some(sel) => {
                sel.set_label(label);
                true
            }
            None => false,
        }
    }

    /// Writes the whole working copy back over the field it was opened from.
    pub fn commit_edit(&mut self) -> bool {
        let Some(sel) = &self.selection else {
            return false;
        };
        let Some(pos) = self.store.position_of(sel.id()) else {
            return false;
        };
        let draft = sel.draft.clone();
        let written = self.store.replace(pos, draft);
        self.resync_selection();
        written
    }

    fn resync_selection(&mut self) {
        let pos = self
            .selection
            .as_ref()
            .map(|s| self.store.position_of(s.id()));
        match pos {
            Some(Some(i)) => {
                if let Some(sel) = &mut self.selection {
                    sel.resync(i);
                }
            }
            Some(None) => self.selection = None,
            None => {}
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self.store.fields())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drag::DragLocation;

    fn builder_with(kinds: &[FieldType]) -> FormBuilder {
        let mut b = FormBuilder::default();
        for k in kinds {
            b.add_field(*k);
        }
        b
    }

    fn labels(b: &FormBuilder) -> Vec<&str> {
        b.fields().iter().map(|f| f.label.as_str()).collect()
    }

    #[test]
    fn add_delete_end_to_end() {
        let mut b = FormBuilder::default();
        b.add_field(FieldType::Select);
        assert_eq!(b.fields()[0].kind, FieldType::Select);
        assert_eq!(b.fields()[0].values, vec!["Option 1", "Option 2"]);
        b.add_field(FieldType::Text);
        assert!(b.fields()[1].values.is_empty());
        assert!(b.request_delete(0));
        assert!(matches!(
            b.resolve_confirm(true),
            ConfirmOutcome::Deleted { .. }
        ));
        assert_eq!(b.fields().len(), 1);
        assert_eq!(b.fields()[0].kind, FieldType::Text);
    }

    #[test]
    fn declined_delete_changes_nothing() {
        let mut b = builder_with(&[FieldType::Text, FieldType::Date]);
        b.open_edit(1);
        let before = b.fields().to_vec();
        b.request_delete(1);
        assert!(b.pending().is_some());
        assert!(matches!(
            b.resolve_confirm(false),
            ConfirmOutcome::Declined(ConfirmAction::DeleteField { index: 1, .. })
        ));
        assert_eq!(b.fields(), &before[..]);
        assert!(b.selection().is_some());
        assert!(b.pending().is_none());
    }

    #[test]
    fn resolve_without_pending_is_noop() {
        let mut b = builder_with(&[FieldType::Text]);
        assert_eq!(b.resolve_confirm(true), ConfirmOutcome::Nothing);
        assert_eq!(b.fields().len(), 1);
        assert!(!b.request_delete(4));
        assert!(b.pending().is_none());
    }

    #[test]
    fn deleting_edited_field_clears_selection() {
        let mut b = builder_with(&[FieldType::Text, FieldType::Email, FieldType::File]);
        b.open_edit(1);
        b.request_delete(1);
        b.resolve_confirm(true);
        assert!(b.selection().is_none());
    }

    #[test]
    fn deleting_other_field_keeps_selection_on_same_record() {
        let mut b = builder_with(&[FieldType::Text, FieldType::Email, FieldType::File]);
        b.open_edit(2);
        let id = b.selection().unwrap().id();
        b.request_delete(0);
        b.resolve_confirm(true);
        let sel = b.selection().unwrap();
        assert_eq!(sel.id(), id);
        assert_eq!(sel.index(), 1);
    }

    #[test]
    fn edit_commit_changes_only_label() {
        let mut b = builder_with(&[FieldType::Radio, FieldType::Number]);
        let before = b.fields()[0].clone();
        b.open_edit(0);
        b.update_edit_label("Favourite colour");
        assert_eq!(b.fields()[0].label, "New radio");
        assert!(b.commit_edit());
        let after = &b.fields()[0];
        assert_eq!(after.label, "Favourite colour");
        assert_eq!(after.id, before.id);
        assert_eq!(after.kind, before.kind);
        assert_eq!(after.values, before.values);
        assert_eq!(after.required, before.required);
        assert!(b.selection().is_some());
    }

    #[test]
    fn commit_without_selection_is_noop() {
        let mut b = builder_with(&[FieldType::Text]);
        assert!(!b.update_edit_label("x"));
        assert!(!b.commit_edit());
        assert_eq!(labels(&b), vec!["New text"]);
    }

    #[test]
    fn commit_after_reorder_follows_the_record() {
        let mut b = builder_with(&[FieldType::Text, FieldType::Email, FieldType::Date]);
        b.open_edit(0);
        b.update_edit_label("Name");
        b.reorder_field(0, 2);
        assert_eq!(b.selection().unwrap().index(), 2);
        b.commit_edit();
        assert_eq!(labels(&b), vec!["New email", "New date", "Name"]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut b = builder_with(&[FieldType::Text, FieldType::Checkbox]);
        b.open_edit(1);
        b.request_reset();
        assert_eq!(b.resolve_confirm(true), ConfirmOutcome::Reset { removed: 2 });
        assert!(b.fields().is_empty());
        assert!(b.selection().is_none());
    }

    #[test]
    fn drag_end_reorders_and_resyncs() {
        let mut b = builder_with(&[FieldType::Text, FieldType::Email, FieldType::Date]);
        b.open_edit(2);
        let id = b.fields()[2].id;
        let moved = b.drag_end(&DragResult {
            draggable_id: id,
            source: DragLocation { index: 2 },
            destination: Some(DragLocation { index: 0 }),
        });
        assert!(moved);
        assert_eq!(labels(&b), vec!["New date", "New text", "New email"]);
        assert_eq!(b.selection().unwrap().index(), 0);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut b = builder_with(&[FieldType::Password]);
        b.open_edit(0);
        b.request_reset();
        let snap = b.snapshot();
        assert_eq!(snap.fields.len(), 1);
        assert!(snap.selection.is_some());
        assert_eq!(snap.pending, Some(&ConfirmAction::ResetAll));
    }

    #[test]
    fn json_export_uses_type_key() {
        let b = builder_with(&[FieldType::Select]);
        let v: serde_json::Value = serde_json::from_str(&b.to_json().unwrap()).unwrap();
        assert_eq!(
            v,
            serde_json::json!([{
                "id": 1,
                "type": "select",
                "label": "New select",
                "required": false,
                "values": ["Option 1", "Option 2"]
            }])
        );
    }
}
