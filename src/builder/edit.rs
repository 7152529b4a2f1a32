use crate::model::{Field, FieldId};

/// Working copy of one field open in the settings panel.
///
/// The copy is keyed by the field's id; `index` is the position the field
/// occupied when last synchronized with the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSelection {
    pub draft: Field,
    index: usize,
}

impl EditSelection {
    pub fn new(field: &Field, index: usize) -> Self {
        Self {
            draft: field.clone(),
            index,
        }
    }

    pub fn id(&self) -> FieldId {
        self.draft.id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.draft.label = label.into();
    }

    pub(crate) fn resync(&mut self, index: usize) {
        self.index = index;
    }
}
