use crate::model::FieldId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteField { index: usize, id: FieldId },
    ResetAll,
}

impl ConfirmAction {
    pub fn prompt(&self) -> &'static str {
        match self {
            ConfirmAction::DeleteField { .. } => "Are you sure you want to delete this field?",
            ConfirmAction::ResetAll => "Are you sure you want to reset the form?",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Nothing,
    Declined(ConfirmAction),
    Deleted { id: FieldId, label: String },
    Reset { removed: usize },
}
