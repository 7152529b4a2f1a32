use crate::model::{Field, FieldId, FieldType, DEFAULT_OPTIONS};

/// Ordered field list. Insertion order is display order.
#[derive(Debug, Clone)]
pub struct FieldStore {
    fields: Vec<Field>,
    next_id: u64,
    default_options: Vec<String>,
}

impl Default for FieldStore {
    fn default() -> Self {
        Self::with_default_options(DEFAULT_OPTIONS.iter().map(|s| s.to_string()).collect())
    }
}

impl FieldStore {
    pub fn with_default_options(default_options: Vec<String>) -> Self {
        Self {
            fields: Vec::new(),
            next_id: 1,
            default_options,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn position_of(&self, id: FieldId) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    fn alloc_id(&mut self) -> FieldId {
        let id = FieldId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add_field(&mut self, kind: FieldType) -> FieldId {
        let id = self.alloc_id();
        let values = if kind.has_options() {
            self.default_options.clone()
        } else {
            Vec::new()
        };
        self.fields.push(Field {
            id,
            kind,
            label: format!("New {kind}"),
            required: false,
            values,
        });
        id
    }

    pub fn delete_field(&mut self, index: usize) -> Option<Field> {
        if index < self.fields.len() {
            Some(self.fields.remove(index))
        } else {
            None
        }
    }

    /// Moves the element at `source` to `destination`; everything in between
    /// shifts by one slot. Returns `true` only when the order changed.
    pub fn reorder_field(&mut self, source: usize, destination: usize) -> bool {
        let len = self.fields.len();
        if source >= len || destination >= len || source == destination {
            return false;
        }
        let moved = self.fields.remove(source);
        self.fields.insert(destination, moved);
        true
    }

    pub fn replace(&mut self, index: usize, field: Field) -> bool {
        match self.fields.get_mut(index) {
            Some(slot) => {
                *slot = field;
                true
            }
            None => false,
        }
    }

    /// Ids keep counting across resets.
    pub fn reset(&mut self) {
        self.fields.clear();
    }
}
