use crate::{filter::FilterState, table::Table};

/// Editable state captured before a mutation.
///
/// Tables share their rows with the live table, so a snapshot costs one
/// pointer per row until a row is edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub table: Table,
    pub filters: FilterState,
}

/// Unbounded undo stack.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Snapshot>,
}

impl History {
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot);
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
