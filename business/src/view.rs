use std::any::{Any, TypeId};

use directory_states::{Compute, ComputeDeps, Dep, SnapshotClone, State, Updater, assign_impl};

use crate::{editor::DirectoryEditor, filter};

/// Rows visible through the current filters, plus the select options of
/// every column. Recomputed whenever [`DirectoryEditor`] changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryViewCompute {
    /// Indices into the editor's table.
    pub rows: Vec<usize>,
    /// Distinct values per column, across all rows.
    pub options: Vec<Vec<String>>,
}

impl DirectoryViewCompute {
    pub fn of(editor: &DirectoryEditor) -> Self {
        let table = editor.table();
        Self {
            rows: filter::filtered_rows(table, editor.filters()),
            options: (0..table.column_count())
                .map(|column| filter::select_options(table, column))
                .collect(),
        }
    }
}

impl SnapshotClone for DirectoryViewCompute {}

impl State for DirectoryViewCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

impl Compute for DirectoryViewCompute {
    fn deps(&self) -> ComputeDeps {
        const STATE_IDS: [TypeId; 1] = [TypeId::of::<DirectoryEditor>()];
        (&STATE_IDS, &[])
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        let editor = deps.get_state_ref::<DirectoryEditor>();
        updater.set(Self::of(editor));
    }
}
