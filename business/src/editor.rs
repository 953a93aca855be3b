//! Editable directory state.
//!
//! Every mutating operation pushes the pre-mutation table and filters onto
//! the history before applying itself, so N mutations followed by N undos
//! restore the starting point exactly. Renames and filter edits are the
//! exceptions and never touch history.

use std::any::Any;

use directory_states::{SnapshotClone, State, state_assign_impl};
use log::{info, warn};

use crate::{
    error::EditError,
    filter::{self, FilterState},
    history::{History, Snapshot},
    table::{ColumnRole, NEW_COLUMN_NAME, Table},
};

/// Destructive action waiting for the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirmation {
    DeleteRow { row: usize },
    DeleteColumn { column: usize, name: String },
}

impl PendingConfirmation {
    pub fn prompt(&self) -> String {
        match self {
            Self::DeleteRow { .. } => delete_row_prompt(),
            Self::DeleteColumn { name, .. } => delete_column_prompt(name),
        }
    }
}

pub fn delete_row_prompt() -> String {
    "¿Seguro que deseas eliminar esta fila?".to_owned()
}

pub fn delete_column_prompt(name: &str) -> String {
    format!("¿Seguro que deseas eliminar la columna \"{name}\"?")
}

/// Name parts sent along with a photo upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoFields {
    pub first_name: String,
    pub paterno: String,
    pub materno: String,
}

#[derive(Debug, Clone, Default)]
pub struct DirectoryEditor {
    table: Table,
    baseline: Table,
    filters: FilterState,
    history: History,
    pending: Option<PendingConfirmation>,
}

impl SnapshotClone for DirectoryEditor {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for DirectoryEditor {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

impl DirectoryEditor {
    pub fn new(table: Table) -> Self {
        let mut editor = Self::default();
        editor.load(table);
        editor
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Table as it was at the last load.
    pub fn baseline(&self) -> &Table {
        &self.baseline
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    /// Row indices visible through the current filters.
    pub fn visible_rows(&self) -> Vec<usize> {
        filter::filtered_rows(&self.table, &self.filters)
    }

    pub fn column_role(&self, column: usize) -> ColumnRole {
        self.table.column_role(column)
    }

    /// Replace everything with freshly loaded data.
    pub fn load(&mut self, table: Table) {
        info!(
            "Loaded directory: {} columns, {} rows",
            table.column_count(),
            table.row_count()
        );
        self.filters = FilterState::empty(table.column_count());
        self.baseline = table.clone();
        self.table = table;
        self.history.clear();
        self.pending = None;
    }

    /// Drop all local data, as on logout.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Every table change goes through here, so it also drops a pending
    /// confirmation whose index may no longer point at the same row or column.
    fn record(&mut self) {
        self.pending = None;
        self.history.push(Snapshot {
            table: self.table.clone(),
            filters: self.filters.clone(),
        });
    }

    pub fn update_cell(
        &mut self,
        row: usize,
        column: usize,
        value: impl Into<String>,
    ) -> Result<(), EditError> {
        self.table.check_cell(row, column)?;
        self.record();
        self.table.set_cell(row, column, value.into())
    }

    pub fn add_row(&mut self) {
        self.record();
        self.table.push_row();
    }

    /// Delete `row` if `confirm` accepts the prompt.
    ///
    /// Returns whether the row was removed. A declined prompt changes nothing.
    pub fn delete_row(
        &mut self,
        row: usize,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool, EditError> {
        self.table.check_row(row)?;
        if !confirm(&delete_row_prompt()) {
            return Ok(false);
        }
        self.record();
        self.table.remove_row(row)?;
        Ok(true)
    }

    pub fn add_column(&mut self) {
        self.record();
        self.table.push_column(NEW_COLUMN_NAME);
        self.filters.push_column();
    }

    /// Delete `column` if `confirm` accepts the prompt naming it.
    pub fn delete_column(
        &mut self,
        column: usize,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool, EditError> {
        self.table.check_column(column)?;
        let prompt = delete_column_prompt(&self.table.columns()[column]);
        if !confirm(&prompt) {
            return Ok(false);
        }
        self.record();
        self.table.remove_column(column)?;
        self.filters.remove_column(column);
        Ok(true)
    }

    pub fn rename_column(
        &mut self,
        column: usize,
        name: impl Into<String>,
    ) -> Result<(), EditError> {
        self.table.rename_column(column, name)?;
        self.pending = None;
        Ok(())
    }

    /// Ask for confirmation before deleting `row`; see [`Self::resolve_confirmation`].
    pub fn request_delete_row(&mut self, row: usize) -> Result<(), EditError> {
        self.table.check_row(row)?;
        self.pending = Some(PendingConfirmation::DeleteRow { row });
        Ok(())
    }

    pub fn request_delete_column(&mut self, column: usize) -> Result<(), EditError> {
        self.table.check_column(column)?;
        let name = self.table.columns()[column].clone();
        self.pending = Some(PendingConfirmation::DeleteColumn { column, name });
        Ok(())
    }

    /// Answer the pending confirmation. Returns whether a deletion happened.
    pub fn resolve_confirmation(&mut self, accepted: bool) -> Result<bool, EditError> {
        let Some(pending) = self.pending.take() else {
            return Ok(false);
        };
        match pending {
            PendingConfirmation::DeleteRow { row } => self.delete_row(row, |_| accepted),
            PendingConfirmation::DeleteColumn { column, name } => {
                if self.table.columns().get(column) != Some(&name) {
                    warn!("Column {column} is no longer \"{name}\", not deleting");
                    return Ok(false);
                }
                self.delete_column(column, |_| accepted)
            }
        }
    }

    /// Restore the last snapshot. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(Snapshot { table, filters }) => {
                self.table = table;
                self.filters = filters;
                self.pending = None;
                true
            }
            None => false,
        }
    }

    /// Return to the last loaded data and forget all history.
    pub fn reset_all(&mut self) {
        info!("Reverting {} edits", self.history.len());
        self.table = self.baseline.clone();
        self.filters = FilterState::empty(self.table.column_count());
        self.history.clear();
        self.pending = None;
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn set_text_filter(
        &mut self,
        column: usize,
        value: impl Into<String>,
    ) -> Result<(), EditError> {
        self.table.check_column(column)?;
        self.filters.set_text(column, value.into());
        Ok(())
    }

    pub fn set_select_filter(
        &mut self,
        column: usize,
        value: impl Into<String>,
    ) -> Result<(), EditError> {
        self.table.check_column(column)?;
        self.filters.set_select(column, value.into());
        Ok(())
    }

    /// Name parts of `row`, looked up by the current column names.
    pub fn photo_fields(&self, row: usize) -> Result<PhotoFields, EditError> {
        self.table.check_row(row)?;
        Ok(PhotoFields {
            first_name: self.table.role_value(row, ColumnRole::FirstName).to_owned(),
            paterno: self
                .table
                .role_value(row, ColumnRole::PaternalSurname)
                .to_owned(),
            materno: self
                .table
                .role_value(row, ColumnRole::MaternalSurname)
                .to_owned(),
        })
    }

    /// Write an uploaded photo's stored name into the row's photo column.
    ///
    /// Goes through [`Self::update_cell`], so it can be undone. Returns whether
    /// the cell changed; an empty filename or a missing "Foto" column is ignored.
    pub fn apply_uploaded_photo(&mut self, row: usize, filename: &str) -> Result<bool, EditError> {
        if filename.is_empty() {
            return Ok(false);
        }
        let Some(column) = self.table.role_index(ColumnRole::Photo) else {
            warn!("No photo column to store {filename} for row {row}");
            return Ok(false);
        };
        self.update_cell(row, column, filename)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::table::{ACTIVE_NO, ACTIVE_YES};

    use super::*;

    fn editor() -> DirectoryEditor {
        DirectoryEditor::new(Table::new(
            vec![
                "Nombre".into(),
                "Apellido Paterno".into(),
                "Activo".into(),
                "Foto".into(),
            ],
            vec![
                vec!["Ana".into(), "López".into(), ACTIVE_YES.into(), String::new()],
                vec!["Beto".into(), "Ruiz".into(), ACTIVE_NO.into(), String::new()],
            ],
        ))
    }

    fn assert_aligned(editor: &DirectoryEditor) {
        let width = editor.table().column_count();
        assert!(editor.table().rows().all(|row| row.len() == width));
        assert_eq!(editor.filters().text().len(), width);
        assert_eq!(editor.filters().select().len(), width);
    }

    #[test]
    fn test_mutations_keep_rows_and_filters_aligned() {
        let mut editor = editor();
        editor.add_column();
        assert_aligned(&editor);
        editor.add_row();
        assert_aligned(&editor);
        editor.delete_column(1, |_| true).expect("column exists");
        assert_aligned(&editor);
        editor.delete_row(0, |_| true).expect("row exists");
        assert_aligned(&editor);
        editor.undo();
        editor.undo();
        assert_aligned(&editor);
    }

    #[test]
    fn test_undo_walks_back_to_the_loaded_state() {
        let mut editor = editor();
        let start = (editor.table().clone(), editor.filters().clone());

        editor.update_cell(0, 0, "Anita").expect("in range");
        editor.add_row();
        editor.add_column();
        editor.set_text_filter(4, "x").expect("new column");
        editor.delete_row(1, |_| true).expect("in range");
        editor.delete_column(2, |_| true).expect("in range");

        while editor.undo() {}

        assert_eq!((editor.table().clone(), editor.filters().clone()), start);
    }

    #[test]
    fn test_undo_on_empty_history_is_a_no_op() {
        let mut edited = editor();
        assert!(!edited.undo());
        assert_eq!(edited.table(), editor().table());
    }

    #[test]
    fn test_clear_filters_is_idempotent_and_untracked() {
        let mut editor = editor();
        editor.set_text_filter(0, "an").expect("column exists");
        editor.set_select_filter(2, ACTIVE_YES).expect("column exists");

        editor.clear_filters();
        let once = editor.filters().clone();
        editor.clear_filters();

        assert_eq!(editor.filters(), &once);
        assert_eq!(editor.filters(), &FilterState::empty(4));
        assert_eq!(editor.history_len(), 0);
    }

    #[test]
    fn test_add_then_delete_column_restores_shape() {
        let mut editor = editor();
        let before = editor.table().clone();

        editor.add_column();
        assert_eq!(editor.table().columns().last().map(String::as_str), Some(NEW_COLUMN_NAME));
        let last = editor.table().column_count() - 1;
        editor.delete_column(last, |_| true).expect("in range");

        assert_eq!(editor.table(), &before);
        assert_eq!(editor.filters().len(), 4);
    }

    #[test]
    fn test_reset_discards_history() {
        let mut editor = editor();
        editor.update_cell(1, 0, "Roberto").expect("in range");
        assert!(editor.can_undo());

        editor.reset_all();

        assert!(!editor.undo());
        assert_eq!(editor.table(), editor.baseline());
        assert_eq!(editor.table().cell(1, 0), Some("Beto"));
    }

    #[test]
    fn test_declined_delete_changes_nothing() {
        let mut editor = editor();
        let mut prompt = String::new();

        let deleted = editor
            .delete_row(0, |text| {
                prompt = text.to_owned();
                false
            })
            .expect("in range");

        assert!(!deleted);
        assert_eq!(prompt, "¿Seguro que deseas eliminar esta fila?");
        assert_eq!(editor.table().row_count(), 2);
        assert_eq!(editor.history_len(), 0);
    }

    #[test]
    fn test_column_prompt_names_the_column() {
        let mut editor = editor();
        editor.request_delete_column(2).expect("in range");
        assert_eq!(
            editor.pending().map(PendingConfirmation::prompt).as_deref(),
            Some("¿Seguro que deseas eliminar la columna \"Activo\"?")
        );

        assert!(!editor.resolve_confirmation(false).expect("still valid"));
        assert!(editor.pending().is_none());
        assert_eq!(editor.table().column_count(), 4);

        editor.request_delete_column(2).expect("in range");
        assert!(editor.resolve_confirmation(true).expect("still valid"));
        assert_eq!(editor.table().column_index("Activo"), None);
        assert_eq!(editor.history_len(), 1);
    }

    #[test]
    fn test_undo_drops_pending_row_delete() {
        let mut editor = editor();
        editor.delete_row(0, |_| true).expect("in range");
        editor.request_delete_row(0).expect("in range");
        assert_eq!(editor.table().cell(0, 0), Some("Beto"));

        assert!(editor.undo());
        assert!(editor.pending().is_none());
        assert!(!editor.resolve_confirmation(true).expect("nothing pending"));

        let names: Vec<_> = editor.table().rows().map(|row| row[0].clone()).collect();
        assert_eq!(names, vec!["Ana".to_owned(), "Beto".to_owned()]);
    }

    #[test]
    fn test_table_edits_drop_pending_confirmation() {
        let mut editor = editor();
        editor.request_delete_row(1).expect("in range");
        editor.add_row();
        assert!(editor.pending().is_none());

        editor.request_delete_column(2).expect("in range");
        editor.add_column();
        assert!(editor.pending().is_none());

        editor.request_delete_column(2).expect("in range");
        editor.update_cell(0, 0, "Anita").expect("in range");
        assert!(editor.pending().is_none());

        editor.request_delete_column(2).expect("in range");
        editor.rename_column(2, "Estado").expect("in range");
        assert!(!editor.resolve_confirmation(true).expect("nothing pending"));
        assert_eq!(editor.table().column_count(), 5);
    }

    #[test]
    fn test_filter_edits_keep_pending_confirmation() {
        let mut editor = editor();
        editor.request_delete_row(1).expect("in range");
        editor.set_text_filter(0, "be").expect("in range");
        editor.clear_filters();

        assert!(editor.resolve_confirmation(true).expect("still valid"));
        assert_eq!(editor.table().row_count(), 1);
        assert_eq!(editor.table().cell(0, 0), Some("Ana"));
    }

    #[test]
    fn test_out_of_range_edits_are_not_recorded() {
        let mut editor = editor();
        assert_eq!(
            editor.update_cell(7, 0, "x"),
            Err(EditError::RowOutOfRange { index: 7, len: 2 })
        );
        assert_eq!(
            editor.delete_column(9, |_| true),
            Err(EditError::ColumnOutOfRange { index: 9, len: 4 })
        );
        assert!(editor.request_delete_row(2).is_err());
        assert_eq!(editor.history_len(), 0);
    }

    #[test]
    fn test_rename_is_not_recorded_and_drops_special_behavior() {
        let mut editor = editor();
        editor.rename_column(3, "Imagen").expect("in range");

        assert_eq!(editor.history_len(), 0);
        assert_eq!(editor.column_role(3), ColumnRole::Plain);
        assert!(!editor.apply_uploaded_photo(0, "ana.jpg").expect("in range"));
        assert_eq!(editor.table().cell(0, 3), Some(""));
    }

    #[test]
    fn test_uploaded_photo_is_an_undoable_edit() {
        let mut editor = editor();
        assert!(editor.apply_uploaded_photo(1, "beto.jpg").expect("in range"));
        assert_eq!(editor.table().cell(1, 3), Some("beto.jpg"));

        assert!(!editor.apply_uploaded_photo(1, "").expect("in range"));
        assert!(editor.undo());
        assert_eq!(editor.table().cell(1, 3), Some(""));
    }

    #[test]
    fn test_photo_fields_use_empty_for_missing_columns() {
        let editor = editor();
        assert_eq!(
            editor.photo_fields(0),
            Ok(PhotoFields {
                first_name: "Ana".into(),
                paterno: "López".into(),
                materno: String::new(),
            })
        );
    }

    #[test]
    fn test_filtered_view_example() {
        let mut editor = DirectoryEditor::new(Table::new(
            vec!["Nombre".into(), "Activo".into()],
            vec![
                vec!["Ana".into(), "✓".into()],
                vec!["Beto".into(), "✗".into()],
            ],
        ));
        editor.set_text_filter(0, "an").expect("in range");

        let rows: Vec<&[String]> = editor
            .visible_rows()
            .into_iter()
            .filter_map(|index| editor.table().row(index))
            .collect();
        assert_eq!(rows, vec![&["Ana".to_owned(), "✓".to_owned()][..]]);
    }

    #[test]
    fn test_snapshots_share_untouched_rows() {
        let mut editor = editor();
        editor.update_cell(0, 0, "Anita").expect("in range");
        assert!(editor.table().shares_row(editor.baseline(), 1));
        assert!(!editor.table().shares_row(editor.baseline(), 0));
    }
}
