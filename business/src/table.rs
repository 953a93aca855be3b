//! Tabular directory data.
//!
//! Column identity is positional. A handful of column names carry behavior
//! (see [`ColumnRole`]); the role is resolved from the column's current name
//! every time it is needed, so renaming such a column drops the behavior.
//!
//! Rows are copy-on-write: cloning a [`Table`] (for undo history) shares every
//! row, and an edit copies only the row it touches.

use std::sync::Arc;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EditError;

pub type Row = Arc<Vec<String>>;

/// Placeholder name given to columns added from the editor.
pub const NEW_COLUMN_NAME: &str = "Nueva columna";

/// Value written by the "active" toggle.
pub const ACTIVE_YES: &str = "✓";
/// Value written by the "inactive" toggle.
pub const ACTIVE_NO: &str = "✗";

/// Behavior attached to a column by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    FirstName,
    PaternalSurname,
    MaternalSurname,
    Active,
    Photo,
    Plain,
}

impl ColumnRole {
    pub const SPECIAL: [Self; 5] = [
        Self::FirstName,
        Self::PaternalSurname,
        Self::MaternalSurname,
        Self::Active,
        Self::Photo,
    ];

    pub fn of(name: &str) -> Self {
        Self::SPECIAL
            .into_iter()
            .find(|role| role.column_name() == Some(name))
            .unwrap_or(Self::Plain)
    }

    /// The exact column name that triggers this role.
    pub fn column_name(self) -> Option<&'static str> {
        match self {
            Self::FirstName => Some("Nombre"),
            Self::PaternalSurname => Some("Apellido Paterno"),
            Self::MaternalSurname => Some("Apellido Materno"),
            Self::Active => Some("Activo"),
            Self::Photo => Some("Foto"),
            Self::Plain => None,
        }
    }
}

/// Body of `GET /data` and `POST /save`.
///
/// The service may send cells as numbers, booleans or `null`; they are kept as
/// raw JSON here and turned into display strings by [`Table::from_payload`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryPayload {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// String form of a wire cell. `null` is an empty cell.
pub fn display_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table, padding short rows with empty cells and truncating long ones.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, mut row)| {
                if row.len() != width {
                    warn!(
                        "Row {index} has {} cells for {width} columns, normalizing",
                        row.len()
                    );
                    row.resize(width, String::new());
                }
                Arc::new(row)
            })
            .collect();
        Self { columns, rows }
    }

    pub fn from_payload(payload: DirectoryPayload) -> Self {
        let rows = payload
            .rows
            .iter()
            .map(|row| row.iter().map(display_cell).collect())
            .collect();
        Self::new(payload.columns, rows)
    }

    pub fn to_payload(&self) -> DirectoryPayload {
        DirectoryPayload {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().cloned().map(Value::String).collect())
                .collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[String]> {
        self.rows.iter().map(|row| row.as_slice())
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(|row| row.as_slice())
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.row(row)?.get(column).map(String::as_str)
    }

    /// First column whose current name is `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn role_index(&self, role: ColumnRole) -> Option<usize> {
        role.column_name().and_then(|name| self.column_index(name))
    }

    pub fn column_role(&self, column: usize) -> ColumnRole {
        self.columns
            .get(column)
            .map_or(ColumnRole::Plain, |name| ColumnRole::of(name))
    }

    /// Cell of `row` in the column currently named for `role`, or `""`.
    pub fn role_value(&self, row: usize, role: ColumnRole) -> &str {
        self.role_index(role)
            .and_then(|column| self.cell(row, column))
            .unwrap_or_default()
    }

    /// Whether two tables share the storage of row `index`.
    pub fn shares_row(&self, other: &Self, index: usize) -> bool {
        match (self.rows.get(index), other.rows.get(index)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub(crate) fn check_cell(&self, row: usize, column: usize) -> Result<(), EditError> {
        self.check_row(row)?;
        self.check_column(column)
    }

    pub(crate) fn check_row(&self, row: usize) -> Result<(), EditError> {
        if row < self.rows.len() {
            Ok(())
        } else {
            Err(EditError::RowOutOfRange {
                index: row,
                len: self.rows.len(),
            })
        }
    }

    pub(crate) fn check_column(&self, column: usize) -> Result<(), EditError> {
        if column < self.columns.len() {
            Ok(())
        } else {
            Err(EditError::ColumnOutOfRange {
                index: column,
                len: self.columns.len(),
            })
        }
    }

    pub(crate) fn set_cell(
        &mut self,
        row: usize,
        column: usize,
        value: String,
    ) -> Result<(), EditError> {
        self.check_cell(row, column)?;
        Arc::make_mut(&mut self.rows[row])[column] = value;
        Ok(())
    }

    pub(crate) fn push_row(&mut self) {
        self.rows
            .push(Arc::new(vec![String::new(); self.columns.len()]));
    }

    pub(crate) fn remove_row(&mut self, row: usize) -> Result<Row, EditError> {
        self.check_row(row)?;
        Ok(self.rows.remove(row))
    }

    pub(crate) fn push_column(&mut self, name: impl Into<String>) {
        self.columns.push(name.into());
        for row in &mut self.rows {
            Arc::make_mut(row).push(String::new());
        }
    }

    pub(crate) fn remove_column(&mut self, column: usize) -> Result<String, EditError> {
        self.check_column(column)?;
        for row in &mut self.rows {
            Arc::make_mut(row).remove(column);
        }
        Ok(self.columns.remove(column))
    }

    pub(crate) fn rename_column(
        &mut self,
        column: usize,
        name: impl Into<String>,
    ) -> Result<(), EditError> {
        self.check_column(column)?;
        self.columns[column] = name.into();
        Ok(())
    }
}
