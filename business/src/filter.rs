//! Per-column filters and the derived view.

use std::collections::HashSet;

use crate::table::Table;

/// One text filter and one select filter per column, index-aligned with the
/// table's columns. An empty entry matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    text: Vec<String>,
    select: Vec<String>,
}

impl FilterState {
    pub fn empty(columns: usize) -> Self {
        Self {
            text: vec![String::new(); columns],
            select: vec![String::new(); columns],
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn text(&self) -> &[String] {
        &self.text
    }

    pub fn select(&self) -> &[String] {
        &self.select
    }

    /// Whether any filter entry is set.
    pub fn is_active(&self) -> bool {
        self.text
            .iter()
            .chain(&self.select)
            .any(|value| !value.is_empty())
    }

    /// Empties every entry, keeping one per column.
    pub fn clear(&mut self) {
        *self = Self::empty(self.len());
    }

    pub(crate) fn set_text(&mut self, column: usize, value: String) -> bool {
        match self.text.get_mut(column) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_select(&mut self, column: usize, value: String) -> bool {
        match self.select.get_mut(column) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub(crate) fn push_column(&mut self) {
        self.text.push(String::new());
        self.select.push(String::new());
    }

    pub(crate) fn remove_column(&mut self, column: usize) {
        if column < self.len() {
            self.text.remove(column);
            self.select.remove(column);
        }
    }

    /// Whether `row` passes every column's filters.
    pub fn matches(&self, row: &[String]) -> bool {
        row.iter().enumerate().all(|(column, cell)| {
            let text = self.text.get(column).map_or("", String::as_str);
            let select = self.select.get(column).map_or("", String::as_str);
            (text.is_empty() || cell.to_lowercase().contains(&text.to_lowercase()))
                && (select.is_empty() || cell == select)
        })
    }
}

/// Indices of the rows of `table` that pass `filters`, in table order.
///
/// Indices address the underlying table, so edits made through a filtered
/// view land on the right row.
pub fn filtered_rows(table: &Table, filters: &FilterState) -> Vec<usize> {
    table
        .rows()
        .enumerate()
        .filter(|(_, row)| filters.matches(row))
        .map(|(index, _)| index)
        .collect()
}

/// Distinct values of `column` across all rows, in first-seen order.
pub fn select_options(table: &Table, column: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    table
        .rows()
        .filter_map(|row| row.get(column).map(String::as_str))
        .filter(|value| seen.insert(*value))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff() -> Table {
        Table::new(
            vec!["Nombre".into(), "Activo".into()],
            vec![
                vec!["Ana".into(), "✓".into()],
                vec!["Beto".into(), "✗".into()],
                vec!["Mariana".into(), "✓".into()],
            ],
        )
    }

    #[test]
    fn test_text_filter_is_case_insensitive_substring() {
        let table = staff();
        let mut filters = FilterState::empty(2);
        filters.set_text(0, "AN".into());
        assert_eq!(filtered_rows(&table, &filters), vec![0, 2]);
    }

    #[test]
    fn test_select_filter_is_exact() {
        let table = staff();
        let mut filters = FilterState::empty(2);
        filters.set_select(1, "✗".into());
        assert_eq!(filtered_rows(&table, &filters), vec![1]);
    }

    #[test]
    fn test_all_columns_must_match() {
        let table = staff();
        let mut filters = FilterState::empty(2);
        filters.set_text(0, "an".into());
        filters.set_select(1, "✗".into());
        assert!(filtered_rows(&table, &filters).is_empty());
    }

    #[test]
    fn test_empty_table_yields_empty_view() {
        let table = Table::default();
        assert!(filtered_rows(&table, &FilterState::empty(0)).is_empty());
        assert!(select_options(&table, 0).is_empty());
    }

    #[test]
    fn test_select_options_cover_all_rows_uniquely() {
        let table = staff();
        let mut filters = FilterState::empty(2);
        filters.set_text(0, "beto".into());
        // Options ignore the active filters.
        assert_eq!(select_options(&table, 1), vec!["✓", "✗"]);
        assert_eq!(select_options(&table, 0).len(), 3);
    }

    #[test]
    fn test_clear_keeps_one_entry_per_column() {
        let mut filters = FilterState::empty(3);
        filters.set_text(2, "x".into());
        assert!(filters.is_active());
        filters.clear();
        assert_eq!(filters, FilterState::empty(3));
        assert!(!filters.is_active());
    }
}
