//! Decoded source data.

use serde::{Deserialize, Serialize};

/// One data row as decoded from the file, in header order.
///
/// Rows may carry fewer cells than the header declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell at `index`, or `None` when the row is shorter.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }
}

impl From<Vec<String>> for RawRow {
    fn from(cells: Vec<String>) -> Self {
        Self::new(cells)
    }
}

/// Headers and data rows of an uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl SourceTable {
    pub fn new(headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { headers, rows }
    }

    /// Position of `column` in the header row (exact match).
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Cell of `row` under `column`, or `None` if either is absent.
    pub fn cell<'a>(&self, row: &'a RawRow, column: &str) -> Option<&'a str> {
        self.column_index(column).and_then(|index| row.get(index))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
