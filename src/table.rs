//! Format-agnostic tabular input.
//!
//! The presentation layer owns file formats; the planner only sees named
//! columns of string cells. Typed parsing happens in [`crate::models`] and
//! [`crate::graph`], which check for their required columns up front.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// A named table of string cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Table name, used in error messages (e.g. "layout", "orders").
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. Missing trailing cells read as empty.
    pub fn push_row<S: ToString>(&mut self, cells: &[S]) {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
    }

    /// Builder form of [`Table::push_row`].
    pub fn with_row<S: ToString>(mut self, cells: &[S]) -> Self {
        self.push_row(cells);
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Index of a column, or `Schema` error if absent.
    pub fn column(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| PlannerError::schema(&self.name, column))
    }

    /// Indices of all required columns, in the order requested.
    pub fn require(&self, columns: &[&str]) -> Result<Vec<usize>> {
        columns.iter().map(|c| self.column(c)).collect()
    }

    /// Cell text, empty when the row is shorter than the header.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.trim())
            .unwrap_or("")
    }

    /// Parses a cell as a finite float.
    pub fn cell_f64(&self, row: usize, col: usize) -> Result<f64> {
        let raw = self.cell(row, col);
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(PlannerError::invalid_value(&self.name, &self.columns[col], row, raw)),
        }
    }
}
