//! Error taxonomy for the picking planner.
//!
//! All failures are deterministic input-validation errors. Nothing is
//! retried; errors propagate to the caller that supplied the tables.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    #[error("table `{table}` is missing required column `{column}`")]
    Schema { table: String, column: String },

    #[error("table `{table}` row {row}: invalid `{column}` value {value:?}")]
    InvalidValue {
        table: String,
        column: String,
        row: usize,
        value: String,
    },

    #[error("node `{0}` is not in the layout graph")]
    UnknownNode(String),

    #[error("no edge between `{from}` and `{to}` in the layout graph")]
    UnknownEdge { from: String, to: String },

    #[error("no path from `{from}` to `{to}`")]
    NoPath { from: String, to: String },

    #[error("no pickers available to score")]
    EmptyPickerSet,

    #[error("no orders available to build training data from")]
    EmptyOrderSet,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("model error: {0}")]
    Model(String),
}

impl PlannerError {
    pub(crate) fn schema(table: &str, column: &str) -> Self {
        PlannerError::Schema {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    pub(crate) fn invalid_value(table: &str, column: &str, row: usize, value: &str) -> Self {
        PlannerError::InvalidValue {
            table: table.to_string(),
            column: column.to_string(),
            row,
            value: value.to_string(),
        }
    }
}
