//! Errors raised by table operations and cleaning rules

use thiserror::Error;

/// Failure of a table operation or a cleaning rule.
///
/// Every variant names the column involved so callers can report which
/// rule rejected the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("column '{0}' not found")]
    MissingColumn(String),

    #[error("column '{0}' already exists")]
    DuplicateColumn(String),

    #[error("column '{column}' has {found} values but the table has {expected} rows")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("column '{column}' row {row}: cannot parse '{value}' as a date")]
    InvalidDate {
        column: String,
        row: usize,
        value: String,
    },
}
