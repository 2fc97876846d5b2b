//! Error types for cellgrid-core

use std::collections::BTreeSet;

use thiserror::Error;

use crate::cell::CellType;
use crate::column::ColumnKind;
use crate::row::RowId;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cellgrid-core
#[derive(Debug, Error)]
pub enum Error {
    /// A value does not belong to its declared cell type
    #[error("Invalid {cell_type} value{}: {message}", column_suffix(.column))]
    Validation {
        cell_type: CellType,
        /// Column key, when the value was checked as part of a row
        column: Option<String>,
        message: String,
    },

    /// No conversion exists between the two cell types
    #[error("Type {from} cannot become type {to}")]
    IncompatibleType { from: CellType, to: CellType },

    /// A dependent retype found values that do not fit the target type
    #[error("Cannot retype to {to}: {} row(s) hold incompatible values", .rows.len())]
    PartialRetypeConflict { to: CellType, rows: BTreeSet<RowId> },

    /// An internal column kind without a hoisting rule
    #[error("Internal column mechanism not implemented for column '{key}' of kind {kind}")]
    UnsupportedInternalColumn { key: String, kind: ColumnKind },

    /// Hoisting changed the number of rows
    #[error("Row count changed while hoisting internal columns: expected {expected}, got {actual} (delta {})", delta(.expected, .actual))]
    RowCountMismatch { expected: usize, actual: usize },

    /// An internal column supplied a value unusable as a reserved row key
    #[error("Column '{column}' cannot supply reserved key '{key}': {value}")]
    InvalidReservedValue {
        key: &'static str,
        column: String,
        value: serde_json::Value,
    },

    /// Unrecognized cell type brand name
    #[error("Unknown cell type: {0}")]
    UnknownCellType(String),
}

impl Error {
    /// Create a validation error for a bare value
    pub fn validation<S: Into<String>>(cell_type: CellType, msg: S) -> Self {
        Error::Validation {
            cell_type,
            column: None,
            message: msg.into(),
        }
    }

    /// Attach a column key to a validation error
    pub fn in_column(self, key: &str) -> Self {
        match self {
            Error::Validation {
                cell_type, message, ..
            } => Error::Validation {
                cell_type,
                column: Some(key.to_string()),
                message,
            },
            other => other,
        }
    }

    /// Whether the error signals broken row identity or order and must abort a view load
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedInternalColumn { .. }
                | Error::RowCountMismatch { .. }
                | Error::InvalidReservedValue { .. }
        )
    }
}

fn delta(expected: &usize, actual: &usize) -> i64 {
    *actual as i64 - *expected as i64
}

fn column_suffix(column: &Option<String>) -> String {
    match column {
        Some(key) => format!(" in column '{key}'"),
        None => String::new(),
    }
}
