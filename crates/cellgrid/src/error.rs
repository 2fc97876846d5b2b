//! Error types for view operations

use cellgrid_core::RowId;
use thiserror::Error;

/// Result type for view operations
pub type ViewResult<T> = std::result::Result<T, ViewError>;

/// Errors that can occur while serving a view
#[derive(Debug, Error)]
pub enum ViewError {
    /// Cell type system error
    #[error(transparent)]
    Core(#[from] cellgrid_core::Error),

    /// The view store failed. Built by [`ViewStore`](crate::ViewStore)
    /// implementations through [`ViewError::store`].
    #[error("Store error: {0}")]
    Store(String),

    /// Unknown view
    #[error("View not found: {0}")]
    ViewNotFound(String),

    /// Unknown or internal column
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Unknown row
    #[error("Row not found: {0}")]
    RowNotFound(RowId),

    /// A row without identity where one is needed
    #[error("Row at position {0} has no identity")]
    MissingRowId(usize),

    /// Writes to this column are not allowed
    #[error("Column '{0}' is not editable")]
    ReadOnlyColumn(String),

    /// Snapshot (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export error
    #[cfg(feature = "csv")]
    #[error("CSV error: {0}")]
    Csv(#[from] cellgrid_csv::CsvError),
}

impl ViewError {
    /// Create a new store error with a message
    pub fn store<S: Into<String>>(msg: S) -> Self {
        ViewError::Store(msg.into())
    }
}
