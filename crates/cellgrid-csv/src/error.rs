//! Export errors
//!
//! Rendering cells never fails; only the output side can.

use thiserror::Error;

pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Failure while writing an exported view
#[derive(Debug, Error)]
pub enum CsvError {
    /// The output file could not be created or written
    #[error("cannot write export: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV encoder rejected a record or failed to flush
    #[error("cannot encode export: {0}")]
    Csv(#[from] csv::Error),
}
