//! # cellgrid-csv
//!
//! CSV export for cellgrid views. Cells are rendered with the cell type registry's
//! export rules, so blank and unreadable values become empty fields.

mod error;
mod options;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvWriteOptions, LineTerminator};
pub use writer::CsvWriter;
