//! # cellgrid
//!
//! A spreadsheet-like data grid over a relational view store.
//!
//! Every column has a logical cell type that decides how its values are validated,
//! stored, edited and exported. Columns can be retyped, but only when no existing
//! value would be lost.
//!
//! ## Features
//!
//! - Fourteen cell types, from plain text to currencies and multi-selects
//! - Retype checks against every existing value before the column type changes
//! - Internal columns (row order, identity, foreign keys) hidden from clients
//! - CSV export of a view (feature `csv`, on by default)
//!
//! ## Example
//!
//! ```rust
//! use cellgrid::prelude::*;
//! use serde_json::json;
//!
//! let columns = vec![
//!     ColumnDescriptor::new("title", CellType::String).with_id("c1"),
//!     ColumnDescriptor::new("rid", CellType::Number)
//!         .with_id("c0")
//!         .with_kind(ColumnKind::Identity),
//! ];
//! let rows = vec![
//!     Row::from_json(json!({"rid": 1, "title": "12"})).unwrap(),
//!     Row::from_json(json!({"rid": 2, "title": "twelve"})).unwrap(),
//! ];
//! let store = MemoryViewStore::with_view("tasks", ViewSnapshot::new(columns, rows));
//! let mut service = ViewService::new(store, "tasks");
//!
//! let outcome = service.request_retype("c1", CellType::Number).unwrap();
//! assert!(!outcome.applied);
//! assert_eq!(outcome.report.failed_rows().unwrap().len(), 1);
//! ```

pub mod error;
pub mod options;
pub mod prelude;
pub mod service;
pub mod store;

pub use error::{ViewError, ViewResult};
pub use options::ServiceOptions;
pub use service::{RetypeOutcome, ViewService};
pub use store::{MemoryViewStore, ViewSnapshot, ViewStore};

// Re-export core types
pub use cellgrid_core::{
    check_retype, compatibility, deserialize_view, process_internal_columns, registry,
    CellRow, CellType, CellValue, ColumnBehavior, ColumnDescriptor, ColumnKind, Compatibility,
    Error, Formatter, Money, ResolvedColumn, RetypeReport, Row, RowId, StorageRow, StorageValue,
    UnsafeReason, View,
};

// Re-export I/O types
#[cfg(feature = "csv")]
pub use cellgrid_csv::{CsvError, CsvWriteOptions, CsvWriter, LineTerminator};
