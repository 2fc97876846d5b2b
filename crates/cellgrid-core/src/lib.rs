//! # cellgrid-core
//!
//! The cell type system of the cellgrid data grid.
//!
//! This crate provides:
//! - [`CellType`] and [`CellValue`] - Logical cell types and their rich values
//! - [`registry`] - Per-type validation, (de)serialization and export
//! - [`conversion`] - Which retypes are possible, and how safe they are
//! - [`retype`] - Checking a column's existing values before a retype
//! - [`pipeline`] - Moving whole rows between storage and rich form
//! - [`hoist`] - Lifting internal columns into the reserved row keys
//!
//! Everything here is synchronous and free of shared mutable state.
//!
//! ## Example
//!
//! ```rust
//! use cellgrid_core::{deserialize_view, CellType, CellValue, ColumnDescriptor, ColumnKind, Row};
//! use serde_json::json;
//!
//! let columns = vec![
//!     ColumnDescriptor::new("title", CellType::String),
//!     ColumnDescriptor::new("pos", CellType::Number).with_kind(ColumnKind::Index),
//! ];
//! let rows = vec![Row::from_json(json!({"title": "First", "pos": 0})).unwrap()];
//!
//! let view = deserialize_view(columns, rows).unwrap();
//! assert_eq!(view.columns.len(), 1);
//! assert_eq!(view.rows[0].index, Some(0));
//! assert_eq!(view.rows[0].get("title"), Some(&CellValue::string("First")));
//! ```

pub mod cell;
pub mod column;
pub mod conversion;
pub mod error;
pub mod hoist;
pub mod pipeline;
pub mod registry;
pub mod retype;
pub mod row;

// Re-exports for convenience
pub use cell::{is_blank, CellType, CellValue, Money, StorageValue, DEFAULT_CURRENCY};
pub use column::{
    resolve_column_behavior, ColumnBehavior, ColumnDescriptor, ColumnKind, Formatter,
    ResolvedColumn,
};
pub use conversion::{compatibility, Compatibility};
pub use error::{Error, Result};
pub use hoist::process_internal_columns;
pub use pipeline::{deserialize_row, deserialize_view, serialize_row, View};
pub use retype::{check_retype, RetypeReport, UnsafeReason};
pub use row::{CellRow, Row, RowId, StorageRow, ID_KEY, INDEX_KEY};
