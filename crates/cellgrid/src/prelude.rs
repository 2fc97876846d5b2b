//! Prelude module - common imports for cellgrid users
//!
//! ```rust
//! use cellgrid::prelude::*;
//! ```

pub use crate::{
    // Cell types
    CellRow,
    CellType,
    CellValue,
    // Columns
    ColumnDescriptor,
    ColumnKind,
    Compatibility,
    MemoryViewStore,
    Money,
    ResolvedColumn,
    RetypeOutcome,
    RetypeReport,
    Row,
    RowId,
    ServiceOptions,
    StorageRow,

    View,
    // Error types
    ViewError,
    ViewResult,
    // Main types
    ViewService,
    ViewSnapshot,
    ViewStore,
};

#[cfg(feature = "csv")]
pub use crate::{CsvWriteOptions, CsvWriter};
