//! Row (de)serialization pipeline
//!
//! Moves whole rows between storage form and rich form, one column at a time.
//! Blank values (`null`, missing, `""`) never reach a cell type: they pass
//! through as [`CellValue::Empty`] / [`CellValue::Blank`] and back.

use crate::cell::{CellValue, StorageValue};
use crate::column::{ColumnDescriptor, ResolvedColumn};
use crate::error::Result;
use crate::hoist::process_internal_columns;
use crate::registry;
use crate::row::{CellRow, Row, StorageRow};

/// A view ready for clients: visible columns with resolved behavior, and rich rows
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub columns: Vec<ResolvedColumn>,
    pub rows: Vec<CellRow>,
}

impl View {
    /// Find a column by key
    pub fn column(&self, key: &str) -> Option<&ResolvedColumn> {
        self.columns.iter().find(|c| c.key() == key)
    }

    /// Export one cell as text; empty for unknown columns
    pub fn export_value(&self, column_key: &str, row: &CellRow) -> String {
        match (self.column(column_key), row.get(column_key)) {
            (Some(column), Some(value)) => registry::export(column.cell_type(), value),
            _ => String::new(),
        }
    }
}

/// Read one stored cell as a rich value.
///
/// Stored values that cannot be read, or read as a value the cell type rejects,
/// are kept as [`CellValue::Raw`] so they are written back unchanged.
pub fn deserialize_cell(column: &ColumnDescriptor, storage: Option<&StorageValue>) -> CellValue {
    match storage {
        None | Some(StorageValue::Null) => CellValue::Empty,
        Some(StorageValue::String(s)) if s.is_empty() => CellValue::Blank,
        Some(value) => match registry::deserialize(column.cell_type, value) {
            Ok(cell) if registry::validate(column.cell_type, &cell) => cell,
            Ok(cell) => {
                tracing::warn!(column = %column.key, %value, read = ?cell, "keeping invalid value as raw");
                CellValue::Raw(value.clone())
            }
            Err(err) => {
                tracing::warn!(column = %column.key, %value, %err, "keeping unreadable value as raw");
                CellValue::Raw(value.clone())
            }
        },
    }
}

/// Convert one rich cell to its storage form
pub fn serialize_cell(column: &ColumnDescriptor, value: &CellValue) -> Result<StorageValue> {
    match value {
        CellValue::Empty => Ok(StorageValue::Null),
        CellValue::Blank => Ok(StorageValue::String(String::new())),
        CellValue::Raw(raw) => Ok(raw.clone()),
        other => registry::serialize(column.cell_type, other).map_err(|e| e.in_column(&column.key)),
    }
}

/// Convert a stored row to rich form.
///
/// The result holds exactly one cell per non-internal column; stored keys with no
/// matching column are left out. Reserved keys are carried over.
pub fn deserialize_row(row: &StorageRow, columns: &[ColumnDescriptor]) -> CellRow {
    let cells = columns
        .iter()
        .filter(|c| !c.is_internal())
        .map(|c| (c.key.clone(), deserialize_cell(c, row.get(&c.key))))
        .collect();

    Row {
        id: row.id.clone(),
        index: row.index,
        cells,
    }
}

/// Convert a rich row back to storage form, validating every typed value
pub fn serialize_row(row: &CellRow, columns: &[ColumnDescriptor]) -> Result<StorageRow> {
    let mut out = Row {
        id: row.id.clone(),
        index: row.index,
        cells: Default::default(),
    };
    for column in columns.iter().filter(|c| !c.is_internal()) {
        if let Some(value) = row.get(&column.key) {
            out.set(column.key.clone(), serialize_cell(column, value)?);
        }
    }
    Ok(out)
}

/// Resolve the behavior of each column. Recomputed on every call.
pub fn resolve_columns(columns: &[ColumnDescriptor]) -> Vec<ResolvedColumn> {
    columns.iter().cloned().map(ResolvedColumn::resolve).collect()
}

/// Hoist internal columns, then deserialize every row
pub fn deserialize_view(columns: Vec<ColumnDescriptor>, rows: Vec<StorageRow>) -> Result<View> {
    let (columns, rows) = process_internal_columns(columns, rows)?;
    let rows = rows.iter().map(|row| deserialize_row(row, &columns)).collect();
    Ok(View {
        columns: resolve_columns(&columns),
        rows,
    })
}
