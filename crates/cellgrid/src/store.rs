//! View store
//!
//! The view store owns column metadata and stored rows. [`ViewStore`] is the
//! interface the grid consumes; [`MemoryViewStore`] keeps views in memory and
//! reads/writes them as JSON snapshots.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use cellgrid_core::{CellType, ColumnDescriptor, ColumnKind, RowId, StorageRow, StorageValue};
use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};

/// Source of columns and rows, and target of writes
///
/// Implementations are responsible for ordering concurrent writes, e.g. two
/// retypes of the same column checked against different snapshots.
pub trait ViewStore {
    /// Column metadata of a view, internal columns included
    fn fetch_columns(&self, view: &str) -> ViewResult<Vec<ColumnDescriptor>>;

    /// Rows of a view in storage form
    fn fetch_rows(&self, view: &str) -> ViewResult<Vec<StorageRow>>;

    /// Change a column's cell type. Only called once the retype was checked.
    fn write_column_type(&mut self, view: &str, column_id: &str, cell_type: CellType)
        -> ViewResult<()>;

    /// Store one cell value
    fn write_cell(
        &mut self,
        view: &str,
        row_id: &RowId,
        column_key: &str,
        value: StorageValue,
    ) -> ViewResult<()>;
}

/// Columns and rows of one view, as stored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<StorageRow>,
}

impl ViewSnapshot {
    pub fn new(columns: Vec<ColumnDescriptor>, rows: Vec<StorageRow>) -> Self {
        Self { columns, rows }
    }

    /// Read a snapshot from JSON
    pub fn from_reader<R: Read>(reader: R) -> ViewResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read a snapshot from a JSON file
    pub fn read_file<P: AsRef<Path>>(path: P) -> ViewResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Write the snapshot as pretty JSON
    pub fn to_writer<W: Write>(&self, writer: W) -> ViewResult<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Write the snapshot to a JSON file
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> ViewResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Identity of a stored row: its identity column value, else its `_id`
    fn row_identity(&self, row: &StorageRow) -> Option<RowId> {
        self.columns
            .iter()
            .find(|c| c.kind == ColumnKind::Identity)
            .and_then(|c| row.get(&c.key))
            .and_then(RowId::from_storage)
            .or_else(|| row.id.clone())
    }
}

/// In-memory view store
#[derive(Debug, Default)]
pub struct MemoryViewStore {
    views: HashMap<String, ViewSnapshot>,
}

impl MemoryViewStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a single view
    pub fn with_view<S: Into<String>>(name: S, snapshot: ViewSnapshot) -> Self {
        let mut store = Self::new();
        store.insert_view(name, snapshot);
        store
    }

    /// Add or replace a view
    pub fn insert_view<S: Into<String>>(&mut self, name: S, snapshot: ViewSnapshot) {
        self.views.insert(name.into(), snapshot);
    }

    /// Get a view's snapshot
    pub fn view(&self, name: &str) -> Option<&ViewSnapshot> {
        self.views.get(name)
    }

    fn snapshot(&self, view: &str) -> ViewResult<&ViewSnapshot> {
        self.views
            .get(view)
            .ok_or_else(|| ViewError::ViewNotFound(view.to_string()))
    }

    fn snapshot_mut(&mut self, view: &str) -> ViewResult<&mut ViewSnapshot> {
        self.views
            .get_mut(view)
            .ok_or_else(|| ViewError::ViewNotFound(view.to_string()))
    }
}

impl ViewStore for MemoryViewStore {
    fn fetch_columns(&self, view: &str) -> ViewResult<Vec<ColumnDescriptor>> {
        Ok(self.snapshot(view)?.columns.clone())
    }

    fn fetch_rows(&self, view: &str) -> ViewResult<Vec<StorageRow>> {
        Ok(self.snapshot(view)?.rows.clone())
    }

    fn write_column_type(
        &mut self,
        view: &str,
        column_id: &str,
        cell_type: CellType,
    ) -> ViewResult<()> {
        let column = self
            .snapshot_mut(view)?
            .columns
            .iter_mut()
            .find(|c| c.id == column_id)
            .ok_or_else(|| ViewError::ColumnNotFound(column_id.to_string()))?;
        tracing::debug!(view, column = column_id, from = %column.cell_type, to = %cell_type, "column retyped");
        column.cell_type = cell_type;
        Ok(())
    }

    fn write_cell(
        &mut self,
        view: &str,
        row_id: &RowId,
        column_key: &str,
        value: StorageValue,
    ) -> ViewResult<()> {
        let snapshot = self.snapshot_mut(view)?;
        let position = snapshot
            .rows
            .iter()
            .position(|row| snapshot.row_identity(row).as_ref() == Some(row_id))
            .ok_or_else(|| ViewError::RowNotFound(row_id.clone()))?;
        snapshot.rows[position].set(column_key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgrid_core::Row;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn snapshot() -> ViewSnapshot {
        ViewSnapshot::new(
            vec![
                ColumnDescriptor::new("name", CellType::String).with_id("c1"),
                ColumnDescriptor::new("rid", CellType::Number)
                    .with_id("c0")
                    .with_kind(ColumnKind::Identity),
            ],
            vec![
                Row::from_json(json!({"rid": 1, "name": "a"})).unwrap(),
                Row::from_json(json!({"rid": 2, "name": "b"})).unwrap(),
            ],
        )
    }

    #[test]
    fn test_write_cell_finds_row_by_identity_column() {
        let mut store = MemoryViewStore::with_view("v", snapshot());
        store
            .write_cell("v", &RowId::Int(2), "name", json!("bee"))
            .unwrap();
        let rows = store.fetch_rows("v").unwrap();
        assert_eq!(rows[1].get("name"), Some(&json!("bee")));
        assert_eq!(rows[0].get("name"), Some(&json!("a")));
    }

    #[test]
    fn test_write_cell_unknown_row() {
        let mut store = MemoryViewStore::with_view("v", snapshot());
        let err = store
            .write_cell("v", &RowId::Int(9), "name", json!("x"))
            .unwrap_err();
        assert!(matches!(err, ViewError::RowNotFound(RowId::Int(9))));
    }

    #[test]
    fn test_write_column_type() {
        let mut store = MemoryViewStore::with_view("v", snapshot());
        store.write_column_type("v", "c1", CellType::Email).unwrap();
        assert_eq!(store.fetch_columns("v").unwrap()[0].cell_type, CellType::Email);
        assert!(matches!(
            store.write_column_type("v", "zz", CellType::Email),
            Err(ViewError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_view() {
        let store = MemoryViewStore::new();
        assert!(matches!(store.fetch_rows("nope"), Err(ViewError::ViewNotFound(_))));
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let mut buf = Vec::new();
        snapshot().to_writer(&mut buf).unwrap();
        assert_eq!(ViewSnapshot::from_reader(buf.as_slice()).unwrap(), snapshot());
    }
}
