//! View service
//!
//! [`ViewService`] is what a grid front end talks to. It reads a view through a
//! [`ViewStore`], hands out rich rows, and guards every write with the cell type
//! system: values are validated before they are stored, and retypes are checked
//! against all existing values before the column type changes.

use std::collections::BTreeMap;

use cellgrid_core::pipeline::{self, serialize_cell};
use cellgrid_core::{
    check_retype, process_internal_columns, registry, CellRow, CellType, CellValue,
    ColumnDescriptor, RetypeReport, RowId, StorageRow, StorageValue, View,
};

use crate::error::{ViewError, ViewResult};
use crate::options::ServiceOptions;
use crate::store::ViewStore;

/// Result of a retype request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetypeOutcome {
    pub report: RetypeReport,
    /// Whether the new type was written to the store
    pub applied: bool,
}

/// Typed access to one view of a store
#[derive(Debug)]
pub struct ViewService<S> {
    store: S,
    view: String,
    options: ServiceOptions,
}

impl<S: ViewStore> ViewService<S> {
    /// Serve `view` from `store` with default options
    pub fn new<V: Into<String>>(store: S, view: V) -> Self {
        Self::with_options(store, view, ServiceOptions::default())
    }

    pub fn with_options<V: Into<String>>(store: S, view: V, options: ServiceOptions) -> Self {
        Self {
            store,
            view: view.into(),
            options,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// Load the view: hoist internal columns, resolve column behavior and
    /// deserialize every row
    pub fn deserialize_view(&self) -> ViewResult<View> {
        let columns = self.store.fetch_columns(&self.view)?;
        let rows = self.store.fetch_rows(&self.view)?;
        tracing::debug!(view = %self.view, columns = columns.len(), rows = rows.len(), "loading view");
        Ok(pipeline::deserialize_view(columns, rows)?)
    }

    /// Convert a rich row to storage form, validating every typed value
    pub fn serialize_row_for_write(&self, row: &CellRow) -> ViewResult<StorageRow> {
        let columns = self.store.fetch_columns(&self.view)?;
        Ok(pipeline::serialize_row(row, &columns)?)
    }

    /// Export one cell as display text
    pub fn export_value(&self, column_key: &str, row: &CellRow) -> ViewResult<String> {
        let column = self.visible_column(column_key)?;
        let value = row.get(column_key).unwrap_or(&CellValue::Empty);
        Ok(registry::export(column.cell_type, value))
    }

    /// Check whether column `column_id` can become `target`, and apply the new type
    /// when it can.
    ///
    /// Unsafe reports are returned as values, the store is left untouched. A safe
    /// report that carries a warning is only applied with
    /// [`ServiceOptions::accept_warnings`].
    pub fn request_retype(&mut self, column_id: &str, target: CellType) -> ViewResult<RetypeOutcome> {
        let columns = self.store.fetch_columns(&self.view)?;
        let column = columns
            .iter()
            .find(|c| c.id == column_id && !c.is_internal())
            .cloned()
            .ok_or_else(|| ViewError::ColumnNotFound(column_id.to_string()))?;

        let values = self.column_values(columns, &column)?;
        let report = check_retype(&column, target, &values);

        let applied = match &report {
            RetypeReport::Safe { warning: None } => true,
            RetypeReport::Safe { warning: Some(w) } => {
                if !self.options.accept_warnings {
                    tracing::info!(column = %column.key, to = %target, warning = *w, "retype held back");
                }
                self.options.accept_warnings
            }
            RetypeReport::Unsafe { rows, reason } => {
                tracing::info!(column = %column.key, to = %target, %reason, failed = rows.len(), "retype refused");
                false
            }
        };

        if applied && column.cell_type != target {
            self.store.write_column_type(&self.view, column_id, target)?;
        }

        Ok(RetypeOutcome { report, applied })
    }

    /// Validate and store a single cell
    pub fn write_cell(&mut self, row_id: &RowId, column_key: &str, value: &CellValue) -> ViewResult<()> {
        let column = self.visible_column(column_key)?;
        if !column.editable {
            return Err(ViewError::ReadOnlyColumn(column.key));
        }
        let storage = serialize_cell(&column, value)?;
        self.store.write_cell(&self.view, row_id, column_key, storage)
    }

    /// Write the view as CSV
    #[cfg(feature = "csv")]
    pub fn export_csv<W: std::io::Write>(
        &self,
        writer: W,
        options: &cellgrid_csv::CsvWriteOptions,
    ) -> ViewResult<()> {
        let view = self.deserialize_view()?;
        cellgrid_csv::CsvWriter::write(&view, writer, options)?;
        Ok(())
    }

    fn visible_column(&self, key: &str) -> ViewResult<ColumnDescriptor> {
        self.store
            .fetch_columns(&self.view)?
            .into_iter()
            .find(|c| c.key == key && !c.is_internal())
            .ok_or_else(|| ViewError::ColumnNotFound(key.to_string()))
    }

    /// Current values of `column`, keyed by row identity
    fn column_values(
        &self,
        columns: Vec<ColumnDescriptor>,
        column: &ColumnDescriptor,
    ) -> ViewResult<BTreeMap<RowId, StorageValue>> {
        let rows = self.store.fetch_rows(&self.view)?;
        let (_, rows) = process_internal_columns(columns, rows)?;

        rows.into_iter()
            .enumerate()
            .map(|(position, row)| {
                let id = row.id.clone().ok_or(ViewError::MissingRowId(position))?;
                let value = row.get(&column.key).cloned().unwrap_or(StorageValue::Null);
                Ok::<_, ViewError>((id, value))
            })
            .collect()
    }
}
