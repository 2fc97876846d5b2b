//! Internal column hoisting
//!
//! Internal columns carry per-row metadata (display order, identity, raw foreign
//! keys) that must not reach clients as columns. Hoisting removes them from the
//! column list and copies the values clients do need into the reserved row keys.

use crate::cell::StorageValue;
use crate::column::{ColumnDescriptor, ColumnKind};
use crate::error::{Error, Result};
use crate::row::{integer, RowId, StorageRow, ID_KEY, INDEX_KEY};

/// Strip internal columns and hoist their values into `index` and `_id`.
///
/// Index columns fill `index`, identity columns fill `_id`; a hoisted value replaces
/// whatever the row already held under that key. Foreign key columns contribute
/// nothing. Any other internal column is an error, as is a value that cannot serve
/// as a reserved key. The original cells are left in the rows.
pub fn process_internal_columns(
    columns: Vec<ColumnDescriptor>,
    mut rows: Vec<StorageRow>,
) -> Result<(Vec<ColumnDescriptor>, Vec<StorageRow>)> {
    let expected = rows.len();
    let (internal, visible): (Vec<_>, Vec<_>) =
        columns.into_iter().partition(ColumnDescriptor::is_internal);

    for column in &internal {
        match column.kind {
            ColumnKind::Index => {
                for row in rows.iter_mut() {
                    if let Some(value) = present(row, &column.key) {
                        row.index = Some(read_index(column, value)?);
                    }
                }
            }
            ColumnKind::Identity => {
                for row in rows.iter_mut() {
                    if let Some(value) = present(row, &column.key) {
                        row.id = Some(read_id(column, value)?);
                    }
                }
            }
            ColumnKind::ForeignKey => {}
            ColumnKind::Standard | ColumnKind::Link | ColumnKind::Lookup => {
                tracing::error!(
                    column = %column.key,
                    kind = %column.kind,
                    "no hoisting rule for internal column"
                );
                return Err(Error::UnsupportedInternalColumn {
                    key: column.key.clone(),
                    kind: column.kind,
                });
            }
        }
    }

    check_row_count(expected, rows.len())?;

    tracing::debug!(
        rows = rows.len(),
        hoisted = internal.len(),
        visible = visible.len(),
        "hoisted internal columns"
    );
    Ok((visible, rows))
}

fn check_row_count(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        tracing::error!(expected, actual, "row count changed while hoisting");
        return Err(Error::RowCountMismatch { expected, actual });
    }
    Ok(())
}

fn present<'a>(row: &'a StorageRow, key: &str) -> Option<&'a StorageValue> {
    row.get(key).filter(|v| !v.is_null())
}

fn read_index(column: &ColumnDescriptor, value: &StorageValue) -> Result<i64> {
    integer(value).ok_or_else(|| invalid(INDEX_KEY, column, value))
}

fn read_id(column: &ColumnDescriptor, value: &StorageValue) -> Result<RowId> {
    RowId::from_storage(value).ok_or_else(|| invalid(ID_KEY, column, value))
}

fn invalid(key: &'static str, column: &ColumnDescriptor, value: &StorageValue) -> Error {
    tracing::error!(column = %column.key, key, %value, "unusable reserved value");
    Error::InvalidReservedValue {
        key,
        column: column.key.clone(),
        value: value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{CellType, CellValue};
    use crate::row::Row;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn index_column() -> ColumnDescriptor {
        ColumnDescriptor::new("idx", CellType::Number).with_kind(ColumnKind::Index)
    }

    fn id_column() -> ColumnDescriptor {
        ColumnDescriptor::new("row_id", CellType::Number).with_kind(ColumnKind::Identity)
    }

    #[test]
    fn test_index_scenario() {
        let columns = vec![ColumnDescriptor::new("a", CellType::String), index_column()];
        let rows = vec![
            Row::from_json(json!({"a": "x", "idx": 0})).unwrap(),
            Row::from_json(json!({"a": "y", "idx": 1})).unwrap(),
        ];

        let (columns, rows) = process_internal_columns(columns, rows).unwrap();

        assert_eq!(columns, vec![ColumnDescriptor::new("a", CellType::String)]);
        let rows: Vec<_> = rows
            .iter()
            .map(|r| serde_json::to_value(r).unwrap())
            .collect();
        assert_eq!(
            rows,
            vec![
                json!({"index": 0, "a": "x", "idx": 0}),
                json!({"index": 1, "a": "y", "idx": 1}),
            ]
        );
    }

    #[test]
    fn test_hoisted_values_take_precedence() {
        let rows = vec![Row::from_json(json!({"index": 9, "_id": "old", "idx": 2, "row_id": 5}))
            .unwrap()];
        let (_, rows) = process_internal_columns(vec![index_column(), id_column()], rows).unwrap();
        assert_eq!(rows[0].index, Some(2));
        assert_eq!(rows[0].id, Some(RowId::Int(5)));
    }

    #[test]
    fn test_foreign_keys_are_dropped() {
        let fk = ColumnDescriptor::new("owner_fk", CellType::Number).with_kind(ColumnKind::ForeignKey);
        let rows = vec![Row::from_json(json!({"owner_fk": 3})).unwrap()];
        let (columns, rows) = process_internal_columns(vec![fk], rows).unwrap();
        assert!(columns.is_empty());
        assert_eq!(rows[0].id, None);
        assert_eq!(rows[0].index, None);
    }

    #[test]
    fn test_unknown_internal_kind_fails() {
        let hidden_lookup = ColumnDescriptor::new("l", CellType::String)
            .with_kind(ColumnKind::Lookup)
            .with_internal(true);
        let err = process_internal_columns(vec![hidden_lookup], vec![]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedInternalColumn {
                kind: ColumnKind::Lookup,
                ..
            }
        ));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_unusable_identity_fails() {
        let rows = vec![Row::from_json(json!({"row_id": [1, 2]})).unwrap()];
        let err = process_internal_columns(vec![id_column()], rows).unwrap_err();
        assert!(matches!(err, Error::InvalidReservedValue { key: "_id", .. }));
    }

    #[test]
    fn test_number_cells_written_by_the_registry_hoist() {
        let stored = crate::registry::serialize(CellType::Number, &CellValue::Number(0.0)).unwrap();
        let rows = vec![
            Row::new().with_cell("idx", stored).with_cell("row_id", json!(7.0)),
            Row::from_json(json!({"idx": 3})).unwrap(),
        ];
        let (_, rows) = process_internal_columns(vec![index_column(), id_column()], rows).unwrap();
        assert_eq!(rows[0].index, Some(0));
        assert_eq!(rows[0].id, Some(RowId::Int(7)));
        assert_eq!(rows[1].index, Some(3));
    }

    #[test]
    fn test_fractional_index_fails() {
        let rows = vec![Row::from_json(json!({"idx": 1.5})).unwrap()];
        let err = process_internal_columns(vec![index_column()], rows).unwrap_err();
        assert!(matches!(err, Error::InvalidReservedValue { key: "index", .. }));
    }

    #[test]
    fn test_missing_source_leaves_key_unset() {
        let rows = vec![Row::from_json(json!({"idx": null})).unwrap(), Row::new()];
        let (_, rows) = process_internal_columns(vec![index_column()], rows).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.index.is_none()));
    }

    #[test]
    fn test_row_count_check() {
        assert!(check_row_count(4, 4).is_ok());
        assert!(matches!(
            check_row_count(4, 3),
            Err(Error::RowCountMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_cardinality_with_index_and_identity() {
        for n in [0usize, 1, 17, 500] {
            let rows = (0..n)
                .map(|i| Row::from_json(json!({"a": "v", "idx": i, "row_id": i * 10})).unwrap())
                .collect::<Vec<_>>();
            let columns = vec![
                ColumnDescriptor::new("a", CellType::String),
                index_column(),
                id_column(),
            ];
            let (columns, rows) = process_internal_columns(columns, rows).unwrap();
            assert_eq!(rows.len(), n);
            assert!(rows.iter().all(|r| r.index.is_some() && r.id.is_some()));
            assert!(columns.iter().all(|c| !c.is_internal()));
        }
    }
}
