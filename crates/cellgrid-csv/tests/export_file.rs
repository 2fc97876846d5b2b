//! Writing a deserialized view to disk

use cellgrid_core::{deserialize_view, CellType, ColumnDescriptor, ColumnKind, Row};
use cellgrid_csv::{CsvWriteOptions, CsvWriter};
use serde_json::json;

#[test]
fn test_write_file_uses_export_rules() {
    let columns = vec![
        ColumnDescriptor::new("due", CellType::Date).with_name("Due"),
        ColumnDescriptor::new("tags", CellType::MultiSelect).with_name("Tags"),
        ColumnDescriptor::new("ok", CellType::Boolean).with_name("OK"),
        ColumnDescriptor::new("id", CellType::Number).with_kind(ColumnKind::Identity),
    ];
    let rows = vec![
        Row::from_json(json!({"id": 1, "due": "2024-06-30", "tags": ["a", "b"], "ok": true}))
            .unwrap(),
        Row::from_json(json!({"id": 2, "due": null, "tags": "", "ok": 0})).unwrap(),
    ];
    let view = deserialize_view(columns, rows).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("view.csv");
    CsvWriter::write_file(&view, &path, &CsvWriteOptions::default()).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "Due,Tags,OK\r\n2024-06-30,\"a, b\",true\r\n,,false\r\n"
    );
}
