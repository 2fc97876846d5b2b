//! End-to-end tests for serving a view (store -> service -> client and back)

use cellgrid::prelude::*;
use cellgrid::{Error, UnsafeReason};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;

fn tasks() -> ViewSnapshot {
    let columns = vec![
        ColumnDescriptor::new("title", CellType::String)
            .with_id("c_title")
            .with_name("Title"),
        ColumnDescriptor::new("due", CellType::String)
            .with_id("c_due")
            .with_name("Due"),
        ColumnDescriptor::new("contact", CellType::Email)
            .with_id("c_contact")
            .with_name("Contact"),
        ColumnDescriptor::new("tags", CellType::String)
            .with_id("c_tags")
            .with_name("Tags"),
        ColumnDescriptor::new("locked", CellType::Number)
            .with_id("c_locked")
            .with_editable(false),
        ColumnDescriptor::new("pos", CellType::Number)
            .with_id("c_pos")
            .with_kind(ColumnKind::Index),
        ColumnDescriptor::new("rid", CellType::Number)
            .with_id("c_rid")
            .with_kind(ColumnKind::Identity),
        ColumnDescriptor::new("owner_fk", CellType::Number)
            .with_id("c_fk")
            .with_kind(ColumnKind::ForeignKey),
    ];
    let rows = vec![
        json!({"rid": 1, "pos": 1, "title": "Write docs", "due": "2024-05-01",
               "contact": "ann@example.com", "tags": "docs, q2", "locked": 3, "owner_fk": 9}),
        json!({"rid": 2, "pos": 0, "title": "Ship", "due": "",
               "contact": null, "tags": "release", "locked": 4, "owner_fk": 9}),
    ]
    .into_iter()
    .map(|r| Row::from_json(r).unwrap())
    .collect();
    ViewSnapshot::new(columns, rows)
}

fn service() -> ViewService<MemoryViewStore> {
    ViewService::new(MemoryViewStore::with_view("tasks", tasks()), "tasks")
}

#[test]
fn test_deserialize_view_hides_internal_columns() {
    let view = service().deserialize_view().unwrap();

    let keys: Vec<_> = view.columns.iter().map(|c| c.key()).collect();
    assert_eq!(keys, vec!["title", "due", "contact", "tags", "locked"]);

    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].id, Some(RowId::Int(1)));
    assert_eq!(view.rows[0].index, Some(1));
    assert_eq!(view.rows[1].index, Some(0));
    assert_eq!(view.rows[0].get("owner_fk"), None);
    assert_eq!(view.rows[1].get("due"), Some(&CellValue::Blank));
    assert_eq!(view.rows[1].get("contact"), Some(&CellValue::Empty));
}

#[test]
fn test_column_behavior() {
    let view = service().deserialize_view().unwrap();
    assert!(view.column("title").unwrap().behavior.editable);
    assert!(!view.column("locked").unwrap().behavior.editable);
}

#[test]
fn test_safe_retype_is_applied() {
    let mut svc = service();
    let outcome = svc.request_retype("c_due", CellType::Date).unwrap();
    assert_eq!(outcome.report, RetypeReport::Safe { warning: None });
    assert!(outcome.applied);

    let view = svc.deserialize_view().unwrap();
    assert_eq!(view.column("due").unwrap().cell_type(), CellType::Date);
    assert_eq!(
        view.rows[0].get("due"),
        Some(&CellValue::Date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()))
    );
    assert_eq!(view.rows[1].get("due"), Some(&CellValue::Blank));
}

#[test]
fn test_unsafe_retype_leaves_store_untouched() {
    let mut svc = service();
    let before = svc.store().view("tasks").cloned();

    let outcome = svc.request_retype("c_title", CellType::Number).unwrap();
    assert!(!outcome.applied);
    match &outcome.report {
        RetypeReport::Unsafe { rows, reason } => {
            assert_eq!(rows.len(), 2);
            assert_eq!(
                *reason,
                UnsafeReason::Conflict {
                    to: CellType::Number
                }
            );
        }
        other => panic!("expected unsafe report, got {other:?}"),
    }

    assert_eq!(svc.store().view("tasks").cloned(), before);
}

#[test]
fn test_incompatible_retype_names_every_row() {
    let mut svc = service();
    let outcome = svc.request_retype("c_contact", CellType::Number).unwrap();
    assert!(!outcome.applied);
    assert_eq!(
        outcome.report.failed_rows(),
        Some(&[RowId::Int(1), RowId::Int(2)].into_iter().collect())
    );
    assert!(matches!(
        outcome.report.into_result(),
        Err(Error::IncompatibleType { .. })
    ));
}

#[test]
fn test_warned_retype_needs_acceptance() {
    let mut svc = service();
    let outcome = svc.request_retype("c_tags", CellType::MultiSelect).unwrap();
    assert!(outcome.report.is_safe());
    assert!(outcome.report.warning().is_some());
    assert!(!outcome.applied);
    assert_eq!(
        svc.deserialize_view().unwrap().column("tags").unwrap().cell_type(),
        CellType::String
    );

    let mut svc = ViewService::with_options(
        svc.into_store(),
        "tasks",
        ServiceOptions::new().with_accept_warnings(true),
    );
    let outcome = svc.request_retype("c_tags", CellType::MultiSelect).unwrap();
    assert!(outcome.applied);

    let view = svc.deserialize_view().unwrap();
    assert_eq!(
        view.rows[0].get("tags"),
        Some(&CellValue::MultiSelect(vec!["docs".into(), "q2".into()]))
    );
}

#[test]
fn test_write_cell_validates_before_storing() {
    let mut svc = service();

    svc.write_cell(
        &RowId::Int(2),
        "contact",
        &CellValue::Email("bo@example.com".into()),
    )
    .unwrap();
    let view = svc.deserialize_view().unwrap();
    assert_eq!(
        view.rows[1].get("contact"),
        Some(&CellValue::Email("bo@example.com".into()))
    );

    let err = svc
        .write_cell(&RowId::Int(2), "contact", &CellValue::Email("nope".into()))
        .unwrap_err();
    assert!(matches!(err, ViewError::Core(Error::Validation { .. })));

    let err = svc
        .write_cell(&RowId::Int(1), "locked", &CellValue::Number(5.0))
        .unwrap_err();
    assert!(matches!(err, ViewError::ReadOnlyColumn(_)));

    let err = svc
        .write_cell(&RowId::Int(1), "rid", &CellValue::Number(5.0))
        .unwrap_err();
    assert!(matches!(err, ViewError::ColumnNotFound(_)));
}

#[test]
fn test_serialize_row_for_write() {
    let svc = service();
    let row = Row::new()
        .with_id(1)
        .with_cell("title", CellValue::string("Renamed"))
        .with_cell("due", CellValue::Blank);

    let stored = svc.serialize_row_for_write(&row).unwrap();
    assert_eq!(stored.id, Some(RowId::Int(1)));
    assert_eq!(stored.get("title"), Some(&json!("Renamed")));
    assert_eq!(stored.get("due"), Some(&json!("")));
}

#[test]
fn test_export_value() {
    let svc = service();
    let view = svc.deserialize_view().unwrap();
    assert_eq!(svc.export_value("title", &view.rows[0]).unwrap(), "Write docs");
    assert_eq!(svc.export_value("contact", &view.rows[1]).unwrap(), "");
    assert!(matches!(
        svc.export_value("missing", &view.rows[0]),
        Err(ViewError::ColumnNotFound(_))
    ));
}

#[test]
fn test_snapshot_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    tasks().write_file(&path).unwrap();
    assert_eq!(ViewSnapshot::read_file(&path).unwrap(), tasks());
}

#[test]
fn test_export_csv_in_display_order() {
    let svc = service();
    let mut buf = Vec::new();
    let options = CsvWriteOptions::default().with_line_terminator(cellgrid::LineTerminator::LF);
    svc.export_csv(&mut buf, &options).unwrap();

    let text = String::from_utf8(buf).unwrap();
    assert_eq!(
        text,
        "Title,Due,Contact,Tags,locked\n\
         Ship,,,release,4\n\
         Write docs,2024-05-01,ann@example.com,\"docs, q2\",3\n"
    );
}
