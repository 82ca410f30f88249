//! Integration tests for typed row scanning
//!
//! Drives RowHaus end to end over in-memory cursors: descriptor extraction,
//! both rule tables, both row layouts, failure policy and cursor release.

use chrono::{Local, TimeZone, Utc};
use rowhaus::prelude::*;
use serde_json::json;
use std::sync::atomic::Ordering;

fn id_name_columns() -> Vec<ColumnMetadata> {
    vec![
        ColumnMetadata::new("id", ScanShape::NullInt64, "INT"),
        ColumnMetadata::new("name", ScanShape::NullString, "VARCHAR"),
    ]
}

fn scan_shape_rowhaus() -> RowHaus {
    RowHaus::new(ScanConfig::new(
        MatchStrategy::ScanShape,
        TimePolicy::Local,
        None,
    ))
}

#[test]
fn test_name_keyed_and_positional_layouts() {
    for rowhaus in [RowHaus::default(), scan_shape_rowhaus()] {
        let mapped = rowhaus
            .scan_mapped(MemoryCursor::new(id_name_columns()).with_row([Some("1"), Some("mysql")]))
            .unwrap();
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0]["id"], TypedCell::Int(1));
        assert_eq!(mapped[0]["name"], TypedCell::Text("mysql".to_string()));

        let json = rowhaus
            .scan_to_json(
                MemoryCursor::new(id_name_columns()).with_row([Some("1"), Some("mysql")]),
                RowLayout::NameKeyed,
            )
            .unwrap();
        assert_eq!(json, json!([{"id": 1, "name": "mysql"}]));

        let json = rowhaus
            .scan_to_json(
                MemoryCursor::new(id_name_columns()).with_row([Some("1"), Some("mysql")]),
                RowLayout::Positional,
            )
            .unwrap();
        assert_eq!(json, json!([[1, "mysql"]]));
    }
}

#[test]
fn test_json_column_rows() {
    let cursor = MemoryCursor::new(vec![ColumnMetadata::new(
        "doc",
        ScanShape::Other("sql.RawBytes".to_string()),
        "JSON",
    )])
    .with_row([Some(r#"{"name":"mysql","version":5.7,"enabled":true}"#)])
    .with_row([Some(r#"["5.7","8.0"]"#)])
    .with_row([Some(r#"[{"name":"mysql","version":5.7}]"#)]);

    let rows = RowHaus::default().scan_positional(cursor).unwrap();
    let docs: Vec<_> = rows.iter().map(|row| row[0].as_json().cloned().unwrap()).collect();

    assert_eq!(
        docs,
        vec![
            json!({"enabled": true, "version": 5.7, "name": "mysql"}),
            json!(["5.7", "8.0"]),
            json!([{"version": 5.7, "name": "mysql"}]),
        ]
    );
    assert!(docs[0]["enabled"].is_boolean());
    assert!(docs[0]["version"].is_f64());
}

#[test]
fn test_malformed_json_aborts_scan() {
    let cursor = MemoryCursor::new(vec![ColumnMetadata::new("doc", ScanShape::NullString, "JSON")])
        .with_row([Some("[1]")])
        .with_row([Some("not-json")]);
    let closed = cursor.closed_flag();

    let err = RowHaus::default().scan_positional(cursor).unwrap_err();
    match err {
        RowHausError::Scan(ScanError::Conversion {
            row,
            column,
            source: ConversionError::Json(_),
            ..
        }) => {
            assert_eq!(row, 1);
            assert_eq!(column, "doc");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(closed.load(Ordering::SeqCst));
}

#[test]
fn test_duplicate_column_names_fail_before_scanning() {
    // SELECT id, id FROM t
    let cursor = MemoryCursor::new(vec![
        ColumnMetadata::new("id", ScanShape::NullInt64, "INT"),
        ColumnMetadata::new("id", ScanShape::NullInt64, "INT"),
    ])
    .with_row([Some("1"), Some("1")]);
    let closed = cursor.closed_flag();

    let err = RowHaus::default().scan_mapped(cursor).unwrap_err();
    assert!(matches!(
        err,
        RowHausError::Scan(ScanError::Schema(SchemaError::DuplicateColumn { .. }))
    ));
    assert!(closed.load(Ordering::SeqCst));
}

#[test]
fn test_mixed_mysql_types_with_local_policy() {
    let cursor = MemoryCursor::new(vec![
        ColumnMetadata::new("tiny", ScanShape::NullInt64, "TINYINT"),
        ColumnMetadata::new("big", ScanShape::NullInt64, "BIGINT"),
        ColumnMetadata::new("price", ScanShape::Other("sql.RawBytes".to_string()), "DECIMAL"),
        ColumnMetadata::new("born", ScanShape::NullTime, "YEAR"),
        ColumnMetadata::new("created", ScanShape::NullTime, "DATETIME"),
        ColumnMetadata::new("note", ScanShape::NullString, "TEXT"),
    ])
    .with_row([
        Some("1"),
        Some("9223372036854775807"),
        Some("19.90"),
        Some("1999"),
        Some("2024-07-22 10:30:00"),
        None,
    ]);

    let rows = RowHaus::default().scan_positional(cursor).unwrap();
    let expected_created = Utc
        .with_ymd_and_hms(2024, 7, 22, 10, 30, 0)
        .unwrap()
        .with_timezone(&Local);

    assert_eq!(
        rows[0],
        vec![
            TypedCell::Int(1),
            TypedCell::Int(i64::MAX),
            TypedCell::Float(19.9),
            TypedCell::Int(1999),
            TypedCell::LocalTimestamp(expected_created),
            TypedCell::Null,
        ]
    );
}

#[test]
fn test_frame_policy_reduces_timestamps_to_epoch() {
    let rowhaus = RowHaus::new(ScanConfig::new(
        MatchStrategy::DatabaseType,
        TimePolicy::Frame,
        None,
    ));
    let cursor = MemoryCursor::new(vec![
        ColumnMetadata::new("ts", ScanShape::NullTime, "TIMESTAMP"),
        ColumnMetadata::new("dt", ScanShape::NullTime, "DATETIME"),
    ])
    .with_row([Some("2024-07-22 10:30:00"), Some("2024-07-22T10:30:00Z")])
    .with_row([Some("2024-07-22T10:30:00Z"), None]);

    let rows = rowhaus.scan_to_json(cursor, RowLayout::NameKeyed).unwrap();
    assert_eq!(
        rows,
        json!([
            {"ts": 1721644200, "dt": "2024-07-22T10:30:00Z"},
            {"ts": 1721644200, "dt": null},
        ])
    );
}

#[test]
fn test_scan_shape_table_rows() {
    let cursor = MemoryCursor::new(vec![
        ColumnMetadata::new("small", ScanShape::NullInt16, "SMALLINT"),
        ColumnMetadata::new("ratio", ScanShape::NullFloat64, "DOUBLE"),
        ColumnMetadata::new("active", ScanShape::NullBool, "BOOL"),
        ColumnMetadata::new("seen", ScanShape::NullTime, "DATETIME"),
        ColumnMetadata::new("raw", ScanShape::Other("sql.RawBytes".to_string()), "BLOB"),
    ])
    .with_row([Some("7"), Some("0.5"), Some("1"), Some("2024-07-22T10:30:00Z"), Some("abc")])
    .with_row([None, None, Some("0"), None, None]);

    let rows = scan_shape_rowhaus().scan_to_json(cursor, RowLayout::Positional).unwrap();
    assert_eq!(
        rows,
        json!([
            [7, 0.5, true, "2024-07-22T10:30:00Z", "abc"],
            [null, null, false, null, null],
        ])
    );
}

#[test]
fn test_unsupported_byte_shape_fails() {
    let cursor = MemoryCursor::new(vec![ColumnMetadata::new("b", ScanShape::NullByte, "TINYINT")])
        .with_row([None::<&str>])
        .with_row([Some("1")]);

    let err = scan_shape_rowhaus().scan_positional(cursor).unwrap_err();
    assert!(matches!(
        err,
        RowHausError::Scan(ScanError::Conversion {
            row: 1,
            source: ConversionError::UnsupportedShape(ScanShape::NullByte),
            ..
        })
    ));
}

#[test]
fn test_cursor_failure_discards_earlier_rows() {
    let cursor = MemoryCursor::new(id_name_columns())
        .with_row([Some("1"), Some("a")])
        .with_row([Some("2"), Some("b")])
        .with_failing_row("lost connection to server during query");
    let closed = cursor.closed_flag();

    let err = RowHaus::default().scan_positional(cursor).unwrap_err();
    assert!(matches!(err, RowHausError::Scan(ScanError::ScanIo { row: 2, .. })));
    assert!(err.to_string().contains("row 2 scan failed"));
    assert!(closed.load(Ordering::SeqCst));
}

#[test]
fn test_metadata_failure_is_schema_error() {
    let cursor = MemoryCursor::new(id_name_columns()).with_metadata_error("no result set");
    let err = RowHaus::default().scan_positional(cursor).unwrap_err();
    assert!(matches!(
        err,
        RowHausError::Scan(ScanError::Schema(SchemaError::Metadata(_)))
    ));
}

#[test]
fn test_cursor_closed_after_success() {
    let cursor = MemoryCursor::new(id_name_columns()).with_row([Some("1"), Some("a")]);
    let closed = cursor.closed_flag();

    RowHaus::default().scan_positional(cursor).unwrap();
    assert!(closed.load(Ordering::SeqCst));
}

#[test]
fn test_cancelled_scan_releases_cursor() {
    let cursor = MemoryCursor::new(id_name_columns()).with_row([Some("1"), Some("a")]);
    let closed = cursor.closed_flag();
    let token = CancellationToken::new();
    token.cancel();

    let err = RowHaus::default()
        .scan_with_cancellation(cursor, Positional, token)
        .unwrap_err();
    assert!(matches!(err, RowHausError::Scan(ScanError::Cancelled { rows_read: 0 })));
    assert!(closed.load(Ordering::SeqCst));
}

#[test]
fn test_max_rows_caps_result() {
    let rowhaus = RowHaus::new(ScanConfig::default().with_max_rows(2));
    let cursor = MemoryCursor::new(id_name_columns())
        .with_row([Some("1"), Some("a")])
        .with_row([Some("2"), Some("b")])
        .with_row([Some("3"), Some("c")]);

    let rows = rowhaus.scan_layout(cursor, RowLayout::Positional).unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_custom_rule_table() {
    let rules = RuleTable::database_type(TimePolicy::Frame).with_rule(ConversionRule::new(
        "handle BIT",
        DatabaseType::Other("BIT".to_string()),
        |raw| Ok(TypedCell::Bool(raw == "1")),
    ));
    let rowhaus = RowHaus::default().with_rules(rules);
    assert_eq!(rowhaus.config().match_strategy, MatchStrategy::DatabaseType);

    let cursor = MemoryCursor::new(vec![ColumnMetadata::new("flag", ScanShape::NullBool, "bit")])
        .with_row([Some("1")]);
    let rows = rowhaus.scan_to_json(cursor, RowLayout::Positional).unwrap();
    assert_eq!(rows, json!([[true]]));
}

#[test]
fn test_cursor_by_reference() {
    let mut cursor = MemoryCursor::new(id_name_columns()).with_row([Some("1"), Some("a")]);
    let rows = RowHaus::default().scan_positional(&mut cursor).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(cursor.is_closed());
}

#[test]
fn test_rowhaus_shared_across_threads() {
    let rowhaus = std::sync::Arc::new(RowHaus::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rowhaus = std::sync::Arc::clone(&rowhaus);
            std::thread::spawn(move || {
                let cursor = MemoryCursor::new(id_name_columns())
                    .with_row([Some(i.to_string()), Some(format!("worker-{i}"))]);
                rowhaus.scan_mapped(cursor).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let rows = handle.join().unwrap();
        assert_eq!(rows[0]["id"], TypedCell::Int(i as i64));
    }
}
