//! Scan demo
//!
//! Scans an in-memory result set shaped like `SELECT * FROM t4` on MySQL with both
//! rule tables and prints the rows as JSON.
//!
//! Run with: cargo run --example scan_demo

use rowhaus::prelude::*;

fn cursor() -> MemoryCursor {
    MemoryCursor::new(vec![
        ColumnMetadata::new("id", ScanShape::NullInt64, "BIGINT"),
        ColumnMetadata::new("name", ScanShape::NullString, "VARCHAR"),
        ColumnMetadata::new("enabled", ScanShape::NullBool, "TINYINT"),
        ColumnMetadata::new("score", ScanShape::NullFloat64, "DOUBLE"),
        ColumnMetadata::new("created", ScanShape::NullTime, "DATETIME"),
        ColumnMetadata::new("updated", ScanShape::NullTime, "TIMESTAMP"),
        ColumnMetadata::new("meta", ScanShape::NullString, "JSON"),
    ])
    .with_row([
        Some("1"),
        Some("mysql"),
        Some("1"),
        Some("5.7"),
        Some("2024-07-22 10:30:00"),
        Some("2024-07-22T10:30:00Z"),
        Some(r#"{"versions":["5.7","8.0"]}"#),
    ])
    .with_row([Some("2"), None, Some("0"), None, None, None, None])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    for (title, config) in [
        (
            "database types, local time",
            ScanConfig::new(MatchStrategy::DatabaseType, TimePolicy::Local, None),
        ),
        (
            "database types, frame time",
            ScanConfig::new(MatchStrategy::DatabaseType, TimePolicy::Frame, None),
        ),
        (
            "scan shapes",
            ScanConfig::new(MatchStrategy::ScanShape, TimePolicy::Local, None),
        ),
    ] {
        let rowhaus = RowHaus::new(config);
        println!("== {}", title);
        println!(
            "{}",
            serde_json::to_string_pretty(&rowhaus.scan_to_json(cursor(), RowLayout::NameKeyed)?)?
        );
        println!(
            "{}",
            serde_json::to_string(&rowhaus.scan_to_json(cursor(), RowLayout::Positional)?)?
        );
    }

    Ok(())
}
