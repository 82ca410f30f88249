//! Serialization utilities
//!
//! This module projects converted cells into `serde_json::Value`
//! for callers that forward rows as JSON.

use crate::types::TypedCell;
use chrono::SecondsFormat;
use std::collections::HashMap;

/// Convert one cell to a JSON value
pub fn typed_cell_to_json(cell: &TypedCell) -> serde_json::Value {
    match cell {
        TypedCell::Null => serde_json::Value::Null,
        TypedCell::Int(v) => serde_json::Value::from(*v),
        // NaN and infinities have no JSON form
        TypedCell::Float(v) => serde_json::Number::from_f64(*v)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        TypedCell::Bool(v) => serde_json::Value::Bool(*v),
        TypedCell::Timestamp(v) => {
            serde_json::Value::String(v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }
        TypedCell::LocalTimestamp(v) => {
            serde_json::Value::String(v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }
        TypedCell::Json(v) => v.clone(),
        TypedCell::Text(v) => serde_json::Value::String(v.clone()),
    }
}

/// Convert a positional row to a JSON array
pub fn positional_row_to_json(cells: &[TypedCell]) -> serde_json::Value {
    serde_json::Value::Array(cells.iter().map(typed_cell_to_json).collect())
}

/// Convert a name-keyed row to a JSON object
pub fn named_row_to_json(cells: &HashMap<String, TypedCell>) -> serde_json::Value {
    let mut object = serde_json::Map::with_capacity(cells.len());
    for (name, cell) in cells {
        object.insert(name.clone(), typed_cell_to_json(cell));
    }
    serde_json::Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_scalar_projection() {
        assert_eq!(typed_cell_to_json(&TypedCell::Null), json!(null));
        assert_eq!(typed_cell_to_json(&TypedCell::Int(-3)), json!(-3));
        assert_eq!(typed_cell_to_json(&TypedCell::Float(5.7)), json!(5.7));
        assert_eq!(typed_cell_to_json(&TypedCell::Float(f64::NAN)), json!(null));
        assert_eq!(typed_cell_to_json(&TypedCell::Bool(true)), json!(true));
        assert_eq!(typed_cell_to_json(&"mysql".into()), json!("mysql"));
    }

    #[test]
    fn test_timestamp_projection_is_rfc3339() {
        let ts = Utc.with_ymd_and_hms(2024, 7, 22, 10, 30, 0).unwrap();
        assert_eq!(
            typed_cell_to_json(&TypedCell::Timestamp(ts)),
            json!("2024-07-22T10:30:00Z")
        );
    }

    #[test]
    fn test_projection_agrees_with_serialize() {
        let cells = vec![
            TypedCell::Int(1),
            TypedCell::Text("mysql".to_string()),
            TypedCell::Null,
            TypedCell::Json(json!({"a": [1, 2]})),
        ];
        assert_eq!(
            positional_row_to_json(&cells),
            serde_json::to_value(&cells).unwrap()
        );
    }

    #[test]
    fn test_named_row() {
        let row = HashMap::from([
            ("id".to_string(), TypedCell::Int(1)),
            ("name".to_string(), TypedCell::Text("mysql".to_string())),
        ]);
        assert_eq!(named_row_to_json(&row), json!({"id": 1, "name": "mysql"}));
    }
}
