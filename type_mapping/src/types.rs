//! Typed cell definitions
//!
//! This module provides the value produced for every converted column
//! and the conversions from plain Rust values into it.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

/// Driver-level rendering of one column value in one row, `None` for SQL NULL
pub type RawCell = Option<String>;

/// Converted column value, ready for structured serialization
///
/// Serializes untagged, so a row of cells becomes plain JSON scalars:
/// `Null` as `null`, timestamps as RFC 3339 strings, `Json` as the decoded document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedCell {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    LocalTimestamp(DateTime<Local>),
    Json(serde_json::Value),
    Text(String),
}

impl TypedCell {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            TypedCell::Json(v) => Some(v),
            _ => None,
        }
    }
}

impl From<String> for TypedCell {
    fn from(val: String) -> Self {
        TypedCell::Text(val)
    }
}

impl From<&str> for TypedCell {
    fn from(val: &str) -> Self {
        TypedCell::Text(val.to_string())
    }
}

impl From<i64> for TypedCell {
    fn from(val: i64) -> Self {
        TypedCell::Int(val)
    }
}

impl From<f64> for TypedCell {
    fn from(val: f64) -> Self {
        TypedCell::Float(val)
    }
}

impl From<bool> for TypedCell {
    fn from(val: bool) -> Self {
        TypedCell::Bool(val)
    }
}

impl From<DateTime<Utc>> for TypedCell {
    fn from(val: DateTime<Utc>) -> Self {
        TypedCell::Timestamp(val)
    }
}

impl From<DateTime<Local>> for TypedCell {
    fn from(val: DateTime<Local>) -> Self {
        TypedCell::LocalTimestamp(val)
    }
}

impl From<serde_json::Value> for TypedCell {
    fn from(val: serde_json::Value) -> Self {
        TypedCell::Json(val)
    }
}

impl<T> From<Option<T>> for TypedCell
where
    T: Into<TypedCell>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => TypedCell::Null,
        }
    }
}
