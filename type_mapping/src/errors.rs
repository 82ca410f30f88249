//! Error types for value conversion
//!
//! This module defines the failures a matched conversion rule can report.

use crate::sql::ScanShape;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// A matched rule rejected the raw text of a cell
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("invalid integer literal '{value}': {source}")]
    Integer {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid float literal '{value}': {source}")]
    Float {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("float literal '{0}' is out of range")]
    FloatOutOfRange(String),

    #[error("unsupported boolean value '{0}', expected '0' or '1'")]
    Boolean(String),

    #[error("value '{value}' matches no accepted date/time layout")]
    DateTime {
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("failed to decode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scan shape {0} is not supported")]
    UnsupportedShape(ScanShape),
}
