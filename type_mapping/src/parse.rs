//! Text parsers shared by the conversion rules
//!
//! Every parser takes the non-null driver rendering of a cell. NULL handling
//! happens once, in the rule, before any of these run.

use crate::errors::ConversionError;
use crate::types::TypedCell;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// `YYYY-MM-DD`
pub const DATE_LAYOUT: &str = "%Y-%m-%d";
/// `YYYY-MM-DD HH:MM:SS`, fractional seconds optional
pub const DATETIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.f";
/// `YYYY-MM-DDTHH:MM:SSZ`, fractional seconds optional
pub const DATETIME_UTC_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

pub fn parse_int(raw: &str) -> Result<i64, ConversionError> {
    raw.parse::<i64>().map_err(|source| ConversionError::Integer {
        value: raw.to_string(),
        source,
    })
}

/// Out-of-range literals such as `1e400` are rejected; only explicit `inf` tokens become infinite
pub fn parse_float(raw: &str) -> Result<f64, ConversionError> {
    let value = raw.parse::<f64>().map_err(|source| ConversionError::Float {
        value: raw.to_string(),
        source,
    })?;
    if value.is_infinite() && !is_infinity_token(raw) {
        return Err(ConversionError::FloatOutOfRange(raw.to_string()));
    }
    Ok(value)
}

fn is_infinity_token(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Only the driver's `"0"`/`"1"` tokens are accepted
pub fn parse_bool(raw: &str) -> Result<bool, ConversionError> {
    match raw {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(ConversionError::Boolean(other.to_string())),
    }
}

/// Parse a date or datetime in one of the three driver layouts.
///
/// The text must match a layout exactly, with zero-padded fields and nothing around
/// them. Values without an offset are read as UTC.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, ConversionError> {
    let failure = |source: Option<chrono::ParseError>| ConversionError::DateTime {
        value: raw.to_string(),
        source,
    };
    let parsed = match detect_layout(raw.as_bytes()) {
        Some(DATE_LAYOUT) => NaiveDate::parse_from_str(raw, DATE_LAYOUT)
            .map(|date| date.and_time(NaiveTime::MIN)),
        Some(layout) => NaiveDateTime::parse_from_str(raw, layout),
        None => return Err(failure(None)),
    };
    parsed
        .map(|naive| naive.and_utc())
        .map_err(|err| failure(Some(err)))
}

fn detect_layout(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() < 10 || !is_date(&bytes[..10]) {
        return None;
    }
    match bytes.get(10) {
        None => Some(DATE_LAYOUT),
        Some(b' ') if is_clock(&bytes[11..]) => Some(DATETIME_LAYOUT),
        Some(b'T') => match bytes[11..].split_last() {
            Some((b'Z', clock)) if is_clock(clock) => Some(DATETIME_UTC_LAYOUT),
            _ => None,
        },
        _ => None,
    }
}

fn all_digits(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(u8::is_ascii_digit)
}

// YYYY-MM-DD
fn is_date(bytes: &[u8]) -> bool {
    bytes[4] == b'-'
        && bytes[7] == b'-'
        && all_digits(&bytes[..4])
        && all_digits(&bytes[5..7])
        && all_digits(&bytes[8..10])
}

// HH:MM:SS with an optional .fraction
fn is_clock(bytes: &[u8]) -> bool {
    if bytes.len() < 8 {
        return false;
    }
    let (clock, fraction) = bytes.split_at(8);
    clock[2] == b':'
        && clock[5] == b':'
        && all_digits(&clock[..2])
        && all_digits(&clock[3..5])
        && all_digits(&clock[6..8])
        && match fraction.split_first() {
            None => true,
            Some((b'.', digits)) => all_digits(digits),
            Some(_) => false,
        }
}

/// Decode a JSON document of any shape
pub fn parse_json(raw: &str) -> Result<serde_json::Value, ConversionError> {
    Ok(serde_json::from_str(raw)?)
}

/// Pass the text through untouched
pub fn pass_through(raw: &str) -> Result<TypedCell, ConversionError> {
    Ok(TypedCell::Text(raw.to_string()))
}
