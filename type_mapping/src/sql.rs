//! SQL column type keys
//!
//! This module names the column descriptors a rule table can be keyed by:
//! the coarse scan shape a driver reports, or the exact database type name.

use config::MatchStrategy;
use std::fmt;

/// Driver-reported scan shape of a column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScanShape {
    NullBool,
    NullByte,
    NullFloat64,
    NullInt16,
    NullInt32,
    NullInt64,
    NullString,
    NullTime,
    /// Any shape without a dedicated variant, kept verbatim
    Other(String),
}

impl ScanShape {
    /// Map a driver scan type name to a shape, tolerating a package prefix (`sql.NullInt64`)
    pub fn from_driver_name(name: &str) -> Self {
        let trimmed = name.trim();
        let short = trimmed.rsplit('.').next().unwrap_or(trimmed);
        match short {
            "NullBool" => ScanShape::NullBool,
            "NullByte" => ScanShape::NullByte,
            "NullFloat64" => ScanShape::NullFloat64,
            "NullInt16" => ScanShape::NullInt16,
            "NullInt32" => ScanShape::NullInt32,
            "NullInt64" => ScanShape::NullInt64,
            "NullString" => ScanShape::NullString,
            "NullTime" => ScanShape::NullTime,
            _ => ScanShape::Other(trimmed.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ScanShape::NullBool => "NullBool",
            ScanShape::NullByte => "NullByte",
            ScanShape::NullFloat64 => "NullFloat64",
            ScanShape::NullInt16 => "NullInt16",
            ScanShape::NullInt32 => "NullInt32",
            ScanShape::NullInt64 => "NullInt64",
            ScanShape::NullString => "NullString",
            ScanShape::NullTime => "NullTime",
            ScanShape::Other(name) => name,
        }
    }
}

impl fmt::Display for ScanShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Database-specific column type name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DatabaseType {
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    BigInt,
    Year,
    Float,
    Double,
    Decimal,
    Date,
    DateTime,
    Timestamp,
    Json,
    /// Any type name without a dedicated variant, upper-cased
    Other(String),
}

impl DatabaseType {
    /// Map a reported type name to a database type
    pub fn from_type_name(type_name: &str) -> Self {
        // Drivers disagree on case, normalize before matching
        let normalized = type_name.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "TINYINT" => DatabaseType::TinyInt,
            "SMALLINT" => DatabaseType::SmallInt,
            "MEDIUMINT" => DatabaseType::MediumInt,
            "INT" => DatabaseType::Int,
            "BIGINT" => DatabaseType::BigInt,
            "YEAR" => DatabaseType::Year,
            "FLOAT" => DatabaseType::Float,
            "DOUBLE" => DatabaseType::Double,
            "DECIMAL" => DatabaseType::Decimal,
            "DATE" => DatabaseType::Date,
            "DATETIME" => DatabaseType::DateTime,
            "TIMESTAMP" => DatabaseType::Timestamp,
            "JSON" => DatabaseType::Json,
            _ => DatabaseType::Other(normalized),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DatabaseType::TinyInt => "TINYINT",
            DatabaseType::SmallInt => "SMALLINT",
            DatabaseType::MediumInt => "MEDIUMINT",
            DatabaseType::Int => "INT",
            DatabaseType::BigInt => "BIGINT",
            DatabaseType::Year => "YEAR",
            DatabaseType::Float => "FLOAT",
            DatabaseType::Double => "DOUBLE",
            DatabaseType::Decimal => "DECIMAL",
            DatabaseType::Date => "DATE",
            DatabaseType::DateTime => "DATETIME",
            DatabaseType::Timestamp => "TIMESTAMP",
            DatabaseType::Json => "JSON",
            DatabaseType::Other(name) => name,
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key a conversion rule is matched by
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnTypeKey {
    Shape(ScanShape),
    Database(DatabaseType),
}

impl ColumnTypeKey {
    /// Build the key of the requested kind from a column's reported metadata
    pub fn for_strategy(strategy: MatchStrategy, scan_shape: &ScanShape, type_name: &str) -> Self {
        match strategy {
            MatchStrategy::ScanShape => ColumnTypeKey::Shape(scan_shape.clone()),
            MatchStrategy::DatabaseType => {
                ColumnTypeKey::Database(DatabaseType::from_type_name(type_name))
            }
        }
    }

    /// The table kind this key can match in
    pub fn strategy(&self) -> MatchStrategy {
        match self {
            ColumnTypeKey::Shape(_) => MatchStrategy::ScanShape,
            ColumnTypeKey::Database(_) => MatchStrategy::DatabaseType,
        }
    }
}

impl fmt::Display for ColumnTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnTypeKey::Shape(shape) => write!(f, "shape {}", shape),
            ColumnTypeKey::Database(db_type) => write!(f, "type {}", db_type),
        }
    }
}

impl From<ScanShape> for ColumnTypeKey {
    fn from(shape: ScanShape) -> Self {
        ColumnTypeKey::Shape(shape)
    }
}

impl From<DatabaseType> for ColumnTypeKey {
    fn from(db_type: DatabaseType) -> Self {
        ColumnTypeKey::Database(db_type)
    }
}
