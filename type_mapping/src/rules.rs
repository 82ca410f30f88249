//! Conversion rules and rule tables
//!
//! A [`RuleTable`] is an ordered list of [`ConversionRule`]s keyed by one kind of
//! [`ColumnTypeKey`]. Lookup walks the list and applies the first rule whose key
//! equals the column's key; columns without a rule pass through as text.

use crate::errors::ConversionError;
use crate::parse::{parse_bool, parse_float, parse_instant, parse_int, parse_json, pass_through};
use crate::sql::{ColumnTypeKey, DatabaseType, ScanShape};
use crate::types::TypedCell;
use config::{MatchStrategy, TimePolicy};
use std::fmt;
use std::sync::LazyLock;

/// Parser invoked with the non-null text of a cell
pub type ConvertFn = dyn Fn(&str) -> Result<TypedCell, ConversionError> + Send + Sync;

/// A (type key, parser) pair
pub struct ConversionRule {
    label: String,
    key: ColumnTypeKey,
    convert: Box<ConvertFn>,
}

impl ConversionRule {
    pub fn new<K, F>(label: impl Into<String>, key: K, convert: F) -> Self
    where
        K: Into<ColumnTypeKey>,
        F: Fn(&str) -> Result<TypedCell, ConversionError> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            key: key.into(),
            convert: Box::new(convert),
        }
    }

    /// Diagnostic name of the rule
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> &ColumnTypeKey {
        &self.key
    }

    /// Convert one cell. NULL never reaches the parser.
    pub fn apply(&self, raw: Option<&str>) -> Result<TypedCell, ConversionError> {
        match raw {
            None => Ok(TypedCell::Null),
            Some(text) => (self.convert)(text),
        }
    }
}

impl fmt::Debug for ConversionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRule")
            .field("label", &self.label)
            .field("key", &self.key)
            .finish()
    }
}

static SCAN_SHAPE_RULES: LazyLock<RuleTable> = LazyLock::new(RuleTable::scan_shape);
static LOCAL_TIME_RULES: LazyLock<RuleTable> =
    LazyLock::new(|| RuleTable::database_type(TimePolicy::Local));
static FRAME_TIME_RULES: LazyLock<RuleTable> =
    LazyLock::new(|| RuleTable::database_type(TimePolicy::Frame));

/// Ordered, immutable collection of conversion rules of one key kind
#[derive(Debug)]
pub struct RuleTable {
    strategy: MatchStrategy,
    rules: Vec<ConversionRule>,
}

impl RuleTable {
    /// Create an empty table; every column passes through until rules are added
    pub fn new(strategy: MatchStrategy) -> Self {
        Self {
            strategy,
            rules: Vec::new(),
        }
    }

    /// Built-in table for the given configuration
    pub fn for_config(strategy: MatchStrategy, time_policy: TimePolicy) -> Self {
        match strategy {
            MatchStrategy::ScanShape => Self::scan_shape(),
            MatchStrategy::DatabaseType => Self::database_type(time_policy),
        }
    }

    /// Process-wide built-in table, constructed on first use and never mutated
    pub fn shared(strategy: MatchStrategy, time_policy: TimePolicy) -> &'static RuleTable {
        match (strategy, time_policy) {
            (MatchStrategy::ScanShape, _) => &SCAN_SHAPE_RULES,
            (MatchStrategy::DatabaseType, TimePolicy::Local) => &LOCAL_TIME_RULES,
            (MatchStrategy::DatabaseType, TimePolicy::Frame) => &FRAME_TIME_RULES,
        }
    }

    /// Coarse table keyed by driver scan shape. Times stay in UTC.
    pub fn scan_shape() -> Self {
        Self::new(MatchStrategy::ScanShape)
            .with_rule(ConversionRule::new("NullTime", ScanShape::NullTime, |raw| {
                Ok(TypedCell::Timestamp(parse_instant(raw)?))
            }))
            .with_rule(ConversionRule::new("NullString", ScanShape::NullString, pass_through))
            // Single-byte columns have no agreed rendering, reject them outright
            .with_rule(ConversionRule::new("NullByte", ScanShape::NullByte, |_| {
                Err(ConversionError::UnsupportedShape(ScanShape::NullByte))
            }))
            .with_rule(ConversionRule::new("NullBool", ScanShape::NullBool, |raw| {
                Ok(TypedCell::Bool(parse_bool(raw)?))
            }))
            .with_rule(ConversionRule::new("NullFloat64", ScanShape::NullFloat64, float_cell))
            .with_rule(ConversionRule::new("NullInt16", ScanShape::NullInt16, int_cell))
            .with_rule(ConversionRule::new("NullInt32", ScanShape::NullInt32, int_cell))
            .with_rule(ConversionRule::new("NullInt64", ScanShape::NullInt64, int_cell))
    }

    /// Fine-grained table keyed by exact database type name
    pub fn database_type(time_policy: TimePolicy) -> Self {
        let mut table = Self::new(MatchStrategy::DatabaseType);

        for db_type in [
            DatabaseType::Double,
            DatabaseType::Decimal,
            DatabaseType::Float,
        ] {
            table = table.with_rule(ConversionRule::new(
                format!("handle {}", db_type),
                db_type,
                float_cell,
            ));
        }

        for db_type in [
            DatabaseType::BigInt,
            DatabaseType::Year,
            DatabaseType::TinyInt,
            DatabaseType::SmallInt,
            DatabaseType::MediumInt,
            DatabaseType::Int,
        ] {
            table = table.with_rule(ConversionRule::new(
                format!("handle {}", db_type),
                db_type,
                int_cell,
            ));
        }

        for db_type in [DatabaseType::Date, DatabaseType::DateTime] {
            table = table.with_rule(ConversionRule::new(
                format!("handle {}", db_type),
                db_type,
                move |raw| time_cell(raw, time_policy),
            ));
        }

        table
            .with_rule(ConversionRule::new(
                "handle TIMESTAMP",
                DatabaseType::Timestamp,
                move |raw| match time_policy {
                    TimePolicy::Local => time_cell(raw, time_policy),
                    TimePolicy::Frame => Ok(TypedCell::Int(parse_instant(raw)?.timestamp())),
                },
            ))
            .with_rule(ConversionRule::new("handle JSON", DatabaseType::Json, |raw| {
                Ok(TypedCell::Json(parse_json(raw)?))
            }))
    }

    /// Append a rule. Earlier rules win when keys collide.
    pub fn with_rule(mut self, rule: ConversionRule) -> Self {
        #[cfg(feature = "debug-logging")]
        if rule.key().strategy() != self.strategy {
            tracing::debug!(
                "rule '{}' is keyed by {} but the table matches by {}, it will never apply",
                rule.label(),
                rule.key(),
                self.strategy
            );
        }
        self.rules.push(rule);
        self
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversionRule> {
        self.rules.iter()
    }

    /// First rule whose key equals `key`
    pub fn find(&self, key: &ColumnTypeKey) -> Option<&ConversionRule> {
        self.rules.iter().find(|rule| rule.key() == key)
    }

    /// Convert one raw cell for a column of type `key`.
    ///
    /// Unmatched keys are not an error: the raw text (or NULL) is returned as-is.
    pub fn convert(
        &self,
        key: &ColumnTypeKey,
        raw: Option<&str>,
    ) -> Result<TypedCell, ConversionError> {
        match self.find(key) {
            Some(rule) => {
                #[cfg(feature = "debug-logging")]
                tracing::trace!("converting {} with rule '{}'", key, rule.label());
                rule.apply(raw)
            }
            None => Ok(raw.map(str::to_string).into()),
        }
    }
}

fn int_cell(raw: &str) -> Result<TypedCell, ConversionError> {
    Ok(TypedCell::Int(parse_int(raw)?))
}

fn float_cell(raw: &str) -> Result<TypedCell, ConversionError> {
    Ok(TypedCell::Float(parse_float(raw)?))
}

fn time_cell(raw: &str, time_policy: TimePolicy) -> Result<TypedCell, ConversionError> {
    let instant = parse_instant(raw)?;
    Ok(match time_policy {
        TimePolicy::Local => TypedCell::LocalTimestamp(instant.with_timezone(&chrono::Local)),
        TimePolicy::Frame => TypedCell::Timestamp(instant),
    })
}
