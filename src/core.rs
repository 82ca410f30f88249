//! Core RowHaus functionality
//!
//! This module contains the main RowHaus struct and its implementation,
//! coordinating configuration, rule tables and row scanning over a cursor.

use row_scanner::{
    CancellationToken, CursorGuard, LayoutAssembler, NameKeyed, Positional, ResultCursor,
    RowAssembler, RowLayout, RowScanner, TypedRow,
};
use std::collections::HashMap;
use std::sync::Arc;
use type_mapping::{RuleTable, TypedCell};

use crate::errors::RowHausError;
use config::{AppConfig, ScanConfig};

enum Rules {
    Shared(&'static RuleTable),
    Custom(Arc<RuleTable>),
}

/// Main RowHaus coordinator that turns result cursors into typed rows
///
/// Holds an immutable rule table, so one instance can serve any number of scans,
/// including concurrent ones on different cursors.
pub struct RowHaus {
    config: ScanConfig,
    rules: Rules,
}

impl std::fmt::Debug for RowHaus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowHaus")
            .field("config", &self.config)
            .field("rule_count", &self.rules().len())
            .finish()
    }
}

impl RowHaus {
    /// Create a new RowHaus using the built-in rule table for `config`
    pub fn new(config: ScanConfig) -> Self {
        let rules = Rules::Shared(RuleTable::shared(config.match_strategy, config.time_policy));
        Self { config, rules }
    }

    /// Create a RowHaus from the configuration file (see [`AppConfig::load`])
    pub fn load() -> Result<Self, RowHausError> {
        let app_config = AppConfig::load()?;
        Ok(Self::from_app_config(&app_config))
    }

    pub fn from_app_config(app_config: &AppConfig) -> Self {
        Self::new(app_config.scan.clone())
    }

    /// Replace the built-in rule table. The table's own strategy decides how columns are keyed.
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.config.match_strategy = rules.strategy();
        self.rules = Rules::Custom(Arc::new(rules));
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleTable {
        match &self.rules {
            Rules::Shared(rules) => *rules,
            Rules::Custom(rules) => rules.as_ref(),
        }
    }

    /// Scan every row of `cursor` with `assembler`.
    ///
    /// The cursor is closed before returning, whatever the outcome. On failure no rows are returned.
    pub fn scan<C, A>(&self, cursor: C, assembler: A) -> Result<Vec<A::Row>, RowHausError>
    where
        C: ResultCursor,
        A: RowAssembler,
    {
        self.scan_inner(cursor, assembler, None)
    }

    /// Like [`RowHaus::scan`], aborting once `token` is cancelled
    pub fn scan_with_cancellation<C, A>(
        &self,
        cursor: C,
        assembler: A,
        token: CancellationToken,
    ) -> Result<Vec<A::Row>, RowHausError>
    where
        C: ResultCursor,
        A: RowAssembler,
    {
        self.scan_inner(cursor, assembler, Some(token))
    }

    /// Rows as ordered cell sequences
    pub fn scan_positional<C: ResultCursor>(
        &self,
        cursor: C,
    ) -> Result<Vec<Vec<TypedCell>>, RowHausError> {
        self.scan(cursor, Positional)
    }

    /// Rows as column name to cell mappings
    pub fn scan_mapped<C: ResultCursor>(
        &self,
        cursor: C,
    ) -> Result<Vec<HashMap<String, TypedCell>>, RowHausError> {
        self.scan(cursor, NameKeyed)
    }

    /// Rows in a layout chosen at runtime
    pub fn scan_layout<C: ResultCursor>(
        &self,
        cursor: C,
        layout: RowLayout,
    ) -> Result<Vec<TypedRow>, RowHausError> {
        self.scan(cursor, LayoutAssembler(layout))
    }

    /// All rows as one JSON array
    pub fn scan_to_json<C: ResultCursor>(
        &self,
        cursor: C,
        layout: RowLayout,
    ) -> Result<serde_json::Value, RowHausError> {
        let rows = self.scan_layout(cursor, layout)?;
        Ok(serde_json::Value::Array(
            rows.iter().map(TypedRow::to_json).collect(),
        ))
    }

    fn scan_inner<C, A>(
        &self,
        cursor: C,
        assembler: A,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<A::Row>, RowHausError>
    where
        C: ResultCursor,
        A: RowAssembler,
    {
        let mut guard = CursorGuard::new(cursor);

        let mut scanner = RowScanner::open(&mut *guard, self.rules(), assembler)?;
        if let Some(limit) = self.config.max_rows {
            scanner = scanner.with_row_limit(limit);
        }
        if let Some(token) = cancel {
            scanner = scanner.with_cancellation(token);
        }

        crate::debug_log!(
            "scanning {} columns with {} rules keyed by {}",
            scanner.descriptors().len(),
            self.rules().len(),
            self.rules().strategy()
        );

        let rows = scanner.collect_rows()?;

        crate::trace_log!("scan finished with {} rows", rows.len());

        guard.close().map_err(RowHausError::CursorClose)?;
        Ok(rows)
    }
}

impl Default for RowHaus {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}
