//! Row scanning
//!
//! [`RowScanner`] pulls raw rows from a cursor, converts every cell with the
//! rule table and hands the converted cells to an assembler. It is a single
//! forward pass: the first failure ends the sequence.

use crate::assembler::RowAssembler;
use crate::cursor::ResultCursor;
use crate::descriptor::{extract_descriptors, ColumnDescriptor};
use crate::errors::ScanError;
use std::iter::FusedIterator;
use tokio_util::sync::CancellationToken;
use type_mapping::{RawCell, RuleTable, TypedCell};

/// Lazy iterator of assembled rows over one cursor
pub struct RowScanner<'a, C, A>
where
    C: ResultCursor + ?Sized,
    A: RowAssembler,
{
    cursor: &'a mut C,
    rules: &'a RuleTable,
    descriptors: Vec<ColumnDescriptor>,
    assembler: A,
    cancel: Option<CancellationToken>,
    row_limit: Option<usize>,
    rows_read: usize,
    finished: bool,
}

impl<'a, C, A> RowScanner<'a, C, A>
where
    C: ResultCursor + ?Sized,
    A: RowAssembler,
{
    /// Scan with descriptors extracted beforehand
    pub fn new(
        cursor: &'a mut C,
        descriptors: Vec<ColumnDescriptor>,
        rules: &'a RuleTable,
        assembler: A,
    ) -> Self {
        Self {
            cursor,
            rules,
            descriptors,
            assembler,
            cancel: None,
            row_limit: None,
            rows_read: 0,
            finished: false,
        }
    }

    /// Extract descriptors keyed for `rules` and start scanning
    pub fn open(cursor: &'a mut C, rules: &'a RuleTable, assembler: A) -> Result<Self, ScanError> {
        let descriptors = extract_descriptors(cursor, rules.strategy())?;
        Ok(Self::new(cursor, descriptors, rules, assembler))
    }

    /// Stop with [`ScanError::Cancelled`] once `token` is cancelled, checked before each row
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Stop cleanly after `limit` rows
    pub fn with_row_limit(mut self, limit: usize) -> Self {
        self.row_limit = Some(limit);
        self
    }

    pub fn descriptors(&self) -> &[ColumnDescriptor] {
        &self.descriptors
    }

    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Drain every row. On failure the rows read so far are discarded and only the error is returned.
    pub fn collect_rows(self) -> Result<Vec<A::Row>, ScanError> {
        self.collect()
    }

    fn scan_next(&mut self) -> Result<Option<A::Row>, ScanError> {
        if self.row_limit.is_some_and(|limit| self.rows_read >= limit) {
            #[cfg(feature = "debug-logging")]
            tracing::debug!("row limit reached after {} rows", self.rows_read);
            return Ok(None);
        }

        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(ScanError::Cancelled {
                rows_read: self.rows_read,
            });
        }

        let row = self.rows_read;
        let raw_cells = match self
            .cursor
            .next_row()
            .map_err(|source| ScanError::ScanIo { row, source })?
        {
            Some(raw_cells) => raw_cells,
            None => return Ok(None),
        };

        let cells = self.convert_row(row, &raw_cells)?;
        self.rows_read += 1;
        Ok(Some(self.assembler.assemble(&self.descriptors, cells)))
    }

    fn convert_row(&self, row: usize, raw_cells: &[RawCell]) -> Result<Vec<TypedCell>, ScanError> {
        if raw_cells.len() != self.descriptors.len() {
            return Err(ScanError::ColumnCountMismatch {
                row,
                expected: self.descriptors.len(),
                actual: raw_cells.len(),
            });
        }

        self.descriptors
            .iter()
            .zip(raw_cells)
            .map(|(descriptor, raw)| {
                self.rules
                    .convert(&descriptor.key, raw.as_deref())
                    .map_err(|source| ScanError::Conversion {
                        row,
                        column: descriptor.name.clone(),
                        position: descriptor.position,
                        source,
                    })
            })
            .collect()
    }
}

impl<C, A> Iterator for RowScanner<'_, C, A>
where
    C: ResultCursor + ?Sized,
    A: RowAssembler,
{
    type Item = Result<A::Row, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.scan_next() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                #[cfg(feature = "debug-logging")]
                tracing::debug!("scan aborted: {}", e);
                Some(Err(e))
            }
        }
    }
}

impl<C, A> FusedIterator for RowScanner<'_, C, A>
where
    C: ResultCursor + ?Sized,
    A: RowAssembler,
{
}
