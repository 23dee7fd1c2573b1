//! The streaming column cursor consumed by `unmap`.

use std::convert::Infallible;

use crate::row::{Column, Row};

/// Why a provider stopped producing columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exhaustion {
    /// Nothing was returned at all.
    Done,
    /// The row ended before the requested page limit was reached.
    EndBeforeLimit,
    /// The page limit was reached; more columns may exist beyond it.
    EndAtLimit,
}

/// Outcome of [`RowProvider::next_column`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextColumn {
    Column(Column),
    End(Exhaustion),
}

/// Sequential cursor over the columns of one physical row.
///
/// A provider is used by one `unmap` call at a time. [`rewind`](Self::rewind)
/// only ever steps back over the column most recently returned.
pub trait RowProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    fn key(&mut self) -> Result<Vec<u8>, Self::Error>;

    fn next_column(&mut self) -> Result<NextColumn, Self::Error>;

    /// Un-consumes the last column returned by `next_column`.
    fn rewind(&mut self);
}

/// In-memory [`RowProvider`] over a fetched row.
///
/// Columns are served in name order. With a page limit only the first `limit`
/// columns are visible and a full page ends with [`Exhaustion::EndAtLimit`].
#[derive(Debug, Clone)]
pub struct RowCursor {
    row: Row,
    limit: Option<usize>,
    position: usize,
    can_rewind: bool,
}

impl RowCursor {
    pub fn new(mut row: Row) -> Self {
        row.sort_columns();
        Self {
            row,
            limit: None,
            position: 0,
            can_rewind: false,
        }
    }

    pub fn with_limit(row: Row, limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::new(row)
        }
    }

    /// Index of the next column to be returned.
    pub fn position(&self) -> usize {
        self.position
    }

    fn visible(&self) -> usize {
        match self.limit {
            Some(limit) => limit.min(self.row.columns.len()),
            None => self.row.columns.len(),
        }
    }

    fn exhaustion(&self) -> Exhaustion {
        if self.row.columns.is_empty() {
            Exhaustion::Done
        } else if self.limit.is_some_and(|l| self.row.columns.len() >= l) {
            Exhaustion::EndAtLimit
        } else {
            Exhaustion::EndBeforeLimit
        }
    }
}

impl RowProvider for RowCursor {
    type Error = Infallible;

    fn key(&mut self) -> Result<Vec<u8>, Self::Error> {
        Ok(self.row.key.clone())
    }

    fn next_column(&mut self) -> Result<NextColumn, Self::Error> {
        if self.position >= self.visible() {
            self.can_rewind = false;
            return Ok(NextColumn::End(self.exhaustion()));
        }
        let column = self.row.columns[self.position].clone();
        self.position += 1;
        self.can_rewind = true;
        Ok(NextColumn::Column(column))
    }

    fn rewind(&mut self) {
        if self.can_rewind {
            self.position -= 1;
            self.can_rewind = false;
        }
    }
}
