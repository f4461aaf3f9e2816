//! Non-destructive logical transforms over a RowsAndColumns.
//!
//! A decorator accumulates transforms and materializes a derived view; the
//! upstream batch is referenced, never mutated. Today the only transform is
//! the time-range restriction the interval-limiting operator applies.

use std::sync::Arc;

use strata_core::interval::Interval;
use strata_core::TIME_COLUMN;

use crate::column::{Column, MappedColumn};
use crate::rac::RowsAndColumns;

pub struct RowsAndColumnsDecorator {
    base: Arc<dyn RowsAndColumns>,
    time_range: Option<Interval>,
}

impl RowsAndColumnsDecorator {
    pub fn from_rac(base: Arc<dyn RowsAndColumns>) -> Self {
        Self {
            base,
            time_range: None,
        }
    }

    /// Restrict rows to those whose time value falls in the half-open
    /// interval. No-op for eternity; repeated calls intersect.
    pub fn limit_time_range(&mut self, interval: Interval) {
        if interval.is_eternity() {
            return;
        }
        self.time_range = Some(match self.time_range {
            Some(existing) => existing.overlap(&interval),
            None => interval,
        });
    }

    /// Materialize the accumulated transforms. With none, the base batch
    /// passes through untouched.
    pub fn to_rows_and_columns(self) -> Arc<dyn RowsAndColumns> {
        let Some(range) = self.time_range else {
            return self.base;
        };

        let Some(time) = self.base.find_column(TIME_COLUMN) else {
            // Sources are responsible for the time-first invariant; a batch
            // without a time column cannot be restricted.
            tracing::warn!("batch has no [{}] column, passing through unrestricted", TIME_COLUMN);
            return self.base;
        };

        let rows: Vec<usize> = (0..self.base.num_rows())
            .filter(|&row| {
                time.value(row)
                    .as_long()
                    .map_or(false, |t| range.contains(t))
            })
            .collect();
        tracing::trace!(kept = rows.len(), range = %range, "limited time range");

        Arc::new(LimitedRowsAndColumns {
            base: self.base,
            rows: Arc::new(rows),
        })
    }
}

/// Derived view keeping a subset of the base rows.
struct LimitedRowsAndColumns {
    base: Arc<dyn RowsAndColumns>,
    rows: Arc<Vec<usize>>,
}

impl RowsAndColumns for LimitedRowsAndColumns {
    fn column_names(&self) -> Vec<String> {
        self.base.column_names()
    }

    fn num_rows(&self) -> usize {
        self.rows.len()
    }

    fn find_column(&self, name: &str) -> Option<Arc<dyn Column>> {
        let inner = self.base.find_column(name)?;
        Some(Arc::new(MappedColumn::new(inner, self.rows.clone())))
    }
}
