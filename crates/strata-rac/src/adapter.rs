//! Legacy row-oriented adapter over a queryable index.
//!
//! Older subsystems that predate the columnar abstraction read row by row;
//! they obtain this adapter through capability dispatch instead of the
//! RowsAndColumns surface growing row-oriented methods.

use std::sync::Arc;

use strata_core::interval::Interval;
use strata_core::types::Scalar;
use strata_segment::QueryableIndex;

#[derive(Clone)]
pub struct StorageAdapter {
    index: Arc<dyn QueryableIndex>,
}

impl StorageAdapter {
    pub fn new(index: Arc<dyn QueryableIndex>) -> Self {
        Self { index }
    }

    pub fn column_names(&self) -> Vec<String> {
        self.index.column_names()
    }

    pub fn num_rows(&self) -> usize {
        self.index.num_rows()
    }

    pub fn interval(&self) -> Interval {
        self.index.interval()
    }

    /// Cell read; absent for unknown columns. Opens and releases a transient
    /// handle per call, so this stays correct but is not a hot path.
    pub fn value_at(&self, row: usize, column: &str) -> Option<Scalar> {
        let holder = self.index.column_holder(column)?;
        let handle = holder.open();
        let value = handle.column().value(row);
        handle.release();
        Some(value)
    }
}
