//! Storage adapter: RowsAndColumns over one persisted or mapped index.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;

use strata_core::closer::Closer;
use strata_segment::QueryableIndex;

use crate::adapter::StorageAdapter;
use crate::column::{Column, HolderColumn};
use crate::rac::RowsAndColumns;

type CapabilityFn = fn(&QueryableIndexRowsAndColumns) -> Box<dyn Any>;

/// Static type-keyed dispatch table for the built-in capability views: the
/// legacy row-oriented adapter and the raw underlying index. Everything else
/// resolves to absent.
static CAPABILITIES: Lazy<HashMap<TypeId, CapabilityFn>> = Lazy::new(|| {
    let mut table: HashMap<TypeId, CapabilityFn> = HashMap::new();
    table.insert(TypeId::of::<StorageAdapter>(), |rac| {
        Box::new(StorageAdapter::new(rac.index.clone()))
    });
    table.insert(TypeId::of::<Arc<dyn QueryableIndex>>(), |rac| {
        Box::new(rac.index.clone())
    });
    table
});

/// Adapter from a `QueryableIndex` to RowsAndColumns.
///
/// Owns the lifetime of every column it hands out: each `find_column`
/// registers the opened handle with the instance collector, and `close`
/// releases all of them exactly once, whether or not callers dropped their
/// own references. The row count is computed lazily and cached.
pub struct QueryableIndexRowsAndColumns {
    index: Arc<dyn QueryableIndex>,
    closer: Closer,
    // -1 = not yet computed. Racing readers may both compute and store the
    // same value; the cell never goes back to unset.
    num_rows: AtomicI64,
}

impl QueryableIndexRowsAndColumns {
    pub fn new(index: Arc<dyn QueryableIndex>) -> Self {
        Self {
            index,
            closer: Closer::new(),
            num_rows: AtomicI64::new(-1),
        }
    }

    /// Release every column handed out so far. Idempotent; also runs if the
    /// instance is dropped without an explicit close.
    pub fn close(&self) {
        self.closer.close();
    }
}

impl RowsAndColumns for QueryableIndexRowsAndColumns {
    fn column_names(&self) -> Vec<String> {
        self.index.column_names()
    }

    fn num_rows(&self) -> usize {
        let cached = self.num_rows.load(Ordering::Acquire);
        if cached >= 0 {
            return cached as usize;
        }
        let computed = self.index.num_rows();
        self.num_rows.store(computed as i64, Ordering::Release);
        computed
    }

    fn find_column(&self, name: &str) -> Option<Arc<dyn Column>> {
        let holder = self.index.column_holder(name)?;
        let handle = Arc::new(holder.open());
        let registered = handle.clone();
        self.closer.register_fn(move || registered.release());
        Some(Arc::new(HolderColumn::new(handle)))
    }

    fn capability_raw(&self, tag: TypeId) -> Option<Box<dyn Any>> {
        CAPABILITIES.get(&tag).map(|make| make(self))
    }
}
