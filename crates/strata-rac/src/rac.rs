//! The RowsAndColumns trait and typed capability dispatch.

use std::any::{Any, TypeId};
use std::sync::Arc;

use crate::column::Column;

/// A named set of columns sharing one row count.
///
/// Column iteration order equals source schema order with the time column
/// always first. Implementations wrapping closeable resources must track
/// every column or view handed out and release each exactly once on close.
pub trait RowsAndColumns: Send + Sync {
    /// Schema-ordered column names, no duplicates.
    fn column_names(&self) -> Vec<String>;

    /// Stable per instance; adapters compute lazily, at most once.
    fn num_rows(&self) -> usize;

    /// Absent for unknown names, never an error. The returned column is
    /// valid until this owner closes.
    fn find_column(&self, name: &str) -> Option<Arc<dyn Column>>;

    /// Type-keyed capability dispatch. Total: unknown tags resolve to
    /// absent, never an error. Callers go through the typed `capability`
    /// wrapper on `dyn RowsAndColumns`.
    fn capability_raw(&self, tag: TypeId) -> Option<Box<dyn Any>> {
        let _ = tag;
        None
    }
}

impl dyn RowsAndColumns {
    /// Request an alternate view of this data by type, e.g. a legacy
    /// row-oriented adapter or the raw storage handle.
    pub fn capability<T: Any>(&self) -> Option<T> {
        self.capability_raw(TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl RowsAndColumns for Empty {
        fn column_names(&self) -> Vec<String> {
            Vec::new()
        }

        fn num_rows(&self) -> usize {
            0
        }

        fn find_column(&self, _name: &str) -> Option<Arc<dyn Column>> {
            None
        }
    }

    #[test]
    fn default_capability_is_absent() {
        let rac: Arc<dyn RowsAndColumns> = Arc::new(Empty);
        assert!(rac.capability::<String>().is_none());
    }
}
