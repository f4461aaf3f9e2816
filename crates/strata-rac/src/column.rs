//! Column views over physical and in-memory data.

use std::sync::Arc;

use strata_core::types::{Scalar, ValueType};
use strata_segment::ColumnHandle;

/// One typed columnar data source. Immutable; owned by its producing
/// RowsAndColumns and valid until that owner closes.
pub trait Column: Send + Sync {
    fn value_type(&self) -> ValueType;

    fn num_rows(&self) -> usize;

    fn value(&self, row: usize) -> Scalar;
}

/// Plain in-memory column.
pub struct VecColumn {
    value_type: ValueType,
    values: Vec<Scalar>,
}

impl VecColumn {
    pub fn new(value_type: ValueType, values: Vec<Scalar>) -> Self {
        Self { value_type, values }
    }

    pub fn longs(values: Vec<i64>) -> Self {
        Self::new(ValueType::Long, values.into_iter().map(Scalar::Long).collect())
    }

    pub fn doubles(values: Vec<f64>) -> Self {
        Self::new(
            ValueType::Double,
            values.into_iter().map(Scalar::Double).collect(),
        )
    }

    pub fn strings(values: Vec<Option<&str>>) -> Self {
        Self::new(
            ValueType::String,
            values
                .into_iter()
                .map(|v| v.map(|s| Scalar::Str(s.to_owned())).unwrap_or(Scalar::Null))
                .collect(),
        )
    }
}

impl Column for VecColumn {
    fn value_type(&self) -> ValueType {
        self.value_type
    }

    fn num_rows(&self) -> usize {
        self.values.len()
    }

    fn value(&self, row: usize) -> Scalar {
        self.values[row].clone()
    }
}

/// Column backed by an open storage handle. The handle's release is owned by
/// the producing RowsAndColumns' closer; this view only reads.
pub struct HolderColumn {
    handle: Arc<ColumnHandle>,
}

impl HolderColumn {
    pub fn new(handle: Arc<ColumnHandle>) -> Self {
        Self { handle }
    }
}

impl Column for HolderColumn {
    fn value_type(&self) -> ValueType {
        self.handle.column().value_type()
    }

    fn num_rows(&self) -> usize {
        self.handle.column().num_rows()
    }

    fn value(&self, row: usize) -> Scalar {
        self.handle.column().value(row)
    }
}

/// Row-index view over another column. Derived logical views reference, and
/// never mutate, upstream columns.
pub struct MappedColumn {
    inner: Arc<dyn Column>,
    rows: Arc<Vec<usize>>,
}

impl MappedColumn {
    pub fn new(inner: Arc<dyn Column>, rows: Arc<Vec<usize>>) -> Self {
        Self { inner, rows }
    }
}

impl Column for MappedColumn {
    fn value_type(&self) -> ValueType {
        self.inner.value_type()
    }

    fn num_rows(&self) -> usize {
        self.rows.len()
    }

    fn value(&self, row: usize) -> Scalar {
        self.inner.value(self.rows[row])
    }
}
