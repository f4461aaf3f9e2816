//! Physical column encodings and open-tracked column handles.
//!
//! A `ColumnHolder` pairs declared capabilities with the physical encoding
//! and hands out `ColumnHandle`s. Handles are bookkeeping for deterministic
//! teardown: every open is matched by exactly one release, normally driven
//! by the owner's `Closer`.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use strata_core::types::{Scalar, ValueType};

use crate::capabilities::ColumnCapabilities;

/// The heterogeneous physical representations a segment may contain.
#[derive(Debug)]
pub enum PhysicalColumn {
    Long(Vec<Option<i64>>),
    Float(Vec<Option<f32>>),
    Double(Vec<Option<f64>>),
    StringDictionary(DictionaryColumn),
    Complex(ComplexColumn),
}

impl PhysicalColumn {
    pub fn value_type(&self) -> ValueType {
        match self {
            PhysicalColumn::Long(_) => ValueType::Long,
            PhysicalColumn::Float(_) => ValueType::Float,
            PhysicalColumn::Double(_) => ValueType::Double,
            PhysicalColumn::StringDictionary(_) => ValueType::String,
            PhysicalColumn::Complex(_) => ValueType::Complex,
        }
    }

    pub fn num_rows(&self) -> usize {
        match self {
            PhysicalColumn::Long(v) => v.len(),
            PhysicalColumn::Float(v) => v.len(),
            PhysicalColumn::Double(v) => v.len(),
            PhysicalColumn::StringDictionary(c) => c.num_rows(),
            PhysicalColumn::Complex(c) => c.num_rows(),
        }
    }

    /// Scalar view of one row. Multi-valued string rows surface their first
    /// value; full access goes through [`DictionaryColumn::row_ids`].
    pub fn value(&self, row: usize) -> Scalar {
        match self {
            PhysicalColumn::Long(v) => v[row].map(Scalar::Long).unwrap_or(Scalar::Null),
            PhysicalColumn::Float(v) => v[row].map(Scalar::Float).unwrap_or(Scalar::Null),
            PhysicalColumn::Double(v) => v[row].map(Scalar::Double).unwrap_or(Scalar::Null),
            PhysicalColumn::StringDictionary(c) => c.value(row),
            PhysicalColumn::Complex(c) => Scalar::Complex(c.raw(row).to_vec()),
        }
    }
}

/// Dictionary-encoded string column: distinct values stored once (sorted,
/// null entry first when present), referenced by id per row.
#[derive(Debug)]
pub struct DictionaryColumn {
    dictionary: Vec<Option<String>>,
    /// Row occurrences per dictionary id; same length as `dictionary`.
    counts: Vec<u64>,
    rows: Vec<Vec<u32>>,
    has_multiple_values: bool,
}

impl DictionaryColumn {
    /// Builds the dictionary from per-row value lists. Values are
    /// deduplicated and sorted with null first.
    pub fn from_rows(rows: Vec<Vec<Option<String>>>, has_multiple_values: bool) -> Self {
        let mut dictionary: Vec<Option<String>> = rows.iter().flatten().cloned().collect();
        dictionary.sort();
        dictionary.dedup();

        let id_of = |value: &Option<String>| -> u32 {
            dictionary
                .binary_search(value)
                .expect("value present by construction") as u32
        };

        let mut counts = vec![0u64; dictionary.len()];
        let encoded: Vec<Vec<u32>> = rows
            .into_iter()
            .map(|row| {
                row.iter()
                    .map(|v| {
                        let id = id_of(v);
                        counts[id as usize] += 1;
                        id
                    })
                    .collect()
            })
            .collect();

        Self {
            dictionary,
            counts,
            rows: encoded,
            has_multiple_values,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of distinct dictionary entries, null included when present.
    pub fn cardinality(&self) -> usize {
        self.dictionary.len()
    }

    pub fn has_multiple_values(&self) -> bool {
        self.has_multiple_values
    }

    pub fn lookup(&self, id: u32) -> Option<&str> {
        self.dictionary[id as usize].as_deref()
    }

    pub fn row_ids(&self, row: usize) -> &[u32] {
        &self.rows[row]
    }

    pub fn value(&self, row: usize) -> Scalar {
        match self.rows[row].first() {
            Some(&id) => self
                .lookup(id)
                .map(|s| Scalar::Str(s.to_owned()))
                .unwrap_or(Scalar::Null),
            None => Scalar::Null,
        }
    }

    /// Smallest non-null dictionary entry, if any.
    pub fn min_value(&self) -> Option<&str> {
        self.dictionary.iter().flatten().next().map(String::as_str)
    }

    /// Largest dictionary entry.
    pub fn max_value(&self) -> Option<&str> {
        self.dictionary.last().and_then(|v| v.as_deref())
    }

    /// Byte size of the stored values weighted by occurrences. Cost is
    /// proportional to the dictionary, not the row count.
    pub fn value_size_bytes(&self) -> u64 {
        self.dictionary
            .iter()
            .zip(&self.counts)
            .map(|(value, count)| value.as_ref().map_or(0, |s| s.len() as u64) * count)
            .sum()
    }
}

/// Opaque codec-defined column: one raw byte blob per row, tagged with the
/// logical type name the codec registry keys on.
#[derive(Debug)]
pub struct ComplexColumn {
    type_name: String,
    values: Vec<Vec<u8>>,
}

impl ComplexColumn {
    pub fn new(type_name: impl Into<String>, values: Vec<Vec<u8>>) -> Self {
        Self {
            type_name: type_name.into(),
            values,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn num_rows(&self) -> usize {
        self.values.len()
    }

    pub fn raw(&self, row: usize) -> &[u8] {
        &self.values[row]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.values.iter().map(Vec::as_slice)
    }
}

/// Declared capabilities plus the physical column, with open accounting.
pub struct ColumnHolder {
    capabilities: ColumnCapabilities,
    column: Arc<PhysicalColumn>,
    open: Arc<AtomicUsize>,
}

impl ColumnHolder {
    pub fn new(capabilities: ColumnCapabilities, column: PhysicalColumn) -> Self {
        Self {
            capabilities,
            column: Arc::new(column),
            open: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn capabilities(&self) -> &ColumnCapabilities {
        &self.capabilities
    }

    /// Open a handle. The matching release must happen exactly once, either
    /// through a `Closer` registration or when the last handle clone drops.
    pub fn open(&self) -> ColumnHandle {
        self.open.fetch_add(1, Ordering::SeqCst);
        ColumnHandle {
            column: self.column.clone(),
            open: self.open.clone(),
            released: AtomicBool::new(false),
        }
    }

    /// Handles currently open against this holder.
    pub fn open_count(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }
}

/// Open handle over a physical column. Release is idempotent per handle.
pub struct ColumnHandle {
    column: Arc<PhysicalColumn>,
    open: Arc<AtomicUsize>,
    released: AtomicBool,
}

impl ColumnHandle {
    pub fn column(&self) -> &PhysicalColumn {
        &self.column
    }

    pub fn release(&self) {
        if !self.released.swap(true, Ordering::SeqCst) {
            self.open.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl Drop for ColumnHandle {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(values: Vec<Option<&str>>) -> DictionaryColumn {
        DictionaryColumn::from_rows(
            values
                .into_iter()
                .map(|v| vec![v.map(str::to_owned)])
                .collect(),
            false,
        )
    }

    #[test]
    fn dictionary_dedupes_and_sorts() {
        let col = dict(vec![Some("b"), Some("a"), Some("b"), None]);
        assert_eq!(col.cardinality(), 3); // null, a, b
        assert_eq!(col.min_value(), Some("a"));
        assert_eq!(col.max_value(), Some("b"));
        assert_eq!(col.value(0), Scalar::Str("b".into()));
        assert_eq!(col.value(3), Scalar::Null);
    }

    #[test]
    fn dictionary_size_weighs_occurrences() {
        let col = dict(vec![Some("xx"), Some("xx"), Some("y")]);
        assert_eq!(col.value_size_bytes(), 2 * 2 + 1);
    }

    #[test]
    fn handle_release_is_exactly_once() {
        let holder = ColumnHolder::new(ColumnCapabilities::long(), PhysicalColumn::Long(vec![]));
        let handle = holder.open();
        assert_eq!(holder.open_count(), 1);
        handle.release();
        handle.release();
        assert_eq!(holder.open_count(), 0);
        drop(handle); // no double decrement
        assert_eq!(holder.open_count(), 0);
    }
}
