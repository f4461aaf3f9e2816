//! The segment storage interface and an in-memory implementation.
//!
//! `QueryableIndex` is what the rest of the engine consumes; persisted or
//! mapped formats are external collaborators that implement it. The
//! `IndexBuilder` here is columnar: callers append whole columns, the
//! builder validates the shared row count and derives capabilities.

use std::collections::HashMap;

use strata_core::interval::Interval;
use strata_core::TIME_COLUMN;

use crate::capabilities::ColumnCapabilities;
use crate::column::{ColumnHolder, ComplexColumn, DictionaryColumn, PhysicalColumn};
use crate::segment::SegmentMetadata;
use crate::SegmentError;

/// One persisted or in-memory columnar index.
///
/// Column iteration order equals source schema order with the time column
/// always first. `column_capabilities` and `column_holder` may disagree on a
/// malformed segment; consumers must not assume they match.
pub trait QueryableIndex: Send + Sync {
    fn column_names(&self) -> Vec<String>;

    fn num_rows(&self) -> usize;

    fn column_holder(&self, name: &str) -> Option<&ColumnHolder>;

    fn column_capabilities(&self, name: &str) -> Option<ColumnCapabilities>;

    fn interval(&self) -> Interval;

    fn metadata(&self) -> Option<&SegmentMetadata> {
        None
    }
}

pub struct InMemoryIndex {
    names: Vec<String>,
    holders: HashMap<String, ColumnHolder>,
    num_rows: usize,
    interval: Interval,
    metadata: Option<SegmentMetadata>,
}

impl std::fmt::Debug for InMemoryIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryIndex")
            .field("names", &self.names)
            .field("num_rows", &self.num_rows)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl QueryableIndex for InMemoryIndex {
    fn column_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn column_holder(&self, name: &str) -> Option<&ColumnHolder> {
        self.holders.get(name)
    }

    fn column_capabilities(&self, name: &str) -> Option<ColumnCapabilities> {
        self.holders.get(name).map(|h| h.capabilities().clone())
    }

    fn interval(&self) -> Interval {
        self.interval
    }

    fn metadata(&self) -> Option<&SegmentMetadata> {
        self.metadata.as_ref()
    }
}

enum ColumnInput {
    Long(Vec<Option<i64>>),
    Float(Vec<Option<f32>>),
    Double(Vec<Option<f64>>),
    String(Vec<Option<String>>),
    MultiString(Vec<Vec<Option<String>>>),
    Complex {
        type_name: String,
        values: Vec<Vec<u8>>,
    },
    /// Auto-discovered schemaless column holding only explicit nulls. No
    /// declared type; the builder assigns the default inferred type, STRING.
    NullDiscovered,
}

impl ColumnInput {
    fn len(&self, segment_rows: usize) -> usize {
        match self {
            ColumnInput::Long(v) => v.len(),
            ColumnInput::Float(v) => v.len(),
            ColumnInput::Double(v) => v.len(),
            ColumnInput::String(v) => v.len(),
            ColumnInput::MultiString(v) => v.len(),
            ColumnInput::Complex { values, .. } => values.len(),
            ColumnInput::NullDiscovered => segment_rows,
        }
    }
}

/// Columnar builder for [`InMemoryIndex`].
pub struct IndexBuilder {
    time: Vec<i64>,
    columns: Vec<(String, ColumnInput)>,
    interval: Option<Interval>,
    metadata: Option<SegmentMetadata>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self {
            time: Vec::new(),
            columns: Vec::new(),
            interval: None,
            metadata: None,
        }
    }

    /// Epoch-millis timestamps, one per row. Required.
    pub fn time(mut self, values: Vec<i64>) -> Self {
        self.time = values;
        self
    }

    pub fn interval(mut self, interval: Interval) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn metadata(mut self, metadata: SegmentMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn long_column(mut self, name: &str, values: Vec<Option<i64>>) -> Self {
        self.columns.push((name.to_owned(), ColumnInput::Long(values)));
        self
    }

    pub fn float_column(mut self, name: &str, values: Vec<Option<f32>>) -> Self {
        self.columns.push((name.to_owned(), ColumnInput::Float(values)));
        self
    }

    pub fn double_column(mut self, name: &str, values: Vec<Option<f64>>) -> Self {
        self.columns
            .push((name.to_owned(), ColumnInput::Double(values)));
        self
    }

    pub fn string_column(mut self, name: &str, values: Vec<Option<&str>>) -> Self {
        let owned = values.into_iter().map(|v| v.map(str::to_owned)).collect();
        self.columns.push((name.to_owned(), ColumnInput::String(owned)));
        self
    }

    pub fn multi_string_column(mut self, name: &str, values: Vec<Vec<&str>>) -> Self {
        let owned = values
            .into_iter()
            .map(|row| row.into_iter().map(|v| Some(v.to_owned())).collect())
            .collect();
        self.columns
            .push((name.to_owned(), ColumnInput::MultiString(owned)));
        self
    }

    pub fn complex_column(mut self, name: &str, type_name: &str, values: Vec<Vec<u8>>) -> Self {
        self.columns.push((
            name.to_owned(),
            ColumnInput::Complex {
                type_name: type_name.to_owned(),
                values,
            },
        ));
        self
    }

    /// Schemaless auto-discovered column with an explicit null in every row.
    pub fn null_discovered_column(mut self, name: &str) -> Self {
        self.columns
            .push((name.to_owned(), ColumnInput::NullDiscovered));
        self
    }

    pub fn build(self) -> Result<InMemoryIndex, SegmentError> {
        let num_rows = self.time.len();
        if num_rows == 0 {
            return Err(SegmentError::Schema("segment has no rows".into()));
        }

        let mut names = vec![TIME_COLUMN.to_owned()];
        let mut holders = HashMap::new();
        holders.insert(
            TIME_COLUMN.to_owned(),
            ColumnHolder::new(
                ColumnCapabilities::long(),
                PhysicalColumn::Long(self.time.iter().copied().map(Some).collect()),
            ),
        );

        for (name, input) in self.columns {
            if name == TIME_COLUMN {
                return Err(SegmentError::Schema(format!(
                    "[{}] is reserved for the time column",
                    TIME_COLUMN
                )));
            }
            if holders.contains_key(&name) {
                return Err(SegmentError::Schema(format!("duplicate column [{}]", name)));
            }
            let len = input.len(num_rows);
            if len != num_rows {
                return Err(SegmentError::RowCountMismatch {
                    column: name,
                    actual: len,
                    expected: num_rows,
                });
            }

            let holder = match input {
                ColumnInput::Long(v) => {
                    ColumnHolder::new(ColumnCapabilities::long(), PhysicalColumn::Long(v))
                }
                ColumnInput::Float(v) => {
                    ColumnHolder::new(ColumnCapabilities::float(), PhysicalColumn::Float(v))
                }
                ColumnInput::Double(v) => {
                    ColumnHolder::new(ColumnCapabilities::double(), PhysicalColumn::Double(v))
                }
                ColumnInput::String(v) => {
                    let rows = v.into_iter().map(|value| vec![value]).collect();
                    ColumnHolder::new(
                        ColumnCapabilities::string(false),
                        PhysicalColumn::StringDictionary(DictionaryColumn::from_rows(rows, false)),
                    )
                }
                ColumnInput::MultiString(rows) => ColumnHolder::new(
                    ColumnCapabilities::string(true),
                    PhysicalColumn::StringDictionary(DictionaryColumn::from_rows(rows, true)),
                ),
                ColumnInput::Complex { type_name, values } => ColumnHolder::new(
                    ColumnCapabilities::complex(Some(&type_name)),
                    PhysicalColumn::Complex(ComplexColumn::new(type_name, values)),
                ),
                ColumnInput::NullDiscovered => {
                    let rows = vec![vec![None]; num_rows];
                    ColumnHolder::new(
                        ColumnCapabilities::string(false),
                        PhysicalColumn::StringDictionary(DictionaryColumn::from_rows(rows, false)),
                    )
                }
            };
            names.push(name.clone());
            holders.insert(name, holder);
        }

        let interval = self.interval.unwrap_or_else(|| {
            let min = self.time.iter().copied().min().unwrap_or(0);
            let max = self.time.iter().copied().max().unwrap_or(0);
            Interval::new(min, max + 1)
        });

        Ok(InMemoryIndex {
            names,
            holders,
            num_rows,
            interval,
            metadata: self.metadata,
        })
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_order_is_time_first_then_insertion() {
        let index = IndexBuilder::new()
            .time(vec![1, 2])
            .string_column("quality", vec![Some("a"), Some("b")])
            .double_column("index", vec![Some(1.0), Some(2.0)])
            .build()
            .unwrap();
        assert_eq!(index.column_names(), vec![TIME_COLUMN, "quality", "index"]);
        assert_eq!(index.num_rows(), 2);
    }

    #[test]
    fn row_count_mismatch_is_rejected() {
        let err = IndexBuilder::new()
            .time(vec![1, 2, 3])
            .long_column("m", vec![Some(1)])
            .build()
            .unwrap_err();
        assert!(matches!(err, SegmentError::RowCountMismatch { .. }));
    }

    #[test]
    fn interval_derived_from_time_when_unset() {
        let index = IndexBuilder::new().time(vec![5, 9, 7]).build().unwrap();
        assert_eq!(index.interval(), Interval::new(5, 10));
    }
}
