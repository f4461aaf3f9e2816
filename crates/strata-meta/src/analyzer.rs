//! The per-column metadata analyzer.

use std::sync::Arc;

use strata_core::closer::Closer;
use strata_core::error::Result;
use strata_core::types::{Scalar, TypeSignature, ValueType};
use strata_core::TIME_COLUMN;
use strata_segment::{
    CodecRegistry, ColumnCapabilities, PhysicalColumn, QueryableIndex, Segment,
};

use crate::analysis::{AnalysisType, AnalysisTypes, ColumnAnalysis, SegmentAnalysis};

const LONG_BYTES: u64 = 8;
const FLOAT_BYTES: u64 = 4;
const DOUBLE_BYTES: u64 = 8;

/// Produces per-column metadata reports for a segment.
///
/// Stateless across calls; each `analyze` owns a scoped collector, so every
/// storage handle opened during the walk is released before returning, on
/// error paths included. Expected per-column conditions (missing codec,
/// physical/declared type mismatch) become error entries rather than
/// propagated faults.
pub struct SegmentAnalyzer {
    analysis_types: AnalysisTypes,
    codecs: Arc<CodecRegistry>,
}

impl SegmentAnalyzer {
    pub fn new(analysis_types: AnalysisTypes, codecs: Arc<CodecRegistry>) -> Self {
        Self {
            analysis_types,
            codecs,
        }
    }

    /// Ordered per-column analysis, native schema order, time column first.
    pub fn analyze(&self, segment: &dyn Segment) -> Result<Vec<(String, ColumnAnalysis)>> {
        let closer = Closer::new();
        let result = self.analyze_index(segment.index(), &closer);
        closer.close();
        result
    }

    /// Full per-segment report; sections beyond the column map follow the
    /// requested analysis types.
    pub fn report(&self, segment: &dyn Segment) -> Result<SegmentAnalysis> {
        let columns = self.analyze(segment)?;
        let index = segment.index();
        let size = columns.iter().map(|(_, c)| c.size).sum();

        let intervals = self
            .requested(AnalysisType::Interval)
            .then(|| vec![segment.interval()]);
        let aggregators = self.requested(AnalysisType::Aggregators).then(|| {
            index
                .metadata()
                .map(|m| m.aggregators.clone())
                .unwrap_or_default()
        });
        let rollup = if self.requested(AnalysisType::Rollup) {
            index.metadata().and_then(|m| m.rollup)
        } else {
            None
        };

        Ok(SegmentAnalysis {
            id: segment.id().to_string(),
            columns,
            intervals,
            num_rows: index.num_rows(),
            size,
            aggregators,
            rollup,
        })
    }

    fn analyze_index(
        &self,
        index: &dyn QueryableIndex,
        closer: &Closer,
    ) -> Result<Vec<(String, ColumnAnalysis)>> {
        let num_rows = index.num_rows();
        let names = index.column_names();
        let mut out = Vec::with_capacity(names.len());

        for name in names {
            let analysis = if name == TIME_COLUMN {
                self.analyze_numeric(ValueType::Long, LONG_BYTES, num_rows, false)
            } else {
                match index.column_capabilities(&name) {
                    Some(caps) => self.analyze_column(index, &name, &caps, num_rows, closer),
                    None => ColumnAnalysis::error(
                        TypeSignature::STRING,
                        format!("error: no capabilities for column [{}]", name),
                    ),
                }
            };
            if analysis.is_error() {
                tracing::warn!(column = %name, message = ?analysis.error_message, "column analysis error");
            } else {
                tracing::debug!(column = %name, type_name = %analysis.type_name, "analyzed column");
            }
            out.push((name, analysis));
        }
        Ok(out)
    }

    fn analyze_column(
        &self,
        index: &dyn QueryableIndex,
        name: &str,
        caps: &ColumnCapabilities,
        num_rows: usize,
        closer: &Closer,
    ) -> ColumnAnalysis {
        match caps.value_type {
            ValueType::Long => self.analyze_numeric(ValueType::Long, LONG_BYTES, num_rows, false),
            ValueType::Float => {
                self.analyze_numeric(ValueType::Float, FLOAT_BYTES, num_rows, false)
            }
            ValueType::Double => {
                self.analyze_numeric(ValueType::Double, DOUBLE_BYTES, num_rows, false)
            }
            ValueType::String => self.analyze_string(index, name, caps, closer),
            ValueType::Complex => self.analyze_complex(index, name, caps, closer),
        }
    }

    fn analyze_numeric(
        &self,
        value_type: ValueType,
        bytes_per_row: u64,
        num_rows: usize,
        has_multiple_values: bool,
    ) -> ColumnAnalysis {
        let size = if self.requested(AnalysisType::Size) {
            num_rows as u64 * bytes_per_row
        } else {
            0
        };
        // Cardinality is a dictionary concept; numerics always report absent.
        ColumnAnalysis::new(
            TypeSignature::simple(value_type),
            has_multiple_values,
            None,
            size,
            None,
            None,
        )
    }

    fn analyze_string(
        &self,
        index: &dyn QueryableIndex,
        name: &str,
        caps: &ColumnCapabilities,
        closer: &Closer,
    ) -> ColumnAnalysis {
        let Some(holder) = index.column_holder(name) else {
            return ColumnAnalysis::error(
                caps.type_signature(),
                format!("error: no holder for column [{}]", name),
            );
        };
        let handle = Arc::new(holder.open());
        let registered = handle.clone();
        closer.register_fn(move || registered.release());

        let PhysicalColumn::StringDictionary(dict) = handle.column() else {
            return ColumnAnalysis::error(
                caps.type_signature(),
                format!("error: [{}] is not a [DictionaryColumn]", name),
            );
        };

        // Dictionary-proportional work only: cardinality and the weighted
        // value sizes never touch individual rows.
        let cardinality = if self.requested(AnalysisType::Cardinality) {
            Some(dict.cardinality() as u64)
        } else {
            Some(0)
        };
        let size = if self.requested(AnalysisType::Size) {
            dict.value_size_bytes()
        } else {
            0
        };
        let (min_value, max_value) = if self.requested(AnalysisType::Minmax) {
            (
                dict.min_value().map(|s| Scalar::Str(s.to_owned())),
                dict.max_value().map(|s| Scalar::Str(s.to_owned())),
            )
        } else {
            (None, None)
        };

        ColumnAnalysis::new(
            TypeSignature::STRING,
            caps.has_multiple_values,
            cardinality,
            size,
            min_value,
            max_value,
        )
    }

    fn analyze_complex(
        &self,
        index: &dyn QueryableIndex,
        name: &str,
        caps: &ColumnCapabilities,
        closer: &Closer,
    ) -> ColumnAnalysis {
        let Some(holder) = index.column_holder(name) else {
            return ColumnAnalysis::error(
                caps.type_signature(),
                format!("error: no holder for column [{}]", name),
            );
        };
        let handle = Arc::new(holder.open());
        let registered = handle.clone();
        closer.register_fn(move || registered.release());

        let PhysicalColumn::Complex(column) = handle.column() else {
            // The declared capability requires complex access; the storage
            // handle cannot provide it. Column-scoped, not fatal.
            return ColumnAnalysis::error(
                caps.type_signature(),
                format!("error: [{}] is not a [ComplexColumn]", name),
            );
        };

        let type_name = caps
            .complex_type_name
            .clone()
            .unwrap_or_else(|| column.type_name().to_owned());

        let Some(codec) = self.codecs.resolve(&type_name) else {
            // Segment written with a since-removed codec. Keep the raw type
            // name, continue with the remaining columns.
            return ColumnAnalysis::error(
                TypeSignature::complex(type_name.clone()),
                format!("error:unknown_complex_{}", type_name),
            );
        };

        let size = if self.requested(AnalysisType::Size) {
            column.rows().map(|raw| codec.decoded_size(raw)).sum()
        } else {
            0
        };

        ColumnAnalysis::new(
            TypeSignature::complex(type_name),
            false,
            None,
            size,
            None,
            None,
        )
    }

    fn requested(&self, t: AnalysisType) -> bool {
        self.analysis_types.contains(t)
    }
}
