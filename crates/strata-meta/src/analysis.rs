//! Analysis value objects: built once, never mutated.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strata_core::interval::Interval;
use strata_core::types::{Scalar, TypeSignature};
use strata_segment::AggregatorSpec;

/// What a metadata query asked the analyzer to compute. Everything not
/// requested is skipped or zeroed, keeping analysis cost opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    Cardinality,
    Size,
    Interval,
    Minmax,
    Aggregators,
    Rollup,
}

/// Set of requested analysis types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisTypes(BTreeSet<AnalysisType>);

impl AnalysisTypes {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self::of(&[
            AnalysisType::Cardinality,
            AnalysisType::Size,
            AnalysisType::Interval,
            AnalysisType::Minmax,
            AnalysisType::Aggregators,
            AnalysisType::Rollup,
        ])
    }

    pub fn of(types: &[AnalysisType]) -> Self {
        Self(types.iter().copied().collect())
    }

    pub fn contains(&self, t: AnalysisType) -> bool {
        self.0.contains(&t)
    }
}

impl FromIterator<AnalysisType> for AnalysisTypes {
    fn from_iter<I: IntoIterator<Item = AnalysisType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Per-column analysis result. Error entries carry no meaningful size or
/// cardinality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAnalysis {
    pub type_signature: TypeSignature,
    /// Display form of the type, e.g. `STRING` or `COMPLEX<hyperUnique>`.
    pub type_name: String,
    pub has_multiple_values: bool,
    /// Absent for non-dictionary columns; `Some(0)` for dictionary columns
    /// when cardinality analysis was not requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<u64>,
    /// 0 when size analysis was excluded or is inapplicable.
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ColumnAnalysis {
    pub fn new(
        type_signature: TypeSignature,
        has_multiple_values: bool,
        cardinality: Option<u64>,
        size: u64,
        min_value: Option<Scalar>,
        max_value: Option<Scalar>,
    ) -> Self {
        let type_name = type_signature.to_string();
        Self {
            type_signature,
            type_name,
            has_multiple_values,
            cardinality,
            size,
            min_value,
            max_value,
            error_message: None,
        }
    }

    /// Column-scoped failure. Keeps the best-effort type signature so the
    /// caller still learns what the column claimed to be.
    pub fn error(type_signature: TypeSignature, message: impl Into<String>) -> Self {
        let type_name = type_signature.to_string();
        Self {
            type_signature,
            type_name,
            has_multiple_values: false,
            cardinality: None,
            size: 0,
            min_value: None,
            max_value: None,
            error_message: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error_message.is_some()
    }
}

/// Per-segment result. Sections beyond the column map are populated only
/// when their analysis type was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentAnalysis {
    pub id: String,
    /// Schema order: time first, then dimensions/metrics in source order.
    pub columns: Vec<(String, ColumnAnalysis)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervals: Option<Vec<Interval>>,
    pub num_rows: usize,
    /// Sum of per-column sizes; 0 when size analysis was not requested.
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregators: Option<Vec<AggregatorSpec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollup: Option<bool>,
}

impl SegmentAnalysis {
    pub fn column(&self, name: &str) -> Option<&ColumnAnalysis> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, analysis)| analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_entries_carry_no_size_or_cardinality() {
        let analysis = ColumnAnalysis::error(
            TypeSignature::complex("gone"),
            "error:unknown_complex_gone",
        );
        assert!(analysis.is_error());
        assert_eq!(analysis.size, 0);
        assert_eq!(analysis.cardinality, None);
        assert_eq!(analysis.type_name, "COMPLEX<gone>");
    }

    #[test]
    fn absent_sections_are_skipped_in_json() {
        let analysis = ColumnAnalysis::new(TypeSignature::DOUBLE, false, None, 0, None, None);
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["type_name"], "DOUBLE");
        assert!(json.get("cardinality").is_none());
        assert!(json.get("error_message").is_none());
    }

    #[test]
    fn analysis_types_all_contains_everything() {
        let all = AnalysisTypes::all();
        assert!(all.contains(AnalysisType::Cardinality));
        assert!(all.contains(AnalysisType::Rollup));
        assert!(!AnalysisTypes::none().contains(AnalysisType::Size));
    }
}
