#![forbid(unsafe_code)]
//! strata-meta: per-column segment metadata analysis.
//!
//! `SegmentAnalyzer` walks a segment's columns in native schema order and
//! reports type, size, and cardinality per column. It must work over
//! heterogeneous physical encodings, including ones this process no longer
//! has a codec for, without letting one broken column fail the whole scan:
//! expected conditions become per-column error entries, and only genuine
//! resource faults propagate.

pub mod analysis;
pub mod analyzer;

pub use analysis::{AnalysisType, AnalysisTypes, ColumnAnalysis, SegmentAnalysis};
pub use analyzer::SegmentAnalyzer;
