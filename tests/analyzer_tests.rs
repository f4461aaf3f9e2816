//! SegmentAnalyzer tests over in-memory and mock indexes.

use std::sync::Arc;

use strata_core::interval::Interval;
use strata_core::types::{Scalar, TypeSignature, ValueType};
use strata_core::TIME_COLUMN;
use strata_meta::{AnalysisType, AnalysisTypes, SegmentAnalyzer};
use strata_segment::codec::RawSizeCodec;
use strata_segment::{
    AggregatorSpec, CodecRegistry, ColumnCapabilities, ColumnHolder, DictionaryColumn,
    InMemoryIndex, IndexBuilder, IndexSegment, PhysicalColumn, QueryableIndex, SegmentId,
    SegmentMetadata,
};

fn test_index() -> InMemoryIndex {
    IndexBuilder::new()
        .time(vec![1000, 2000, 3000, 4000])
        .string_column(
            "quality",
            vec![Some("automotive"), Some("business"), Some("automotive"), None],
        )
        .string_column("market", vec![Some("spot"), Some("spot"), Some("total"), Some("spot")])
        .double_column("index", vec![Some(100.0), Some(101.5), Some(99.0), Some(102.0)])
        .float_column("delta", vec![Some(1.0), Some(-1.5), Some(0.5), Some(2.0)])
        .build()
        .unwrap()
}

fn segment(index: InMemoryIndex) -> IndexSegment {
    IndexSegment::new(SegmentId::dummy("test"), Arc::new(index))
}

fn analyzer(types: AnalysisTypes) -> SegmentAnalyzer {
    SegmentAnalyzer::new(types, Arc::new(CodecRegistry::new()))
}

#[test]
fn first_entry_is_time_column_typed_long() {
    for types in [AnalysisTypes::all(), AnalysisTypes::none()] {
        let columns = analyzer(types).analyze(&segment(test_index())).unwrap();
        let (name, analysis) = &columns[0];
        assert_eq!(name, TIME_COLUMN);
        assert_eq!(analysis.type_signature, TypeSignature::LONG);
        assert!(!analysis.is_error());
    }
}

#[test]
fn key_order_matches_schema_order() {
    let columns = analyzer(AnalysisTypes::none())
        .analyze(&segment(test_index()))
        .unwrap();
    let names: Vec<&str> = columns.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec![TIME_COLUMN, "quality", "market", "index", "delta"]
    );
}

#[test]
fn string_cardinality_follows_requested_types() {
    // Excluded: dictionary columns report exactly 0.
    let columns = analyzer(AnalysisTypes::none())
        .analyze(&segment(test_index()))
        .unwrap();
    for dim in ["quality", "market"] {
        let analysis = columns
            .iter()
            .find(|(n, _)| n == dim)
            .map(|(_, a)| a)
            .unwrap();
        assert_eq!(analysis.cardinality, Some(0), "{}", dim);
        assert_eq!(analysis.size, 0, "{}", dim);
    }

    // Included: > 0 for any column with at least one distinct non-null value.
    let columns = analyzer(AnalysisTypes::of(&[AnalysisType::Cardinality]))
        .analyze(&segment(test_index()))
        .unwrap();
    let quality = columns.iter().find(|(n, _)| n == "quality").unwrap();
    // automotive, business, null
    assert_eq!(quality.1.cardinality, Some(3));
    let market = columns.iter().find(|(n, _)| n == "market").unwrap();
    assert_eq!(market.1.cardinality, Some(2));
}

#[test]
fn numeric_columns_never_report_cardinality() {
    for types in [AnalysisTypes::all(), AnalysisTypes::none()] {
        let columns = analyzer(types).analyze(&segment(test_index())).unwrap();
        for metric in ["index", "delta"] {
            let analysis = columns
                .iter()
                .find(|(n, _)| n == metric)
                .map(|(_, a)| a)
                .unwrap();
            assert_eq!(analysis.cardinality, None, "{}", metric);
            assert!(!analysis.is_error());
        }
    }
    let columns = analyzer(AnalysisTypes::all())
        .analyze(&segment(test_index()))
        .unwrap();
    let index_col = columns.iter().find(|(n, _)| n == "index").unwrap();
    assert_eq!(index_col.1.type_signature, TypeSignature::DOUBLE);
    assert_eq!(index_col.1.size, 4 * 8);
    let delta = columns.iter().find(|(n, _)| n == "delta").unwrap();
    assert_eq!(delta.1.type_signature, TypeSignature::FLOAT);
    assert_eq!(delta.1.size, 4 * 4);
}

#[test]
fn string_size_and_minmax_when_requested() {
    let columns = analyzer(AnalysisTypes::of(&[AnalysisType::Size, AnalysisType::Minmax]))
        .analyze(&segment(test_index()))
        .unwrap();
    let quality = columns
        .iter()
        .find(|(n, _)| n == "quality")
        .map(|(_, a)| a)
        .unwrap();
    // 2x "automotive" + 1x "business"
    assert_eq!(quality.size, 2 * 10 + 8);
    assert_eq!(quality.min_value, Some(Scalar::Str("automotive".into())));
    assert_eq!(quality.max_value, Some(Scalar::Str("business".into())));
}

#[test]
fn unregistered_codec_is_a_column_level_error() {
    let index = IndexBuilder::new()
        .time(vec![1000, 2000])
        .string_column("quality", vec![Some("a"), Some("b")])
        .complex_column(
            "quality_uniques",
            "hyperUnique",
            vec![vec![1, 2, 3], vec![4, 5]],
        )
        .complex_column(
            "invalid_aggregator",
            "invalid_complex_column_type",
            vec![vec![0], vec![0]],
        )
        .build()
        .unwrap();

    let registry = Arc::new(CodecRegistry::new());
    registry.register(Arc::new(RawSizeCodec::new("hyperUnique")));
    let analyzer = SegmentAnalyzer::new(AnalysisTypes::of(&[AnalysisType::Size]), registry);

    let columns = analyzer.analyze(&segment(index)).unwrap();

    let invalid = columns
        .iter()
        .find(|(n, _)| n == "invalid_aggregator")
        .map(|(_, a)| a)
        .unwrap();
    assert!(invalid.is_error());
    assert_eq!(
        invalid.error_message.as_deref(),
        Some("error:unknown_complex_invalid_complex_column_type")
    );
    assert_eq!(
        invalid.type_signature,
        TypeSignature::complex("invalid_complex_column_type")
    );
    assert_eq!(invalid.size, 0);

    // Sibling columns are unaffected.
    for (name, analysis) in &columns {
        if name != "invalid_aggregator" {
            assert!(!analysis.is_error(), "{}", name);
        }
    }
    let uniques = columns
        .iter()
        .find(|(n, _)| n == "quality_uniques")
        .map(|(_, a)| a)
        .unwrap();
    assert_eq!(uniques.size, 5);
    assert_eq!(uniques.type_signature, TypeSignature::complex("hyperUnique"));
}

#[test]
fn all_null_auto_discovered_column_is_string_not_error() {
    let index = IndexBuilder::new()
        .time(vec![1234])
        .null_discovered_column("x")
        .build()
        .unwrap();
    let columns = analyzer(AnalysisTypes::none()).analyze(&segment(index)).unwrap();
    let x = columns.iter().find(|(n, _)| n == "x").map(|(_, a)| a).unwrap();
    assert_eq!(x.type_signature, TypeSignature::STRING);
    assert!(!x.is_error());
}

/// Index whose declared capabilities claim a complex column while the
/// physical column is dictionary-encoded.
struct ImproperComplexIndex {
    holder: ColumnHolder,
}

impl ImproperComplexIndex {
    fn new() -> Self {
        let dict = DictionaryColumn::from_rows(vec![vec![Some("a".to_owned())]], false);
        Self {
            holder: ColumnHolder::new(
                ColumnCapabilities::complex(None),
                PhysicalColumn::StringDictionary(dict),
            ),
        }
    }
}

impl QueryableIndex for ImproperComplexIndex {
    fn column_names(&self) -> Vec<String> {
        vec![TIME_COLUMN.to_owned(), "x".to_owned()]
    }

    fn num_rows(&self) -> usize {
        1
    }

    fn column_holder(&self, name: &str) -> Option<&ColumnHolder> {
        (name == "x").then_some(&self.holder)
    }

    fn column_capabilities(&self, name: &str) -> Option<ColumnCapabilities> {
        match name {
            TIME_COLUMN => Some(ColumnCapabilities::long()),
            "x" => Some(self.holder.capabilities().clone()),
            _ => None,
        }
    }

    fn interval(&self) -> Interval {
        Interval::ETERNITY
    }
}

#[test]
fn improper_complex_names_expected_interface_and_releases_handles() {
    let index = Arc::new(ImproperComplexIndex::new());
    let segment = IndexSegment::new(SegmentId::dummy("test"), index.clone());

    let columns = analyzer(AnalysisTypes::none()).analyze(&segment).unwrap();
    let x = columns.iter().find(|(n, _)| n == "x").map(|(_, a)| a).unwrap();
    assert!(x.is_error());
    assert!(x
        .error_message
        .as_deref()
        .unwrap()
        .contains("is not a [ComplexColumn]"));
    assert_eq!(x.type_signature, TypeSignature::unknown_complex());
    assert_eq!(x.type_signature.value_type, ValueType::Complex);

    // The handle opened during analysis was released on the error path.
    assert_eq!(index.holder.open_count(), 0);
}

#[test]
fn report_sections_follow_requested_types() {
    let metadata = SegmentMetadata {
        aggregators: vec![AggregatorSpec {
            name: "index".into(),
            type_name: "doubleSum".into(),
            field_name: "index".into(),
        }],
        rollup: Some(true),
        query_granularity: None,
    };
    let build = |meta: SegmentMetadata| {
        IndexBuilder::new()
            .time(vec![1000, 2000])
            .double_column("index", vec![Some(1.0), Some(2.0)])
            .metadata(meta)
            .build()
            .unwrap()
    };

    let all = analyzer(AnalysisTypes::all())
        .report(&segment(build(metadata.clone())))
        .unwrap();
    assert_eq!(all.num_rows, 2);
    assert_eq!(all.intervals, Some(vec![Interval::new(1000, 2001)]));
    assert_eq!(all.aggregators.as_ref().map(Vec::len), Some(1));
    assert_eq!(all.rollup, Some(true));
    assert!(all.size > 0);

    let none = analyzer(AnalysisTypes::none())
        .report(&segment(build(metadata)))
        .unwrap();
    assert_eq!(none.intervals, None);
    assert_eq!(none.aggregators, None);
    assert_eq!(none.rollup, None);
    assert_eq!(none.size, 0);
    assert_eq!(none.columns[0].0, TIME_COLUMN);

    // Sections that were not requested disappear from the wire form too.
    let json = serde_json::to_value(&none).unwrap();
    assert!(json.get("intervals").is_none());
    assert!(json.get("aggregators").is_none());
    assert!(json.get("rollup").is_none());
}
