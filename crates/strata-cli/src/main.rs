//! strata CLI: analyze a JSON-described segment and print the report.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use thiserror::Error;

use strata_core::interval::Interval;
use strata_meta::{AnalysisType, AnalysisTypes, SegmentAnalyzer};
use strata_segment::codec::RawSizeCodec;
use strata_segment::{CodecRegistry, IndexBuilder, IndexSegment, QueryableIndex, SegmentId};

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "strata: columnar segment analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a segment described by a JSON file
    Analyze {
        /// Path to the segment description JSON
        #[arg(short, long)]
        segment: PathBuf,

        /// Comma-separated analysis types (default: all).
        /// Known: cardinality,size,interval,minmax,aggregators,rollup
        #[arg(long)]
        types: Option<String>,

        /// Complex type names to treat as known (registers a raw-size codec)
        #[arg(long)]
        codec: Vec<String>,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("unknown analysis type '{0}'")]
    UnknownAnalysisType(String),

    #[error("segment description: {0}")]
    Description(String),
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            segment,
            types,
            codec,
            pretty,
        } => {
            if let Err(e) = analyze(&segment, types.as_deref(), &codec, pretty) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

/// JSON shape of a segment description.
#[derive(Deserialize)]
struct SegmentDescription {
    datasource: String,
    time: Vec<i64>,
    #[serde(default)]
    interval: Option<Interval>,
    #[serde(default)]
    columns: Vec<ColumnDescription>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ColumnKind {
    Long { values: Vec<Option<i64>> },
    Float { values: Vec<Option<f32>> },
    Double { values: Vec<Option<f64>> },
    String { values: Vec<Option<String>> },
    MultiString { values: Vec<Vec<String>> },
    Complex { type_name: String, values: Vec<Vec<u8>> },
    NullDiscovered,
}

#[derive(Deserialize)]
struct ColumnDescription {
    name: String,
    #[serde(flatten)]
    kind: ColumnKind,
}

fn analyze(
    path: &PathBuf,
    types: Option<&str>,
    codecs: &[String],
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    let description: SegmentDescription = serde_json::from_str(&raw)?;

    let analysis_types = match types {
        None => AnalysisTypes::all(),
        Some(list) => parse_types(list)?,
    };

    let registry = Arc::new(CodecRegistry::new());
    for type_name in codecs {
        registry.register(Arc::new(RawSizeCodec::new(type_name.clone())));
    }

    let datasource = description.datasource.clone();
    let index = build_index(description).map_err(|e| CliError::Description(e.to_string()))?;
    let interval = index.interval();
    let segment = IndexSegment::new(
        SegmentId::new(datasource, interval, "cli"),
        Arc::new(index),
    );

    let analyzer = SegmentAnalyzer::new(analysis_types, registry);
    let report = analyzer.report(&segment)?;

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);
    Ok(())
}

fn build_index(
    description: SegmentDescription,
) -> Result<strata_segment::InMemoryIndex, strata_segment::SegmentError> {
    let mut builder = IndexBuilder::new().time(description.time);
    if let Some(interval) = description.interval {
        builder = builder.interval(interval);
    }
    for column in description.columns {
        let name = column.name;
        builder = match column.kind {
            ColumnKind::Long { values } => builder.long_column(&name, values),
            ColumnKind::Float { values } => builder.float_column(&name, values),
            ColumnKind::Double { values } => builder.double_column(&name, values),
            ColumnKind::String { values } => {
                builder.string_column(&name, values.iter().map(|v| v.as_deref()).collect())
            }
            ColumnKind::MultiString { values } => builder.multi_string_column(
                &name,
                values
                    .iter()
                    .map(|row| row.iter().map(String::as_str).collect())
                    .collect(),
            ),
            ColumnKind::Complex { type_name, values } => {
                builder.complex_column(&name, &type_name, values)
            }
            ColumnKind::NullDiscovered => builder.null_discovered_column(&name),
        };
    }
    builder.build()
}

fn parse_types(list: &str) -> Result<AnalysisTypes, CliError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.to_ascii_lowercase().as_str() {
            "cardinality" => Ok(AnalysisType::Cardinality),
            "size" => Ok(AnalysisType::Size),
            "interval" => Ok(AnalysisType::Interval),
            "minmax" => Ok(AnalysisType::Minmax),
            "aggregators" => Ok(AnalysisType::Aggregators),
            "rollup" => Ok(AnalysisType::Rollup),
            other => Err(CliError::UnknownAnalysisType(other.to_owned())),
        })
        .collect()
}
