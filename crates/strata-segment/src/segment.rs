//! Segment identity and per-segment metadata value objects.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strata_core::interval::Interval;

use crate::index::QueryableIndex;

/// Identifier of one immutable, time-bounded columnar unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentId {
    pub datasource: String,
    pub interval: Interval,
    pub version: String,
}

impl SegmentId {
    pub fn new(datasource: impl Into<String>, interval: Interval, version: impl Into<String>) -> Self {
        Self {
            datasource: datasource.into(),
            interval,
            version: version.into(),
        }
    }

    /// Placeholder id for tests and ad-hoc segments.
    pub fn dummy(datasource: impl Into<String>) -> Self {
        Self::new(datasource, Interval::ETERNITY, "dummy_version")
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            self.datasource, self.interval.start, self.interval.end, self.version
        )
    }
}

/// Ingestion-time aggregator description carried in segment metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorSpec {
    pub name: String,
    pub type_name: String,
    pub field_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentMetadata {
    pub aggregators: Vec<AggregatorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_granularity: Option<String>,
}

/// A segment: identity plus access to its columnar index.
pub trait Segment: Send + Sync {
    fn id(&self) -> &SegmentId;

    fn interval(&self) -> Interval {
        self.index().interval()
    }

    fn index(&self) -> &dyn QueryableIndex;

    /// Shared handle to the index, for adapters that outlive the borrow.
    fn index_arc(&self) -> Arc<dyn QueryableIndex>;
}

pub struct IndexSegment {
    id: SegmentId,
    index: Arc<dyn QueryableIndex>,
}

impl IndexSegment {
    pub fn new(id: SegmentId, index: Arc<dyn QueryableIndex>) -> Self {
        Self { id, index }
    }
}

impl Segment for IndexSegment {
    fn id(&self) -> &SegmentId {
        &self.id
    }

    fn index(&self) -> &dyn QueryableIndex {
        self.index.as_ref()
    }

    fn index_arc(&self) -> Arc<dyn QueryableIndex> {
        self.index.clone()
    }
}
