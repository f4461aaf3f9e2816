#![forbid(unsafe_code)]
//! strata-segment: the storage side of the substrate.
//!
//! A segment is an immutable, time-bounded columnar unit. This crate defines
//! the storage interface the rest of the engine consumes (`QueryableIndex`),
//! the heterogeneous physical column encodings behind it, the complex-type
//! codec registry, and an in-memory index plus builder used by tests and by
//! callers that have not persisted anything yet.
//!
//! The on-disk segment file format and its loaders are external
//! collaborators: anything that can expose a `QueryableIndex` plugs in here.

pub mod capabilities;
pub mod codec;
pub mod column;
pub mod index;
pub mod segment;

use thiserror::Error;

pub use capabilities::ColumnCapabilities;
pub use codec::{CodecRegistry, ComplexCodec};
pub use column::{ColumnHandle, ColumnHolder, ComplexColumn, DictionaryColumn, PhysicalColumn};
pub use index::{InMemoryIndex, IndexBuilder, QueryableIndex};
pub use segment::{AggregatorSpec, IndexSegment, Segment, SegmentId, SegmentMetadata};

pub type Result<T> = std::result::Result<T, SegmentError>;

#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("invalid segment schema: {0}")]
    Schema(String),

    #[error("column [{column}] has {actual} rows, segment has {expected}")]
    RowCountMismatch {
        column: String,
        actual: usize,
        expected: usize,
    },
}
