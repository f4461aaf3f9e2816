#![forbid(unsafe_code)]
//! strata-rac: the storage-agnostic row/column data abstraction.
//!
//! A `RowsAndColumns` is a named set of columns sharing one row count. It is
//! polymorphic over an *open* set of capability views: other subsystems ask
//! for an alternate view by type and get an explicit absence when the
//! instance cannot provide it, so the abstraction never has to enumerate its
//! consumers.
//!
//! Concrete shapes here: `MapOfColumns` (plain in-memory), the
//! `QueryableIndexRowsAndColumns` storage adapter (owns column lifetimes,
//! caches the row count), and the decorator machinery producing derived
//! logical views such as time-range restrictions.

pub mod adapter;
pub mod column;
pub mod decorator;
pub mod map;
pub mod queryable;
pub mod rac;

pub use adapter::StorageAdapter;
pub use column::{Column, HolderColumn, MappedColumn, VecColumn};
pub use decorator::RowsAndColumnsDecorator;
pub use map::MapOfColumns;
pub use queryable::QueryableIndexRowsAndColumns;
pub use rac::RowsAndColumns;
