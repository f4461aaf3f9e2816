#![forbid(unsafe_code)]
//! strata-core: shared kernel for the strata query-execution substrate.
//!
//! This crate contains only *pure* types and small helpers that other crates
//! build on. There is **no I/O** and **no async** here.
//!
//! Crates that use this:
//! - strata-segment: physical column encodings and the segment storage interface.
//! - strata-rac: the RowsAndColumns abstraction and its adapters.
//! - strata-ops: the resumable operator execution protocol.
//! - strata-meta: the per-column segment metadata analyzer.

pub mod closer;
pub mod error;
pub mod interval;
pub mod prelude;
pub mod types;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reserved name of the time column. Always first in schema order and always
/// a 64-bit signed integer holding epoch millis.
pub const TIME_COLUMN: &str = "__time";
