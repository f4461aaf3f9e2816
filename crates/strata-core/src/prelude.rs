//! Convenience re-exports for downstream crates.

pub use crate::closer::{Close, Closer};
pub use crate::error::{Error, Result};
pub use crate::interval::Interval;
pub use crate::types::{Scalar, TypeSignature, ValueType};
pub use crate::TIME_COLUMN;
