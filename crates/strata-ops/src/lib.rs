#![forbid(unsafe_code)]
//! strata-ops: the resumable, push-based operator execution protocol.
//!
//! One caller thread drives the outermost operator synchronously; operators
//! perform bounded work, push batches downstream through a `Receiver`, and
//! either finish (`completed` exactly once, return `None`) or suspend by
//! returning a continuation. The receiver's `Signal` is the backpressure
//! and cancellation channel: STOP halts immediately, PAUSE suspends, GO
//! continues. No operator blocks internally without yielding.

pub mod limit;
pub mod protocol;
pub mod scan;

pub use limit::LimitTimeIntervalOperator;
pub use protocol::{drive, Continuation, Operator, OperatorError, Receiver, ResumeToken, Signal};
pub use scan::SegmentScanOperator;
