//! Operator, Receiver, Signal, and the continuation contract.

use std::sync::Arc;

use strata_core::closer::Closer;
use strata_rac::RowsAndColumns;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OperatorError>;

#[derive(Debug, Error)]
pub enum OperatorError {
    /// Detected eagerly at construction, never deferred into a pipeline.
    #[error("operator configuration: {0}")]
    Config(String),

    #[error("operator execution: {0}")]
    Exec(String),

    /// Programmer error, e.g. driving an operator past termination.
    #[error("operator protocol violation: {0}")]
    Protocol(String),
}

/// Control token a receiver returns after accepting a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Keep pushing.
    Go,
    /// Suspend internal work; the operator returns a continuation.
    Pause,
    /// Halt immediately: no further pushes, no `completed`.
    Stop,
}

/// Downstream end of an operator. `push` accepts one batch; `completed` is
/// called exactly once when the upstream has no more data.
pub trait Receiver {
    fn push(&mut self, rac: Arc<dyn RowsAndColumns>) -> Signal;

    fn completed(&mut self);
}

/// Opaque, closeable resume token. `Some(token)` from `go_or_continue`
/// means "call me again with this"; a driver abandoning the pipeline before
/// completion must close any outstanding token instead.
pub trait Continuation: Send {
    fn close(&mut self);
}

impl std::fmt::Debug for dyn Continuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Continuation")
    }
}

/// Resumable computation unit; chains of these form an execution pipeline.
pub trait Operator {
    /// Perform bounded work. The first call passes `None`; subsequent calls
    /// pass back the token the previous call returned. `Ok(None)` means
    /// finished: do not call again.
    fn go_or_continue(
        &mut self,
        continuation: Option<Box<dyn Continuation>>,
        receiver: &mut dyn Receiver,
    ) -> Result<Option<Box<dyn Continuation>>>;
}

/// Resume token for operators that keep cursor state internally and only
/// need the token to carry resources pending release.
pub struct ResumeToken {
    closer: Closer,
}

impl ResumeToken {
    pub fn new() -> Self {
        Self {
            closer: Closer::new(),
        }
    }

    pub fn holding(closer: Closer) -> Self {
        Self { closer }
    }
}

impl Default for ResumeToken {
    fn default() -> Self {
        Self::new()
    }
}

impl Continuation for ResumeToken {
    fn close(&mut self) {
        self.closer.close();
    }
}

/// Drive an operator to completion: loop `go_or_continue` until it returns
/// `None`. On error the operator has already released what it held; the
/// driver simply propagates.
pub fn drive(op: &mut dyn Operator, receiver: &mut dyn Receiver) -> Result<()> {
    let mut continuation = op.go_or_continue(None, receiver)?;
    while let Some(token) = continuation.take() {
        tracing::trace!("resuming suspended operator");
        continuation = op.go_or_continue(Some(token), receiver)?;
    }
    Ok(())
}
