//! Interval-limiting stage: restricts every pushed batch to the query
//! interval by decorating it, leaving the upstream operator untouched.

use std::sync::Arc;

use strata_core::interval::Interval;
use strata_rac::{RowsAndColumns, RowsAndColumnsDecorator};

use crate::protocol::{Continuation, Operator, OperatorError, Receiver, Result, Signal};

/// Wraps an upstream operator. Construction requires exactly one query
/// interval; anything else is a configuration error raised immediately,
/// never deferred into execution.
pub struct LimitTimeIntervalOperator {
    upstream: Box<dyn Operator>,
    interval: Interval,
}

impl std::fmt::Debug for LimitTimeIntervalOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LimitTimeIntervalOperator")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl LimitTimeIntervalOperator {
    pub fn new(upstream: Box<dyn Operator>, intervals: &[Interval]) -> Result<Self> {
        match intervals {
            [interval] => Ok(Self {
                upstream,
                interval: *interval,
            }),
            _ => Err(OperatorError::Config(format!(
                "can only handle a single interval, got [{}]",
                intervals.len()
            ))),
        }
    }
}

impl Operator for LimitTimeIntervalOperator {
    fn go_or_continue(
        &mut self,
        continuation: Option<Box<dyn Continuation>>,
        receiver: &mut dyn Receiver,
    ) -> Result<Option<Box<dyn Continuation>>> {
        let mut limiting = LimitTimeReceiver {
            downstream: receiver,
            interval: self.interval,
        };
        self.upstream.go_or_continue(continuation, &mut limiting)
    }
}

/// Decorates each pushed batch and re-pushes, forwarding `completed` and
/// the downstream signal unchanged so the wrapped chain keeps the
/// protocol's identity.
struct LimitTimeReceiver<'a> {
    downstream: &'a mut dyn Receiver,
    interval: Interval,
}

impl Receiver for LimitTimeReceiver<'_> {
    fn push(&mut self, rac: Arc<dyn RowsAndColumns>) -> Signal {
        let mut decor = RowsAndColumnsDecorator::from_rac(rac);
        if !self.interval.is_eternity() {
            decor.limit_time_range(self.interval);
        }
        self.downstream.push(decor.to_rows_and_columns())
    }

    fn completed(&mut self) {
        self.downstream.completed();
    }
}
