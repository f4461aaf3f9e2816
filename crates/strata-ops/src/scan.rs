//! Leaf source operator: pushes one segment's RowsAndColumns.

use std::sync::Arc;

use strata_rac::{QueryableIndexRowsAndColumns, RowsAndColumns};
use strata_segment::Segment;

use crate::protocol::{
    Continuation, Operator, OperatorError, Receiver, Result, ResumeToken, Signal,
};

enum ScanState {
    NotStarted,
    /// Batch delivered, `completed` still owed (suspended on PAUSE).
    Pushed,
    Terminated,
}

/// Pushes a single batch then completes. Honors PAUSE by suspending between
/// the push and the completion callback.
pub struct SegmentScanOperator {
    rac: Arc<dyn RowsAndColumns>,
    state: ScanState,
}

impl SegmentScanOperator {
    pub fn new(segment: &dyn Segment) -> Self {
        Self::from_rac(Arc::new(QueryableIndexRowsAndColumns::new(
            segment.index_arc(),
        )))
    }

    pub fn from_rac(rac: Arc<dyn RowsAndColumns>) -> Self {
        Self {
            rac,
            state: ScanState::NotStarted,
        }
    }
}

impl Operator for SegmentScanOperator {
    fn go_or_continue(
        &mut self,
        continuation: Option<Box<dyn Continuation>>,
        receiver: &mut dyn Receiver,
    ) -> Result<Option<Box<dyn Continuation>>> {
        match self.state {
            ScanState::Terminated => {
                if let Some(mut token) = continuation {
                    token.close();
                }
                Err(OperatorError::Protocol(
                    "segment scan driven past termination".into(),
                ))
            }
            ScanState::Pushed => {
                // Resumed after PAUSE; the push already happened.
                if let Some(mut token) = continuation {
                    token.close();
                }
                self.state = ScanState::Terminated;
                receiver.completed();
                Ok(None)
            }
            ScanState::NotStarted => {
                tracing::trace!(rows = self.rac.num_rows(), "scan pushing batch");
                match receiver.push(self.rac.clone()) {
                    Signal::Stop => {
                        self.state = ScanState::Terminated;
                        Ok(None)
                    }
                    Signal::Pause => {
                        self.state = ScanState::Pushed;
                        Ok(Some(Box::new(ResumeToken::new())))
                    }
                    Signal::Go => {
                        self.state = ScanState::Terminated;
                        receiver.completed();
                        Ok(None)
                    }
                }
            }
        }
    }
}
