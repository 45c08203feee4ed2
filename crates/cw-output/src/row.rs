//! Plain data row types written by output backends.

use std::fmt;

use cw_sim::SimReport;

/// What a [`CallEventRow`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// An entry was serviced.
    Call,
    /// An entry was outside its window and went to the back of the queue.
    Requeue,
    /// The starvation guard moved the clock forward.
    IdleJump,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Call => "call",
            EventKind::Requeue => "requeue",
            EventKind::IdleJump => "idle_jump",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One simulator event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEventRow {
    /// Position in the event stream, from 0.
    pub seq:          u64,
    /// `None` for idle jumps, which are not tied to an entry.
    pub call_id:      Option<u32>,
    /// Empty for idle jumps.
    pub number:       String,
    pub kind:         EventKind,
    /// Clock when the event happened (Unix seconds).
    pub at_unix_secs: i64,
    /// Clock movement caused by the event: the wait for a requeue, the jump
    /// length for an idle jump, zero for a call.
    pub waited_secs:  i64,
}

/// Totals of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummaryRow {
    pub calls_made:         u64,
    pub calling_minutes:    u64,
    pub waiting_secs:       i64,
    pub started_unix_secs:  i64,
    pub finished_unix_secs: i64,
    pub dropped:            u64,
    pub steps:              u64,
}

impl From<&SimReport> for RunSummaryRow {
    fn from(report: &SimReport) -> Self {
        Self {
            calls_made:         report.calls_made,
            calling_minutes:    report.calling_minutes,
            waiting_secs:       report.waiting_secs,
            started_unix_secs:  report.started_at.timestamp(),
            finished_unix_secs: report.finished_at.timestamp(),
            dropped:            report.dropped as u64,
            steps:              report.steps,
        }
    }
}
