//! `SimReport`: the totals of a finished run.

use chrono::{DateTime, TimeDelta, Utc};

use cw_core::{minutes_f64, whole_minutes};

/// Result of a completed simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimReport {
    /// Entries serviced.  Equals the number of queued windows on success.
    pub calls_made:      u64,
    /// Total time spent on calls, in whole minutes.
    pub calling_minutes: u64,
    /// Total time spent waiting for windows to open, in seconds.
    pub waiting_secs:    i64,
    pub started_at:      DateTime<Utc>,
    pub finished_at:     DateTime<Utc>,
    /// Numbers excluded at ingestion.
    pub dropped:         usize,
    /// Steps taken by the loop, serviced or not.
    pub steps:           u64,
}

impl SimReport {
    /// Waiting time as a duration.
    #[inline]
    pub fn waiting(&self) -> TimeDelta {
        TimeDelta::seconds(self.waiting_secs)
    }

    /// Waiting time in minutes, keeping any fraction.
    #[inline]
    pub fn waiting_minutes(&self) -> f64 {
        minutes_f64(self.waiting())
    }

    /// Calling minutes plus whole waiting minutes.
    #[inline]
    pub fn total_minutes(&self) -> u64 {
        self.calling_minutes + whole_minutes(self.waiting())
    }

    /// Virtual time from start to finish.
    #[inline]
    pub fn elapsed(&self) -> TimeDelta {
        self.finished_at - self.started_at
    }
}
