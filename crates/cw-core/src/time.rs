//! Simulation time model.
//!
//! # Design
//!
//! The simulator runs on a virtual clock holding one absolute UTC instant.
//! It is never driven by wall-clock time: the run loop moves it forward
//! explicitly, either by the length of a call or by jumping to the instant a
//! calling window opens.
//!
//! ```text
//! now = start + Σ call durations + Σ waits
//! ```
//!
//! Calling windows are compared on their time-of-day component only, so the
//! helpers here work in whole seconds since midnight.

use std::fmt;

use chrono::{DateTime, NaiveTime, TimeDelta, Timelike, Utc};

use crate::{CwError, CwResult};

/// Seconds in one civil day.
pub const SECS_PER_DAY: i64 = 86_400;

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The simulator's single authoritative notion of "now".
///
/// `SimClock` is `Copy` and holds no heap data.  It is monotonically
/// non-decreasing: [`advance`][Self::advance] only accepts non-negative
/// deltas and [`jump_to`][Self::jump_to] ignores targets in the past.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Instant the run started at.
    pub start: DateTime<Utc>,
    /// Current virtual instant.
    pub now: DateTime<Utc>,
}

impl SimClock {
    /// Create a clock positioned at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { start, now: start }
    }

    /// Move the clock forward by `by`.
    ///
    /// Negative deltas are ignored.
    #[inline]
    pub fn advance(&mut self, by: TimeDelta) {
        if by > TimeDelta::zero() {
            self.now += by;
        }
    }

    /// Jump forward to `target`, returning how much time elapsed.
    ///
    /// Returns `TimeDelta::zero()` and leaves the clock untouched when
    /// `target <= now`.
    #[inline]
    pub fn jump_to(&mut self, target: DateTime<Utc>) -> TimeDelta {
        if target <= self.now {
            return TimeDelta::zero();
        }
        let waited = target - self.now;
        self.now = target;
        waited
    }

    /// Virtual time elapsed since the run started.
    #[inline]
    pub fn elapsed(&self) -> TimeDelta {
        self.now - self.start
    }

    /// Time-of-day component of `now`.
    #[inline]
    pub fn time_of_day(&self) -> NaiveTime {
        self.now.time()
    }

    /// Break elapsed time into (day, hour, minute) components from run start.
    pub fn elapsed_dhm(&self) -> (i64, u32, u32) {
        let total_secs = self.elapsed().num_seconds().max(0);
        let days = total_secs / SECS_PER_DAY;
        let hours = ((total_secs % SECS_PER_DAY) / 3_600) as u32;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        (days, hours, minutes)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(
            f,
            "{} (+{}d {:02}:{:02})",
            self.now.format("%Y-%m-%d %H:%M:%S UTC"),
            d,
            h,
            m
        )
    }
}

// ── DailyHours ────────────────────────────────────────────────────────────────

/// Local opening hours applied in every timezone (default 09:00–20:00).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyHours {
    /// Local time the window opens.
    pub open: NaiveTime,
    /// Local time the window closes (inclusive).
    pub close: NaiveTime,
}

impl DailyHours {
    /// Build opening hours, rejecting `open >= close`.
    pub fn new(open: NaiveTime, close: NaiveTime) -> CwResult<Self> {
        let hours = Self { open, close };
        hours.validate()?;
        Ok(hours)
    }

    pub fn validate(&self) -> CwResult<()> {
        if self.open >= self.close {
            return Err(CwError::Config(format!(
                "opening time {} must be before closing time {}",
                self.open, self.close
            )));
        }
        Ok(())
    }
}

impl Default for DailyHours {
    fn default() -> Self {
        Self {
            open:  NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            close: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Parse an `HH:MM:SS` time-of-day string.
pub fn parse_time_of_day(s: &str) -> CwResult<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M:%S")
        .map_err(|e| CwError::Parse(format!("invalid time of day {s:?}: {e} (expected HH:MM:SS)")))
}

/// Seconds since midnight, ignoring sub-second precision.
#[inline]
pub fn seconds_of_day(instant: DateTime<Utc>) -> i64 {
    instant.time().num_seconds_from_midnight() as i64
}

/// A duration expressed in minutes, keeping any fractional part.
#[inline]
pub fn minutes_f64(d: TimeDelta) -> f64 {
    d.num_seconds() as f64 / 60.0
}

/// A duration truncated to whole minutes (floor for non-negative input).
#[inline]
pub fn whole_minutes(d: TimeDelta) -> u64 {
    d.num_minutes().max(0) as u64
}
