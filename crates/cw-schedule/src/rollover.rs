//! `RolloverPolicy`: moves a stale calling window onto the current day.
//!
//! The simulator calls [`RolloverPolicy::adjust`] each time it takes an entry
//! off the head of the queue, before testing whether the window is open.
//!
//! Two policies are provided:
//!
//! - [`SingleShot`] shifts by one day at most per visit.  An entry that is
//!   more than a day stale is still shifted only once.  This is the default
//!   and keeps results comparable with earlier runs.
//! - [`CatchUp`] shifts by as many whole days as needed for the window start
//!   to be at or after the clock.
//!
//! [`RolloverMode`] implements the trait by dispatching to either, so the
//! choice can come from configuration.

use chrono::{DateTime, TimeDelta, Utc};

use cw_core::{RolloverMode, SECS_PER_DAY};

use crate::CallWindow;

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Hook called when an entry is dequeued, before the in-window test.
///
/// # Contract
///
/// - Must be deterministic.
/// - Must only move windows by whole days, keeping their time-of-day.
pub trait RolloverPolicy {
    fn adjust(&self, window: CallWindow, now: DateTime<Utc>) -> CallWindow;
}

// ── Single shot ───────────────────────────────────────────────────────────────

/// Shift by exactly one day if `now` is past the window start.
#[derive(Copy, Clone, Debug, Default)]
pub struct SingleShot;

impl RolloverPolicy for SingleShot {
    #[inline]
    fn adjust(&self, window: CallWindow, now: DateTime<Utc>) -> CallWindow {
        if now > window.start {
            window.shifted(1)
        } else {
            window
        }
    }
}

// ── Catch up ──────────────────────────────────────────────────────────────────

/// Shift by whole days until the window start is not before `now`.
#[derive(Copy, Clone, Debug, Default)]
pub struct CatchUp;

impl RolloverPolicy for CatchUp {
    fn adjust(&self, window: CallWindow, now: DateTime<Utc>) -> CallWindow {
        let behind = now - window.start;
        if behind <= TimeDelta::zero() {
            return window;
        }
        // Round up to whole days, counting a partial second as one.
        let secs = behind.num_seconds() + i64::from(behind.subsec_nanos() > 0);
        let days = (secs + SECS_PER_DAY - 1) / SECS_PER_DAY;
        window.shifted(days)
    }
}

// ── Config dispatch ───────────────────────────────────────────────────────────

impl RolloverPolicy for RolloverMode {
    fn adjust(&self, window: CallWindow, now: DateTime<Utc>) -> CallWindow {
        match self {
            RolloverMode::SingleShot => SingleShot.adjust(window, now),
            RolloverMode::CatchUp => CatchUp.adjust(window, now),
        }
    }
}
