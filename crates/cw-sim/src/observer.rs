//! Simulation observer trait for progress reporting and event logging.

use chrono::{DateTime, TimeDelta, Utc};

use cw_core::SimClock;
use cw_schedule::CallWindow;

use crate::SimReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// step loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: call counter
///
/// ```rust,ignore
/// struct Counter { calls: usize }
///
/// impl SimObserver for Counter {
///     fn on_call(&mut self, _window: &CallWindow, _at: DateTime<Utc>) {
///         self.calls += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first step.  `queued` is the number of entries
    /// waiting to be called.
    fn on_sim_start(&mut self, _clock: &SimClock, _queued: usize) {}

    /// Called when `window` is serviced.  `at` is the instant the call starts.
    fn on_call(&mut self, _window: &CallWindow, _at: DateTime<Utc>) {}

    /// Called when `window` is pushed to the back of the queue.
    ///
    /// `at` is the clock when the entry was examined; `waited` is how far the
    /// clock then jumped to reach the window start (zero if it did not).
    fn on_requeue(&mut self, _window: &CallWindow, _at: DateTime<Utc>, _waited: TimeDelta) {}

    /// Called when the starvation guard jumps the clock from `from` to `to`.
    fn on_idle_jump(&mut self, _from: DateTime<Utc>, _to: DateTime<Utc>) {}

    /// Called once after the queue drains.  Not called when the run fails.
    fn on_sim_end(&mut self, _report: &SimReport) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
