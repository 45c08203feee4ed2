//! The `Sim` struct and its step loop.

use chrono::TimeDelta;
use tracing::{debug, info, trace};

use cw_core::{CallId, SimClock, SimConfig};
use cw_schedule::{CallQueue, CallWindow, RolloverPolicy};

use crate::{NoopObserver, SimBuilder, SimError, SimObserver, SimReport, SimResult};

// ── StepOutcome ───────────────────────────────────────────────────────────────

/// What happened to the head entry during one [`Sim::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The entry was called and removed.
    Called(CallId),
    /// The entry was outside its window and went to the back of the queue.
    Requeued(CallId),
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<P>` owns the queue, the virtual clock, and both accumulators.  Each
/// [`step`][Self::step] examines the head entry once:
///
/// 1. **Rollover**: [`RolloverPolicy::adjust`] moves a stale window forward.
/// 2. **Test**: the clock's time of day against the window
///    ([`CallWindow::contains_time_of_day`]).
/// 3. **Call** (inside): clock and calling time advance by one call.
/// 4. **Requeue** (outside): the entry goes to the back; if its window opens
///    later the clock waits for it.
/// 5. **Guard**: if the queue did not shrink, jump to the earliest queued
///    window start (never backwards).
/// 6. **Stall check**: more than `max_idle_passes × queue length` consecutive
///    idle steps fails the run with [`SimError::Stalled`].  A requeue whose
///    window is still behind the clock after rollover is catching up and
///    does not count as idle.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: RolloverPolicy> {
    /// Run configuration.
    pub config: SimConfig,

    /// Virtual clock.  Never moves backwards.
    pub clock: SimClock,

    /// Entries not yet called, head first.
    pub queue: CallQueue,

    /// Day-rollover adjustment applied to each dequeued entry.
    pub policy: P,

    pub(crate) call_duration: TimeDelta,
    pub(crate) calls_made:    u64,
    pub(crate) calling:       TimeDelta,
    pub(crate) waiting:       TimeDelta,
    pub(crate) steps:         u64,
    /// Consecutive steps since the last call.
    pub(crate) idle_steps:    usize,
    pub(crate) dropped:       usize,
}

impl<P: RolloverPolicy> Sim<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Step until the queue is empty and return the totals.
    ///
    /// Calls observer hooks at every step.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimReport> {
        observer.on_sim_start(&self.clock, self.queue.len());
        info!(queued = self.queue.len(), start = %self.clock.now, "simulation started");

        while self.step(observer)?.is_some() {}

        let report = self.report();
        info!(
            calls = report.calls_made,
            calling_minutes = report.calling_minutes,
            waiting_minutes = report.waiting_minutes(),
            steps = report.steps,
            "simulation finished at {}",
            self.clock
        );
        observer.on_sim_end(&report);
        Ok(report)
    }

    /// Examine the head entry once.
    ///
    /// Returns `Ok(None)` when the queue is already empty.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Option<StepOutcome>> {
        let Some(head) = self.queue.pop_front() else {
            return Ok(None);
        };
        let size_before = self.queue.len() + 1;
        self.steps += 1;

        let now = self.clock.now;
        let window = self.policy.adjust(head, now);

        if window.contains_time_of_day(now) {
            trace!(id = %window.id, number = %window.number, %now, "calling");
            observer.on_call(&window, now);
            self.clock.advance(self.call_duration);
            self.calling += self.call_duration;
            self.calls_made += 1;
            self.idle_steps = 0;
            return Ok(Some(StepOutcome::Called(window.id)));
        }

        let id = window.id;
        // Single-shot rollover moves a stale window one day per visit; until
        // it reaches the clock the entry is still catching up, not idle.
        let catching_up = window.start < now;
        let waited = self.clock.jump_to(window.start);
        self.waiting += waited;
        trace!(
            %id,
            %now,
            start = %window.start,
            end = %window.end,
            waited_secs = waited.num_seconds(),
            "outside window, requeued"
        );
        observer.on_requeue(&window, now, waited);
        self.queue.push_back(window);

        if self.queue.len() == size_before {
            self.starvation_guard(observer);
        }

        if !catching_up {
            self.idle_steps += 1;
        }
        self.check_stall()?;
        Ok(Some(StepOutcome::Requeued(id)))
    }

    /// Totals so far.  After [`run`][Self::run] returns this is the final
    /// report.
    pub fn report(&self) -> SimReport {
        SimReport {
            calls_made:      self.calls_made,
            calling_minutes: self.calling.num_minutes().max(0) as u64,
            waiting_secs:    self.waiting.num_seconds(),
            started_at:      self.clock.start,
            finished_at:     self.clock.now,
            dropped:         self.dropped,
            steps:           self.steps,
        }
    }

    pub fn calls_made(&self) -> u64 {
        self.calls_made
    }

    /// Total call time so far.
    pub fn calling(&self) -> TimeDelta {
        self.calling
    }

    /// Total waiting time so far.
    pub fn waiting(&self) -> TimeDelta {
        self.waiting
    }

    pub fn is_done(&self) -> bool {
        self.queue.is_empty()
    }

    // ── Step helpers ──────────────────────────────────────────────────────

    /// Jump to the earliest queued window start.  The clock never moves
    /// backwards, so a start at or behind it leaves the clock where it is.
    fn starvation_guard<O: SimObserver>(&mut self, observer: &mut O) {
        let from = self.clock.now;
        let Some(target) = self.queue.earliest_start() else {
            return;
        };
        let jumped = self.clock.jump_to(target);
        if jumped <= TimeDelta::zero() {
            return;
        }
        self.waiting += jumped;
        debug!(%from, to = %target, waited_secs = jumped.num_seconds(), "idle jump");
        observer.on_idle_jump(from, target);
    }

    fn check_stall(&self) -> SimResult<()> {
        let pending = self.queue.len();
        let limit = self.config.max_idle_passes as usize * pending;
        if self.idle_steps > limit {
            return Err(SimError::Stalled {
                pending,
                idle_steps: self.idle_steps,
                at:         self.clock.now,
            });
        }
        Ok(())
    }
}

// ── Convenience entry point ───────────────────────────────────────────────────

/// Simulate `windows` with the rollover mode from `config` and no observer.
pub fn simulate(windows: Vec<CallWindow>, config: &SimConfig) -> SimResult<SimReport> {
    SimBuilder::new(config.clone(), config.rollover)
        .windows(windows)
        .build()?
        .run(&mut NoopObserver)
}
