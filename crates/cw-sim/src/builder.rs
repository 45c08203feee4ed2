//! Fluent builder for constructing a [`Sim`].

use std::collections::HashSet;

use chrono::TimeDelta;

use cw_core::{SimClock, SimConfig};
use cw_schedule::{CallQueue, CallWindow, RolloverPolicy};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: start instant, call duration, idle-pass limit, …
/// - `P: RolloverPolicy`: usually `config.rollover`, or a
///   [`SingleShot`][cw_schedule::SingleShot]/[`CatchUp`][cw_schedule::CatchUp]
///   value directly
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default        |
/// |-----------------|----------------|
/// | `.windows(v)`   | Empty queue    |
/// | `.dropped(n)`   | `0`            |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, CatchUp)
///     .windows(ingested.windows)
///     .dropped(ingested.dropped.len())
///     .build()?;
/// let report = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: RolloverPolicy> {
    config:  SimConfig,
    policy:  P,
    windows: Vec<CallWindow>,
    dropped: usize,
}

impl<P: RolloverPolicy> SimBuilder<P> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, policy: P) -> Self {
        Self {
            config,
            policy,
            windows: Vec::new(),
            dropped: 0,
        }
    }

    /// Supply the calling windows, in queue order.
    pub fn windows(mut self, windows: Vec<CallWindow>) -> Self {
        self.windows = windows;
        self
    }

    /// Record how many numbers were excluded before simulation.  Only
    /// reported, never simulated.
    pub fn dropped(mut self, dropped: usize) -> Self {
        self.dropped = dropped;
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;

        let mut seen = HashSet::with_capacity(self.windows.len());
        for window in &self.windows {
            if !seen.insert(window.id) {
                return Err(SimError::DuplicateCall(window.id));
            }
        }

        Ok(Sim {
            clock:         SimClock::new(self.config.start_instant()),
            call_duration: self.config.call_duration(),
            queue:         CallQueue::from_windows(self.windows),
            policy:        self.policy,
            calls_made:    0,
            calling:       TimeDelta::zero(),
            waiting:       TimeDelta::zero(),
            steps:         0,
            idle_steps:    0,
            dropped:       self.dropped,
            config:        self.config,
        })
    }
}
