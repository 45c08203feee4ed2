//! `cw-sim`: the call queue simulator.
//!
//! # Step loop
//!
//! ```text
//! while queue is not empty:
//!   ① Dequeue:  take the head entry.
//!   ② Rollover: RolloverPolicy::adjust moves a stale window onto the
//!               current day (one day for SingleShot, as many as needed
//!               for CatchUp).
//!   ③ Test:     is the clock's time of day inside the window?
//!                 yes → call: clock += call duration, entry is done.
//!                 no  → requeue at the back; if the window opens later,
//!                       wait for it (clock jumps, waiting accumulates).
//!   ④ Guard:    if nothing was serviced, jump to the earliest queued
//!               window start (a start behind the clock is ignored).
//!   ⑤ Stall:    too many consecutive idle steps is an error.  A window
//!               still behind the clock after rollover is not idle.
//! ```
//!
//! The clock never moves backwards and both accumulators only grow.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cw_core::SimConfig;
//! use cw_schedule::{PrefixTable, ingest};
//! use cw_sim::{NoopObserver, SimBuilder};
//!
//! let config = SimConfig::default();
//! let ingested = ingest(&numbers, &PrefixTable::builtin(), &config);
//! let dropped = ingested.dropped.len();
//! let mut sim = SimBuilder::new(config.clone(), config.rollover)
//!     .windows(ingested.windows)
//!     .dropped(dropped)
//!     .build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::SimReport;
pub use sim::{Sim, StepOutcome, simulate};
