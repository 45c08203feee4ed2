//! `cw-core`: foundational types for the call-window dialer simulator.
//!
//! This crate is a dependency of every other `cw-*` crate.  It has no `cw-*`
//! dependencies and minimal external ones (only `chrono` and `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CallId`, `RecordNo`                                  |
//! | [`time`]        | `SimClock`, `DailyHours`, time-of-day helpers         |
//! | [`config`]      | `SimConfig`, `RolloverMode`, `OverlapPolicy`          |
//! | [`error`]       | `CwError`, `CwResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!
//! The `callsim` TOML config loader needs the `serde` feature.

pub mod config;
pub mod error;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{OverlapPolicy, RolloverMode, SimConfig};
pub use error::{CwError, CwResult};
pub use ids::{CallId, RecordNo};
pub use time::{
    DailyHours, SECS_PER_DAY, SimClock, minutes_f64, parse_time_of_day, seconds_of_day,
    whole_minutes,
};
