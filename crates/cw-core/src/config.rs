//! Run configuration.
//!
//! `SimConfig` is plain data.  The `callsim` binary loads it from a TOML file
//! (with the `serde` feature) and overlays command-line flags before handing
//! it to the simulator.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

use crate::{CwError, CwResult, DailyHours};

// ── Policies ──────────────────────────────────────────────────────────────────

/// How a stale calling window is moved onto the current day.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RolloverMode {
    /// Shift by exactly one day whenever the clock has passed the window
    /// start, once per visit.  A window more than a day stale stays stale.
    #[default]
    SingleShot,
    /// Shift by whole days until the window start is not before the clock.
    CatchUp,
}

/// What to do when a two-timezone number has no overlapping hours.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OverlapPolicy {
    /// Keep the inverted window.  It can never be serviced, so the run ends
    /// with a stall error once the simulator detects it.
    #[default]
    Permissive,
    /// Fail resolution; the number is dropped at ingestion.
    Reject,
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Civil date every calling window and the start instant are anchored on.
    pub reference_date: NaiveDate,

    /// Time of day (UTC) the agent starts dialling.
    pub start_time: NaiveTime,

    /// Length of one call in minutes.  Default: 3.
    pub call_duration_mins: u32,

    /// Local opening hours, applied in every timezone.
    pub hours: DailyHours,

    /// Day-rollover behaviour for stale windows.
    pub rollover: RolloverMode,

    /// Handling of empty two-timezone overlaps.
    pub overlap: OverlapPolicy,

    /// A run fails as stalled after `max_idle_passes × queue length`
    /// consecutive steps without a successful call.
    pub max_idle_passes: u32,

    /// Region used to interpret numbers without an international prefix.
    pub default_region: String,
}

impl SimConfig {
    /// The instant the virtual clock starts at.
    #[inline]
    pub fn start_instant(&self) -> DateTime<Utc> {
        self.reference_date.and_time(self.start_time).and_utc()
    }

    /// Length of one call.
    #[inline]
    pub fn call_duration(&self) -> TimeDelta {
        TimeDelta::minutes(self.call_duration_mins as i64)
    }

    /// Reject configurations the simulator cannot run with.
    pub fn validate(&self) -> CwResult<()> {
        if self.call_duration_mins == 0 {
            return Err(CwError::Config("call_duration_mins must be > 0".into()));
        }
        if self.max_idle_passes == 0 {
            return Err(CwError::Config("max_idle_passes must be > 0".into()));
        }
        if self.default_region.trim().is_empty() {
            return Err(CwError::Config("default_region must not be empty".into()));
        }
        self.hours.validate()
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            // A winter Monday: northern-hemisphere zones are on standard time.
            reference_date:     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default(),
            start_time:         NaiveTime::from_hms_opt(21, 30, 0).unwrap_or_default(),
            call_duration_mins: 3,
            hours:              DailyHours::default(),
            rollover:           RolloverMode::default(),
            overlap:            OverlapPolicy::default(),
            max_idle_passes:    2,
            default_region:     "US".to_owned(),
        }
    }
}
