//! Calling windows and the timezone → UTC window resolver.
//!
//! # Window model
//!
//! A number may be called between the local opening and closing time
//! ([`DailyHours`], 09:00–20:00 by default) of every timezone it belongs to.
//! Windows are computed once, on the configured reference date, and stored as
//! a pair of UTC instants:
//!
//! ```text
//! America/New_York, 2024-01-15:  [2024-01-15 14:00Z, 2024-01-16 01:00Z]
//! Europe/London,    2024-01-15:  [2024-01-15 09:00Z, 2024-01-15 20:00Z]
//! ```
//!
//! The simulator only compares time-of-day components against the window,
//! so a window whose UTC end falls on the next day wraps past midnight
//! (see [`CallWindow::contains_time_of_day`]).
//!
//! # Two timezones
//!
//! The window is the intersection of both local windows, compared as UTC
//! instants.  An empty intersection yields an inverted window (`start > end`)
//! under [`OverlapPolicy::Permissive`] and an error under
//! [`OverlapPolicy::Reject`].  Extra timezones beyond the second are ignored.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

use cw_core::time::seconds_of_day;
use cw_core::{CallId, DailyHours, OverlapPolicy, SECS_PER_DAY};

use crate::WindowError;

// ── CallWindow ────────────────────────────────────────────────────────────────

/// One queued number together with the UTC instants its window opens and
/// closes.
///
/// Values are moved, never mutated: the day-rollover adjustment consumes a
/// window and returns a shifted copy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallWindow {
    pub id:     CallId,
    /// The number as it appeared in the input list.
    pub number: String,
    pub start:  DateTime<Utc>,
    pub end:    DateTime<Utc>,
}

impl CallWindow {
    pub fn new(
        id:     CallId,
        number: impl Into<String>,
        start:  DateTime<Utc>,
        end:    DateTime<Utc>,
    ) -> Self {
        Self { id, number: number.into(), start, end }
    }

    /// `end - start`.  Negative for an inverted window.
    #[inline]
    pub fn length(&self) -> TimeDelta {
        self.end - self.start
    }

    /// `true` if the window can never be open (`start > end`).
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Move both bounds by `days` whole days.
    #[must_use]
    pub fn shifted(self, days: i64) -> Self {
        let by = TimeDelta::days(days);
        Self {
            start: self.start + by,
            end:   self.end + by,
            ..self
        }
    }

    /// Is the time-of-day of `instant` inside the window, both ends inclusive?
    ///
    /// Only time-of-day components are compared.  When the window's UTC end
    /// lies on a later day than its start, the window wraps past midnight:
    ///
    /// ```text
    /// [14:00, 01:00+1d]  contains 21:30, 00:15, 01:00, not 02:00 or 13:59
    /// ```
    ///
    /// An inverted window contains nothing; a window of a day or longer
    /// contains everything.
    pub fn contains_time_of_day(&self, instant: DateTime<Utc>) -> bool {
        let length = self.length();
        if length < TimeDelta::zero() {
            return false;
        }
        if length >= TimeDelta::days(1) {
            return true;
        }
        let offset = (seconds_of_day(instant) - seconds_of_day(self.start)).rem_euclid(SECS_PER_DAY);
        offset <= length.num_seconds()
    }
}

// ── Resolver ──────────────────────────────────────────────────────────────────

/// Local `[open, close]` of `tz` on `date`, converted to UTC.
pub fn local_window(
    tz:    Tz,
    date:  NaiveDate,
    hours: DailyHours,
) -> Result<(DateTime<Utc>, DateTime<Utc>), WindowError> {
    Ok((to_utc(tz, date, hours.open)?, to_utc(tz, date, hours.close)?))
}

/// Compute the UTC calling window for a number that belongs to `zones`.
///
/// Uses the first zone alone, or the intersection of the first two.
pub fn resolve_window<S: AsRef<str>>(
    zones:  &[S],
    date:   NaiveDate,
    hours:  DailyHours,
    policy: OverlapPolicy,
) -> Result<(DateTime<Utc>, DateTime<Utc>), WindowError> {
    match zones {
        [] => Err(WindowError::NoTimezones),
        [only] => local_window(parse_zone(only.as_ref())?, date, hours),
        [first, second, ..] => {
            let (first, second) = (first.as_ref(), second.as_ref());
            let (s1, e1) = local_window(parse_zone(first)?, date, hours)?;
            let (s2, e2) = local_window(parse_zone(second)?, date, hours)?;

            let start = s1.max(s2);
            let end = e1.min(e2);
            if start > end {
                match policy {
                    OverlapPolicy::Reject => {
                        return Err(WindowError::EmptyOverlap {
                            first:  first.to_owned(),
                            second: second.to_owned(),
                        });
                    }
                    OverlapPolicy::Permissive => {
                        warn!(first, second, %start, %end, "calling hours do not overlap; window is inverted");
                    }
                }
            }
            Ok((start, end))
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_zone(name: &str) -> Result<Tz, WindowError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| WindowError::InvalidTimezone(name.to_owned()))
}

fn to_utc(tz: Tz, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>, WindowError> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| WindowError::NonexistentLocalTime {
            zone: tz.name().to_owned(),
            time,
        })
}
