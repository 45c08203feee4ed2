use chrono::NaiveTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Why a calling window could not be computed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("no timezones to build a window from")]
    NoTimezones,

    #[error("unknown timezone {0:?}")]
    InvalidTimezone(String),

    #[error("local time {time} does not exist in {zone} on the reference date")]
    NonexistentLocalTime { zone: String, time: NaiveTime },

    #[error("calling hours in {first} and {second} do not overlap")]
    EmptyOverlap { first: String, second: String },
}

/// Why a phone number could not be mapped to timezones.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LocateError {
    #[error("invalid phone number {0}")]
    InvalidNumberFormat(String),

    #[error("no timezone known for {0}")]
    UnresolvedTimezone(String),
}
