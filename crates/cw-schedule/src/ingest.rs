//! Ingestion: phone numbers → calling windows, with failures set aside.
//!
//! Every number either becomes a [`CallWindow`] or a [`DroppedNumber`].  Drops
//! are never retried and never reach the simulator; they are returned so the
//! caller can report how many numbers were skipped and why.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use cw_core::{CallId, RecordNo, SimConfig};

use crate::{CallQueue, CallWindow, LocateError, TimezoneLocator, WindowError, resolve_window};

/// Why a number was left out of the queue.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DropReason {
    #[error(transparent)]
    Locate(#[from] LocateError),

    #[error(transparent)]
    Window(#[from] WindowError),
}

/// A number that could not be turned into a calling window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroppedNumber {
    pub record: RecordNo,
    pub number: String,
    pub reason: DropReason,
}

/// Result of [`ingest`].
#[derive(Clone, Debug, Default)]
pub struct Ingested {
    /// Resolved windows in input order, with dense `CallId`s from 0.
    pub windows: Vec<CallWindow>,
    pub dropped: Vec<DroppedNumber>,
}

impl Ingested {
    /// Move the resolved windows into a [`CallQueue`], keeping the drop list.
    pub fn into_queue(self) -> (CallQueue, Vec<DroppedNumber>) {
        (CallQueue::from_windows(self.windows), self.dropped)
    }
}

/// Locate and resolve the calling window for one number.
pub fn resolve_number<L: TimezoneLocator + ?Sized>(
    number:  &str,
    locator: &L,
    config:  &SimConfig,
) -> Result<(DateTime<Utc>, DateTime<Utc>), DropReason> {
    let zones = locator.locate(number, &config.default_region)?;
    let window = resolve_window(zones.as_slice(), config.reference_date, config.hours, config.overlap)?;
    Ok(window)
}

/// Resolve every number in `numbers`, splitting successes from failures.
pub fn ingest<I, S, L>(numbers: I, locator: &L, config: &SimConfig) -> Ingested
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    L: TimezoneLocator + ?Sized,
{
    let mut out = Ingested::default();

    for (i, number) in numbers.into_iter().enumerate() {
        let number = number.as_ref();
        let record = RecordNo(i as u32);
        match resolve_number(number, locator, config) {
            Ok((start, end)) => {
                let id = CallId(out.windows.len() as u32);
                out.windows.push(CallWindow::new(id, number, start, end));
            }
            Err(reason) => {
                debug!(%record, number, %reason, "dropping number");
                out.dropped.push(DroppedNumber {
                    record,
                    number: number.to_owned(),
                    reason,
                });
            }
        }
    }

    out
}
