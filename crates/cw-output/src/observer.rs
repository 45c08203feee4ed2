//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use chrono::{DateTime, TimeDelta, Utc};

use cw_schedule::CallWindow;
use cw_sim::{SimObserver, SimReport};

use crate::row::{CallEventRow, EventKind, RunSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Events buffered before a write, unless overridden.
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// A [`SimObserver`] that logs every call, requeue, and idle jump, plus the
/// final totals, to any [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Events are buffered and written in batches.  The buffer is flushed and
/// the writer finished in `on_sim_end`; when a run fails before that, call
/// [`finish`][Self::finish] to keep the events logged so far.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    buffer:     Vec<CallEventRow>,
    batch_size: usize,
    next_seq:   u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`.
    pub fn new(writer: W) -> Self {
        Self::with_batch_size(writer, DEFAULT_BATCH_SIZE)
    }

    /// Like [`new`][Self::new] with a custom batch size (at least 1).
    pub fn with_batch_size(writer: W, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            writer,
            buffer:     Vec::with_capacity(batch_size),
            batch_size,
            next_seq:   0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush buffered events and finish the writer without a summary row.
    pub fn finish(&mut self) {
        self.flush();
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn push(&mut self, kind: EventKind, window: Option<&CallWindow>, at: DateTime<Utc>, moved: TimeDelta) {
        let row = CallEventRow {
            seq:          self.next_seq,
            call_id:      window.map(|w| w.id.0),
            number:       window.map(|w| w.number.clone()).unwrap_or_default(),
            kind,
            at_unix_secs: at.timestamp(),
            waited_secs:  moved.num_seconds(),
        };
        self.next_seq += 1;
        self.buffer.push(row);
        if self.buffer.len() >= self.batch_size {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let result = self.writer.write_events(&self.buffer);
        self.buffer.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_call(&mut self, window: &CallWindow, at: DateTime<Utc>) {
        self.push(EventKind::Call, Some(window), at, TimeDelta::zero());
    }

    fn on_requeue(&mut self, window: &CallWindow, at: DateTime<Utc>, waited: TimeDelta) {
        self.push(EventKind::Requeue, Some(window), at, waited);
    }

    fn on_idle_jump(&mut self, from: DateTime<Utc>, to: DateTime<Utc>) {
        self.push(EventKind::IdleJump, None, from, to - from);
    }

    fn on_sim_end(&mut self, report: &SimReport) {
        self.flush();
        let result = self.writer.write_summary(&RunSummaryRow::from(report));
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
