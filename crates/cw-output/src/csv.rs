//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `call_events.csv`
//! - `run_summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CallEventRow, OutputResult, RunSummaryRow};

/// Writes the event log to two CSV files.
pub struct CsvWriter {
    events:   Writer<File>,
    summary:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("call_events.csv"))?;
        events.write_record(["seq", "call_id", "number", "kind", "at_unix_secs", "waited_secs"])?;

        let mut summary = Writer::from_path(dir.join("run_summary.csv"))?;
        summary.write_record([
            "calls_made",
            "calling_minutes",
            "waiting_secs",
            "started_unix_secs",
            "finished_unix_secs",
            "dropped",
            "steps",
        ])?;

        Ok(Self {
            events,
            summary,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, rows: &[CallEventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.seq.to_string(),
                row.call_id.map(|id| id.to_string()).unwrap_or_default(),
                row.number.clone(),
                row.kind.as_str().to_owned(),
                row.at_unix_secs.to_string(),
                row.waited_secs.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.summary.write_record(&[
            row.calls_made.to_string(),
            row.calling_minutes.to_string(),
            row.waiting_secs.to_string(),
            row.started_unix_secs.to_string(),
            row.finished_unix_secs.to_string(),
            row.dropped.to_string(),
            row.steps.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
