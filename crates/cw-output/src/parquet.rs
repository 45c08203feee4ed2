//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `call_events.parquet`
//! - `run_summary.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Int64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{CallEventRow, OutputResult, RunSummaryRow};

fn event_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("seq",          DataType::UInt64, false),
        Field::new("call_id",      DataType::UInt32, true),
        Field::new("number",       DataType::Utf8,   false),
        Field::new("kind",         DataType::Utf8,   false),
        Field::new("at_unix_secs", DataType::Int64,  false),
        Field::new("waited_secs",  DataType::Int64,  false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("calls_made",         DataType::UInt64, false),
        Field::new("calling_minutes",    DataType::UInt64, false),
        Field::new("waiting_secs",       DataType::Int64,  false),
        Field::new("started_unix_secs",  DataType::Int64,  false),
        Field::new("finished_unix_secs", DataType::Int64,  false),
        Field::new("dropped",            DataType::UInt64, false),
        Field::new("steps",              DataType::UInt64, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes the event log to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    events:       Option<ArrowWriter<File>>,
    summary:      Option<ArrowWriter<File>>,
    event_schema: Arc<Schema>,
    summ_schema:  Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let event_schema = event_schema();
        let summ_schema = summary_schema();

        let event_file = File::create(dir.join("call_events.parquet"))?;
        let events = ArrowWriter::try_new(
            event_file,
            Arc::clone(&event_schema),
            Some(snappy_props()),
        )?;

        let summ_file = File::create(dir.join("run_summary.parquet"))?;
        let summary = ArrowWriter::try_new(
            summ_file,
            Arc::clone(&summ_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            events: Some(events),
            summary: Some(summary),
            event_schema,
            summ_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_events(&mut self, rows: &[CallEventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.events.as_mut() else {
            return Ok(());
        };

        let mut seqs     = UInt64Builder::new();
        let mut call_ids = UInt32Builder::new();
        let mut numbers  = StringBuilder::new();
        let mut kinds    = StringBuilder::new();
        let mut ats      = Int64Builder::new();
        let mut waits    = Int64Builder::new();

        for row in rows {
            seqs.append_value(row.seq);
            call_ids.append_option(row.call_id);
            numbers.append_value(&row.number);
            kinds.append_value(row.kind.as_str());
            ats.append_value(row.at_unix_secs);
            waits.append_value(row.waited_secs);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.event_schema),
            vec![
                Arc::new(seqs.finish()),
                Arc::new(call_ids.finish()),
                Arc::new(numbers.finish()),
                Arc::new(kinds.finish()),
                Arc::new(ats.finish()),
                Arc::new(waits.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summary.as_mut() else {
            return Ok(());
        };

        let mut calls    = UInt64Builder::new();
        let mut calling  = UInt64Builder::new();
        let mut waiting  = Int64Builder::new();
        let mut started  = Int64Builder::new();
        let mut finished = Int64Builder::new();
        let mut dropped  = UInt64Builder::new();
        let mut steps    = UInt64Builder::new();

        calls.append_value(row.calls_made);
        calling.append_value(row.calling_minutes);
        waiting.append_value(row.waiting_secs);
        started.append_value(row.started_unix_secs);
        finished.append_value(row.finished_unix_secs);
        dropped.append_value(row.dropped);
        steps.append_value(row.steps);

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(calls.finish()),
                Arc::new(calling.finish()),
                Arc::new(waiting.finish()),
                Arc::new(started.finish()),
                Arc::new(finished.finish()),
                Arc::new(dropped.finish()),
                Arc::new(steps.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.events.take() {
            w.close()?;
        }
        if let Some(w) = self.summary.take() {
            w.close()?;
        }
        Ok(())
    }
}
