//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `call_events` and `run_summary`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{CallEventRow, OutputResult, RunSummaryRow};

/// Writes the event log to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS call_events (
                 seq          INTEGER PRIMARY KEY,
                 call_id      INTEGER,
                 number       TEXT    NOT NULL,
                 kind         TEXT    NOT NULL,
                 at_unix_secs INTEGER NOT NULL,
                 waited_secs  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS run_summary (
                 calls_made         INTEGER NOT NULL,
                 calling_minutes    INTEGER NOT NULL,
                 waiting_secs       INTEGER NOT NULL,
                 started_unix_secs  INTEGER NOT NULL,
                 finished_unix_secs INTEGER NOT NULL,
                 dropped            INTEGER NOT NULL,
                 steps              INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_events(&mut self, rows: &[CallEventRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO call_events \
                 (seq, call_id, number, kind, at_unix_secs, waited_secs) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.seq,
                    row.call_id,
                    row.number,
                    row.kind.as_str(),
                    row.at_unix_secs,
                    row.waited_secs,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO run_summary \
             (calls_made, calling_minutes, waiting_secs, started_unix_secs, \
              finished_unix_secs, dropped, steps) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                row.calls_made,
                row.calling_minutes,
                row.waiting_secs,
                row.started_unix_secs,
                row.finished_unix_secs,
                row.dropped,
                row.steps,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
