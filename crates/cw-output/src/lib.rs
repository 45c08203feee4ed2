//! `cw-output`: report rendering and call event log writers.
//!
//! # Reports
//!
//! [`render_text`] produces the three-line summary printed by `callsim`;
//! [`render_json`] the same totals as pretty JSON.  [`format_total_time`]
//! turns a minute count into `"{d} days and {h} hours"`.
//!
//! # Event log
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                                      |
//! |-----------|-------------|----------------------------------------------------|
//! | *(none)*  | CSV         | `call_events.csv`, `run_summary.csv`               |
//! | `sqlite`  | SQLite      | `output.db`                                        |
//! | `parquet` | Parquet     | `call_events.parquet`, `run_summary.parquet`       |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `cw_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cw_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod format;
pub mod observer;
pub mod report;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use format::format_total_time;
pub use observer::SimOutputObserver;
pub use report::{render_json, render_text};
pub use row::{CallEventRow, EventKind, RunSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use self::parquet::ParquetWriter;
