//! `callsim`: simulate one agent working through a list of phone numbers,
//! calling each only inside its local calling hours.
//!
//! Run with:
//!
//! ```text
//! cargo run --release -p callsim -- --input apps/callsim/data/phone_numbers.csv --start-time 21:30:00
//! ```
//!
//! The report goes to stdout; logs go to stderr (`RUST_LOG` is honoured
//! unless `--verbose` is given).  With `--output-dir` every call, requeue,
//! and idle jump is also written to an event log.

mod config;


use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cw_output::{CsvWriter, OutputWriter, SimOutputObserver, render_json, render_text};
use cw_schedule::{PrefixTable, RolloverPolicy, ingest, load_numbers_csv, load_prefix_table_csv};
use cw_sim::{NoopObserver, Sim, SimBuilder, SimReport};

use crate::config::{Args, EventFormat, RunSettings};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let settings = args.resolve()?;
    let report = execute(&settings)?;

    if settings.json {
        println!("{}", render_json(&report).context("rendering JSON report")?);
    } else {
        println!("{}", render_text(&report));
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load, resolve, and simulate according to `settings`.
pub(crate) fn execute(settings: &RunSettings) -> Result<SimReport> {
    // ── Numbers ───────────────────────────────────────────────────────────
    let numbers = load_numbers_csv(&settings.input)
        .with_context(|| format!("loading numbers from {}", settings.input.display()))?;
    info!(count = numbers.len(), input = %settings.input.display(), "numbers loaded");

    // ── Locator ───────────────────────────────────────────────────────────
    let table = match &settings.prefix_table {
        Some(path) => load_prefix_table_csv(path)
            .with_context(|| format!("loading prefix table {}", path.display()))?,
        None => PrefixTable::builtin(),
    };

    // ── Windows ───────────────────────────────────────────────────────────
    let ingested = ingest(&numbers, &table, &settings.sim);
    if !ingested.dropped.is_empty() {
        warn!(dropped = ingested.dropped.len(), "some numbers could not be scheduled");
    }

    // ── Simulate ──────────────────────────────────────────────────────────
    let mut sim = SimBuilder::new(settings.sim.clone(), settings.sim.rollover)
        .windows(ingested.windows)
        .dropped(ingested.dropped.len())
        .build()?;

    match &settings.output_dir {
        None => Ok(sim.run(&mut NoopObserver)?),
        Some(dir) => run_with_event_log(&mut sim, dir, settings.event_format),
    }
}

fn run_with_event_log<P: RolloverPolicy>(
    sim:    &mut Sim<P>,
    dir:    &Path,
    format: EventFormat,
) -> Result<SimReport> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    let context = || format!("opening event log in {}", dir.display());

    match format {
        EventFormat::Csv => run_logged(sim, CsvWriter::new(dir).with_context(context)?),
        #[cfg(feature = "sqlite")]
        EventFormat::Sqlite => {
            run_logged(sim, cw_output::SqliteWriter::new(dir).with_context(context)?)
        }
        #[cfg(feature = "parquet")]
        EventFormat::Parquet => {
            run_logged(sim, cw_output::ParquetWriter::new(dir).with_context(context)?)
        }
    }
}

fn run_logged<P: RolloverPolicy, W: OutputWriter>(sim: &mut Sim<P>, writer: W) -> Result<SimReport> {
    let mut obs = SimOutputObserver::new(writer);
    let result = sim.run(&mut obs);
    if result.is_err() {
        // Keep the events written before the failure.
        obs.finish();
    }
    if let Some(e) = obs.take_error() {
        warn!(error = %e, "event log incomplete");
    }
    Ok(result?)
}
