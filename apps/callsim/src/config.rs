//! Command-line arguments and the optional TOML config file.
//!
//! Precedence, highest first: command-line flags, the `--config` file,
//! built-in defaults.
//!
//! ```toml
//! input        = "data/phone_numbers.csv"
//! prefix_table = "data/prefixes.csv"
//! output_dir   = "output/callsim"
//!
//! [sim]
//! reference_date     = "2024-01-15"
//! start_time         = "21:30:00"
//! call_duration_mins = 3
//! rollover           = "catch-up"
//! overlap            = "reject"
//! max_idle_passes    = 2
//! default_region     = "US"
//!
//! [sim.hours]
//! open  = "09:00:00"
//! close = "20:00:00"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::Deserialize;

use cw_core::{OverlapPolicy, RolloverMode, SimConfig, parse_time_of_day};

pub const DEFAULT_INPUT: &str = "phone_numbers.csv";

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate one agent dialling a list of numbers within their local calling hours", long_about = None)]
pub struct Args {
    /// Phone number CSV (first column of each row)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// UTC time the agent starts dialling (HH:MM:SS)
    #[arg(short, long)]
    pub start_time: Option<String>,

    /// Date the calling windows are computed on (YYYY-MM-DD)
    #[arg(long)]
    pub reference_date: Option<NaiveDate>,

    /// TOML config file; flags given here override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// CSV prefix table (`prefix,timezones`) replacing the built-in one
    #[arg(long)]
    pub prefix_table: Option<PathBuf>,

    /// Region for numbers without an international prefix (e.g. US, GB)
    #[arg(long)]
    pub region: Option<String>,

    /// How stale calling windows are moved onto the current day
    #[arg(long, value_enum)]
    pub rollover: Option<RolloverArg>,

    /// Drop two-timezone numbers whose calling hours never overlap
    #[arg(long)]
    pub reject_empty_overlap: bool,

    /// Fail after this many passes over the queue without a call
    #[arg(long)]
    pub max_idle_passes: Option<u32>,

    /// Write the call event log to this directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Event log format
    #[arg(long, value_enum, default_value_t = EventFormat::Csv)]
    pub event_format: EventFormat,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RolloverArg {
    SingleShot,
    CatchUp,
}

impl From<RolloverArg> for RolloverMode {
    fn from(arg: RolloverArg) -> Self {
        match arg {
            RolloverArg::SingleShot => RolloverMode::SingleShot,
            RolloverArg::CatchUp => RolloverMode::CatchUp,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum EventFormat {
    #[default]
    Csv,
    #[cfg(feature = "sqlite")]
    Sqlite,
    #[cfg(feature = "parquet")]
    Parquet,
}

// ── Config file ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub input:        Option<PathBuf>,
    pub prefix_table: Option<PathBuf>,
    pub output_dir:   Option<PathBuf>,
    pub sim:          SimConfig,
}

/// Read and parse a TOML config file.
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
}

// ── Resolved settings ─────────────────────────────────────────────────────────

/// Everything a run needs, after merging flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub input:        PathBuf,
    pub prefix_table: Option<PathBuf>,
    pub output_dir:   Option<PathBuf>,
    pub event_format: EventFormat,
    pub json:         bool,
    pub sim:          SimConfig,
}

impl Args {
    /// Merge flags over the config file (if any) and validate the result.
    pub fn resolve(&self) -> Result<RunSettings> {
        let file = match &self.config {
            Some(path) => load_file_config(path)?,
            None => FileConfig::default(),
        };

        let mut sim = file.sim;
        if let Some(start) = &self.start_time {
            sim.start_time = parse_time_of_day(start).context("invalid --start-time")?;
        }
        if let Some(date) = self.reference_date {
            sim.reference_date = date;
        }
        if let Some(region) = &self.region {
            sim.default_region = region.clone();
        }
        if let Some(rollover) = self.rollover {
            sim.rollover = rollover.into();
        }
        if self.reject_empty_overlap {
            sim.overlap = OverlapPolicy::Reject;
        }
        if let Some(passes) = self.max_idle_passes {
            sim.max_idle_passes = passes;
        }
        sim.validate().context("invalid simulation settings")?;

        Ok(RunSettings {
            input:        self
                .input
                .clone()
                .or(file.input)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            prefix_table: self.prefix_table.clone().or(file.prefix_table),
            output_dir:   self.output_dir.clone().or(file.output_dir),
            event_format: self.event_format,
            json:         self.json,
            sim,
        })
    }
}
