//! `cw-schedule`: calling windows, timezone lookup, call queue, and CSV loading.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`window`]     | `CallWindow`, `resolve_window`, `local_window`            |
//! | [`locator`]    | `TimezoneLocator` trait, `PrefixTable`, `normalize_number`|
//! | [`loader`]     | `load_numbers_csv`, `load_numbers_reader`                 |
//! | [`ingest`]     | `ingest`, `Ingested`, `DroppedNumber`, `DropReason`       |
//! | [`call_queue`] | `CallQueue` (`VecDeque<CallWindow>`)                      |
//! | [`rollover`]   | `RolloverPolicy` trait, `SingleShot`, `CatchUp`           |
//! | [`error`]      | `ScheduleError`, `WindowError`, `LocateError`             |
//!
//! # Pipeline (summary)
//!
//! ```text
//! numbers.csv ──load──▶ Vec<String>
//!             ──locate──▶ ["America/New_York", …]
//!             ──resolve──▶ CallWindow { start, end }   (UTC)
//!             ──ingest──▶ CallQueue + dropped list
//! ```
//!
//! Numbers that fail to locate or resolve never reach the queue.

pub mod call_queue;
pub mod error;
pub mod ingest;
pub mod loader;
pub mod locator;
pub mod rollover;
pub mod window;


pub use call_queue::CallQueue;
pub use error::{LocateError, ScheduleError, ScheduleResult, WindowError};
pub use ingest::{DropReason, DroppedNumber, Ingested, ingest, resolve_number};
pub use loader::{load_numbers_csv, load_numbers_reader};
pub use locator::{PrefixTable, TimezoneLocator, load_prefix_table_csv, normalize_number};
pub use rollover::{CatchUp, RolloverPolicy, SingleShot};
pub use window::{CallWindow, local_window, resolve_window};
