//! Text and JSON renderings of a [`SimReport`].

use serde::Serialize;

use cw_sim::SimReport;

use crate::{OutputResult, format_total_time};

/// The three-line summary:
///
/// ```text
/// Agent Call Duration (in minutes): 6
/// Agent Wait Duration (in minutes): 687
/// Total Time to Complete Calls: 0 days and 11 hours
/// ```
///
/// Waiting minutes keep any fraction (`687.5`); whole values print without
/// one.  The total adds whole waiting minutes to the calling minutes.
pub fn render_text(report: &SimReport) -> String {
    format!(
        "Agent Call Duration (in minutes): {}\n\
         Agent Wait Duration (in minutes): {}\n\
         Total Time to Complete Calls: {}",
        report.calling_minutes,
        report.waiting_minutes(),
        format_total_time(report.total_minutes()),
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report:          &'a SimReport,
    waiting_minutes: f64,
    total_minutes:   u64,
    total_time:      String,
}

/// Pretty-printed JSON: every [`SimReport`] field plus the derived minute
/// totals and the formatted total time.
pub fn render_json(report: &SimReport) -> OutputResult<String> {
    let total_minutes = report.total_minutes();
    let json = JsonReport {
        report,
        waiting_minutes: report.waiting_minutes(),
        total_minutes,
        total_time: format_total_time(total_minutes),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}
