//! Human-readable durations.

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;

/// Render a minute count as `"{days} days and {hours} hours"`.
///
/// Leftover minutes are dropped: `1500` is `"1 days and 1 hours"`, `59` is
/// `"0 days and 0 hours"`.
pub fn format_total_time(total_minutes: u64) -> String {
    let days = total_minutes / MINUTES_PER_DAY;
    let hours = (total_minutes % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
    format!("{days} days and {hours} hours")
}
