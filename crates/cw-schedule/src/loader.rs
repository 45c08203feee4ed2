//! CSV phone number loader.
//!
//! # CSV format
//!
//! No header.  The first field of each record is the number; any further
//! fields are ignored and records may have different lengths.
//!
//! ```csv
//! +12125551234
//! +442071234567,London office
//! (415) 555-0100
//! ```
//!
//! Records whose first field is blank are skipped, so a number's position in
//! the returned `Vec` (its [`RecordNo`][cw_core::RecordNo] during ingestion)
//! counts non-blank records only.

use std::io::Read;
use std::path::Path;

use crate::ScheduleError;

/// Load phone numbers from a CSV file.
pub fn load_numbers_csv(path: &Path) -> Result<Vec<String>, ScheduleError> {
    let file = std::fs::File::open(path)
        .map_err(ScheduleError::Io)?;
    load_numbers_reader(file)
}

/// Like [`load_numbers_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`).
pub fn load_numbers_reader<R: Read>(reader: R) -> Result<Vec<String>, ScheduleError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut numbers = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        match record.get(0) {
            Some(first) if !first.is_empty() => numbers.push(first.to_owned()),
            _ => {}
        }
    }
    Ok(numbers)
}
