//! Phone number → timezone lookup.
//!
//! The simulator only needs one capability from the outside world: given a
//! number, which IANA timezones does it belong to?  That capability is the
//! [`TimezoneLocator`] trait.  [`PrefixTable`] is the bundled implementation:
//! it normalises the number to E.164 digits and picks the longest matching
//! prefix from a table.
//!
//! # Prefix table CSV
//!
//! ```csv
//! prefix,timezones
//! 1212,America/New_York
//! 1850,America/Chicago;America/New_York
//! 44,Europe/London
//! ```
//!
//! Prefixes are E.164 digits with or without a leading `+`.  Zone names are
//! not validated here; an unknown name surfaces later as
//! [`WindowError::InvalidTimezone`][crate::WindowError::InvalidTimezone].

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{LocateError, ScheduleError, ScheduleResult};

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Maps a phone number to the ordered list of IANA timezone identifiers it
/// belongs to.
///
/// # Contract
///
/// - Must not return `Ok` with an empty list; use
///   [`LocateError::UnresolvedTimezone`] instead.
/// - `default_region` (ISO 3166 alpha-2, e.g. `"US"`) applies to numbers
///   written without an international prefix.
pub trait TimezoneLocator {
    fn locate(&self, number: &str, default_region: &str) -> Result<Vec<String>, LocateError>;
}

impl<L: TimezoneLocator + ?Sized> TimezoneLocator for &L {
    fn locate(&self, number: &str, default_region: &str) -> Result<Vec<String>, LocateError> {
        (**self).locate(number, default_region)
    }
}

// ── PrefixTable ───────────────────────────────────────────────────────────────

/// Longest-prefix table from E.164 digit prefixes to timezone lists.
#[derive(Clone, Debug, Default)]
pub struct PrefixTable {
    entries: BTreeMap<String, Vec<String>>,
    /// Length of the longest prefix, bounds the lookup loop.
    longest: usize,
}

/// Compiled-in prefixes: common NANP area codes and country codes.
///
/// Multi-zone entries list zones in alphabetical order.
const BUILTIN: &[(&str, &[&str])] = &[
    // NANP, Eastern
    ("1202", &["America/New_York"]),
    ("1212", &["America/New_York"]),
    ("1305", &["America/New_York"]),
    ("1404", &["America/New_York"]),
    ("1617", &["America/New_York"]),
    ("1646", &["America/New_York"]),
    ("1718", &["America/New_York"]),
    ("1917", &["America/New_York"]),
    ("1416", &["America/Toronto"]),
    // NANP, Central
    ("1214", &["America/Chicago"]),
    ("1312", &["America/Chicago"]),
    ("1713", &["America/Chicago"]),
    ("1773", &["America/Chicago"]),
    // NANP, Mountain
    ("1303", &["America/Denver"]),
    ("1602", &["America/Phoenix"]),
    // NANP, Pacific and beyond
    ("1206", &["America/Los_Angeles"]),
    ("1213", &["America/Los_Angeles"]),
    ("1310", &["America/Los_Angeles"]),
    ("1415", &["America/Los_Angeles"]),
    ("1604", &["America/Vancouver"]),
    ("1907", &["America/Anchorage"]),
    ("1808", &["Pacific/Honolulu"]),
    // NANP, area codes split across two zones
    ("1208", &["America/Boise", "America/Los_Angeles"]),
    ("1605", &["America/Chicago", "America/Denver"]),
    ("1850", &["America/Chicago", "America/New_York"]),
    // Europe
    ("30", &["Europe/Athens"]),
    ("31", &["Europe/Amsterdam"]),
    ("33", &["Europe/Paris"]),
    ("34", &["Europe/Madrid"]),
    ("39", &["Europe/Rome"]),
    ("44", &["Europe/London"]),
    ("46", &["Europe/Stockholm"]),
    ("48", &["Europe/Warsaw"]),
    ("49", &["Europe/Berlin"]),
    ("353", &["Europe/Dublin"]),
    ("7495", &["Europe/Moscow"]),
    // Asia / Pacific
    ("61", &["Australia/Sydney"]),
    ("618", &["Australia/Adelaide", "Australia/Perth"]),
    ("64", &["Pacific/Auckland"]),
    ("65", &["Asia/Singapore"]),
    ("81", &["Asia/Tokyo"]),
    ("82", &["Asia/Seoul"]),
    ("86", &["Asia/Shanghai"]),
    ("91", &["Asia/Kolkata"]),
    ("971", &["Asia/Dubai"]),
    // Africa / Latin America
    ("27", &["Africa/Johannesburg"]),
    ("52", &["America/Mexico_City"]),
    ("5511", &["America/Sao_Paulo"]),
];

/// Calling codes for the regions accepted as `default_region`.
const REGION_CODES: &[(&str, &str)] = &[
    ("US", "1"),
    ("CA", "1"),
    ("GB", "44"),
    ("IE", "353"),
    ("FR", "33"),
    ("DE", "49"),
    ("ES", "34"),
    ("IT", "39"),
    ("NL", "31"),
    ("AU", "61"),
    ("NZ", "64"),
    ("JP", "81"),
    ("IN", "91"),
];

impl PrefixTable {
    /// An empty table.  Every lookup fails until prefixes are inserted.
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiled-in table.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (prefix, zones) in BUILTIN {
            table.insert(*prefix, zones.iter().map(|z| (*z).to_owned()).collect());
        }
        table
    }

    /// Add or replace the zones for `prefix` (E.164 digits, leading `+`
    /// ignored).
    pub fn insert(&mut self, prefix: impl Into<String>, zones: Vec<String>) -> &mut Self {
        let prefix = prefix.into();
        let prefix = prefix.trim_start_matches('+').to_owned();
        self.longest = self.longest.max(prefix.len());
        self.entries.insert(prefix, zones);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Zones for the longest prefix of `e164_digits` present in the table.
    ///
    /// Prefixes are ASCII digits, so any other input finds nothing.
    pub fn lookup(&self, e164_digits: &str) -> Option<&[String]> {
        if !e164_digits.is_ascii() {
            return None;
        }
        let max = self.longest.min(e164_digits.len());
        (1..=max)
            .rev()
            .find_map(|len| self.entries.get(&e164_digits[..len]))
            .map(Vec::as_slice)
    }

    /// Read a table from any CSV source with a `prefix,timezones` header.
    pub fn from_csv_reader<R: Read>(reader: R) -> ScheduleResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut table = Self::new();

        for result in csv_reader.deserialize::<PrefixRecord>() {
            let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
            let prefix = row.prefix.trim_start_matches('+');
            if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ScheduleError::Parse(format!(
                    "invalid prefix {:?}: expected E.164 digits",
                    row.prefix
                )));
            }
            let zones: Vec<String> = row
                .timezones
                .split(';')
                .map(str::trim)
                .filter(|z| !z.is_empty())
                .map(str::to_owned)
                .collect();
            table.insert(prefix, zones);
        }

        Ok(table)
    }
}

impl TimezoneLocator for PrefixTable {
    fn locate(&self, number: &str, default_region: &str) -> Result<Vec<String>, LocateError> {
        let e164 = normalize_number(number, default_region)?;
        match self.lookup(&e164) {
            Some(zones) if !zones.is_empty() => Ok(zones.to_vec()),
            _ => Err(LocateError::UnresolvedTimezone(format!("+{e164}"))),
        }
    }
}

#[derive(Deserialize)]
struct PrefixRecord {
    prefix:    String,
    timezones: String,
}

/// Load a [`PrefixTable`] from a CSV file.
pub fn load_prefix_table_csv(path: &Path) -> ScheduleResult<PrefixTable> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    PrefixTable::from_csv_reader(file)
}

// ── Normalisation ─────────────────────────────────────────────────────────────

/// Normalise `raw` to E.164 digits (no `+`).
///
/// - `+…` and `00…` are international.
/// - Anything else is national to `default_region`: NANP regions accept an
///   optional leading trunk `1`, other regions drop one leading trunk `0`.
/// - Spaces, `-`, `.`, `(` and `)` are ignored; any other character fails.
pub fn normalize_number(raw: &str, default_region: &str) -> Result<String, LocateError> {
    let trimmed = raw.trim();
    let invalid = |why: String| LocateError::InvalidNumberFormat(format!("{trimmed:?}: {why}"));

    if trimmed.is_empty() {
        return Err(invalid("empty".into()));
    }

    let (international, body) = match trimmed.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let mut digits = String::with_capacity(body.len());
    for c in body.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' | '.' | '(' | ')' => {}
            other => return Err(invalid(format!("unexpected character {other:?}"))),
        }
    }

    let e164 = if international {
        digits
    } else if let Some(rest) = digits.strip_prefix("00") {
        rest.to_owned()
    } else {
        let code = region_calling_code(default_region)
            .ok_or_else(|| invalid(format!("unknown region {default_region:?}")))?;
        let national = if code == "1" {
            match digits.strip_prefix('1') {
                Some(rest) if digits.len() == 11 => rest,
                _ => digits.as_str(),
            }
        } else {
            digits.strip_prefix('0').unwrap_or(&digits)
        };
        format!("{code}{national}")
    };

    if e164.starts_with('0') {
        return Err(invalid("country code cannot start with 0".into()));
    }
    if e164.starts_with('1') && e164.len() != 11 {
        return Err(invalid("NANP numbers need 10 national digits".into()));
    }
    if !(8..=15).contains(&e164.len()) {
        return Err(invalid(format!("expected 8 to 15 digits, got {}", e164.len())));
    }
    Ok(e164)
}

fn region_calling_code(region: &str) -> Option<&'static str> {
    let region = region.trim();
    REGION_CODES
        .iter()
        .find(|(r, _)| r.eq_ignore_ascii_case(region))
        .map(|(_, code)| *code)
}
