//! Line classifier
//!
//! Decides whether a source line opens a new date group or carries note text.
//!
//! # Accepted date notations (day first)
//! - `15/03/2025`, `15-03-2025`, `15.03.2025`
//! - `15/3/25` (two-digit years: `00-69` are 20xx, `70-99` are 19xx)
//! - `2025-03-15` (ISO)
//! - any of the above followed by a parenthesized note: `15/03/2025 (samedi)`

use once_cell::sync::Lazy;
use regex::Regex;

use super::date::NoteDate;

/// Trailing `( ... )` annotation, usually a weekday
static PAREN_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^()]*\)\s*$").expect("valid regex"));

static DAY_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{2}|\d{4})$").expect("valid regex")
});

static ISO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("valid regex"));

/// Numeric shape that looks like a date even when it is not a valid one
static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}$").expect("valid regex"));

/// Result of classifying one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// The line is a date marker opening a new group
    DateMarker(NoteDate),
    /// The line is note text; `anomaly` is set when it looked like a date
    /// but did not parse as one
    Content { anomaly: bool },
}

impl LineClass {
    pub fn is_date(&self) -> bool {
        matches!(self, LineClass::DateMarker(_))
    }

    pub fn is_anomaly(&self) -> bool {
        matches!(self, LineClass::Content { anomaly: true })
    }
}

/// Classify a trimmed, non-empty line
pub fn classify_line(line: &str) -> LineClass {
    let candidate = strip_paren_suffix(line.trim());

    if let Some(date) = parse_lenient_date(candidate) {
        return LineClass::DateMarker(date);
    }

    LineClass::Content {
        anomaly: DATE_SHAPE.is_match(candidate),
    }
}

/// Remove one trailing parenthesized annotation
pub fn strip_paren_suffix(line: &str) -> &str {
    match PAREN_SUFFIX.find(line) {
        Some(m) if m.start() > 0 => line[..m.start()].trim_end(),
        _ => line,
    }
}

/// Parse a date in any accepted notation
pub fn parse_lenient_date(s: &str) -> Option<NoteDate> {
    let s = s.trim();

    if let Some(caps) = DAY_FIRST.captures(s) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year = expand_year(&caps[3])?;
        return NoteDate::from_dmy(day, month, year);
    }

    if let Some(caps) = ISO.captures(s) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NoteDate::from_dmy(day, month, year);
    }

    None
}

fn expand_year(raw: &str) -> Option<i32> {
    let year: i32 = raw.parse().ok()?;
    match raw.len() {
        4 => Some(year),
        2 if year < 70 => Some(2000 + year),
        2 => Some(1900 + year),
        _ => None,
    }
}
