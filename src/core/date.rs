//! NoteDate - Calendar date of a note group
//!
//! Dates are written `DD/MM/YYYY` everywhere they leave the process:
//! in the processed-set store, in rendered entries, and in status output.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use chrono::NaiveDate;

/// Persisted and displayed form of a date
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Month heading form (e.g. `January 2025`)
const MONTH_LABEL_FORMAT: &str = "%B %Y";

/// A calendar date used as a grouping key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteDate(NaiveDate);

impl NoteDate {
    /// Build from day/month/year, `None` if the date does not exist
    pub fn from_dmy(day: u32, month: u32, year: i32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Key used in the processed-set store
    pub fn key(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }

    /// Month heading label, full month name and year
    pub fn month_label(&self) -> String {
        self.0.format(MONTH_LABEL_FORMAT).to_string()
    }
}

impl fmt::Display for NoteDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for NoteDate {
    type Err = anyhow::Error;

    /// Strict parse of the persisted `DD/MM/YYYY` form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match NaiveDate::parse_from_str(s.trim(), DATE_FORMAT) {
            Ok(d) => Ok(Self(d)),
            Err(_) => bail!("Invalid date '{}', expected DD/MM/YYYY", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_zero_padded() {
        let date = NoteDate::from_dmy(1, 2, 2025).unwrap();
        assert_eq!(date.key(), "01/02/2025");
        assert_eq!(date.to_string(), "01/02/2025");
    }

    #[test]
    fn test_month_label() {
        let date = NoteDate::from_dmy(15, 3, 2025).unwrap();
        assert_eq!(date.month_label(), "March 2025");
    }

    #[test]
    fn test_from_str_roundtrip() {
        let date: NoteDate = "28/02/2024".parse().unwrap();
        assert_eq!(date, NoteDate::from_dmy(28, 2, 2024).unwrap());
        assert_eq!(date.key().parse::<NoteDate>().unwrap(), date);
    }

    #[test]
    fn test_from_str_rejects_other_forms() {
        assert!("2024-02-28".parse::<NoteDate>().is_err());
        assert!("31/02/2024".parse::<NoteDate>().is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = NoteDate::from_dmy(31, 12, 2024).unwrap();
        let b = NoteDate::from_dmy(1, 1, 2025).unwrap();
        assert!(a < b);
        // String keys do not sort chronologically, dates do
        assert!(a.key() > b.key());
    }

    #[test]
    fn test_invalid_dmy() {
        assert!(NoteDate::from_dmy(30, 2, 2025).is_none());
    }
}
