//! Calendar month values and their `MM-YYYY` wire encoding

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing or constructing a [`Month`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MonthError {
    #[error("invalid date format, expected MM-YYYY")]
    InvalidFormat,

    #[error("date is outside the supported calendar range")]
    OutOfRange,
}

/// A calendar month, anchored to its first day.
///
/// The wire encoding is `MM-YYYY` (month first, zero-padded). Parsing is
/// positional and does not validate that the month component lies in
/// [1, 12]; out-of-range values roll over into adjacent years the way
/// calendar arithmetic does, so `13-2025` is January 2026.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Month(NaiveDate);

impl Month {
    /// Build a month from raw year/month components, normalizing
    /// out-of-range months into adjacent years (month 0 is December of
    /// the prior year).
    pub fn from_parts(year: i32, month: i32) -> Result<Self, MonthError> {
        let months0 = i64::from(month) - 1;
        let year = i64::from(year) + months0.div_euclid(12);
        let month = months0.rem_euclid(12) as u32 + 1;

        let year = i32::try_from(year).map_err(|_| MonthError::OutOfRange)?;
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or(MonthError::OutOfRange)
    }

    /// Parse an optional `MM-YYYY` token.
    ///
    /// An empty string is "no value", not an error. Anything else must
    /// split on `-` into exactly two integer parts.
    pub fn parse(s: &str) -> Result<Option<Self>, MonthError> {
        if s.is_empty() {
            return Ok(None);
        }

        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 2 {
            return Err(MonthError::InvalidFormat);
        }

        let month: i32 = parts[0].parse().map_err(|_| MonthError::InvalidFormat)?;
        let year: i32 = parts[1].parse().map_err(|_| MonthError::InvalidFormat)?;

        Self::from_parts(year, month).map(Some)
    }

    /// Truncate a date to the month it falls in.
    pub fn from_date(date: NaiveDate) -> Self {
        // Day 1 exists in every month, so the fallback is unreachable.
        Self(date.with_day(1).unwrap_or(date))
    }

    /// The first day of the month, the form bound into storage queries.
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn number(&self) -> u32 {
        self.0.month()
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:04}", self.0.month(), self.0.year())
    }
}

impl TryFrom<String> for Month {
    type Error = MonthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)?.ok_or(MonthError::InvalidFormat)
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(s: &str) -> Month {
        Month::parse(s).unwrap().unwrap()
    }

    #[test]
    fn test_parse_format_round_trip() {
        for s in ["01-2024", "07-2025", "12-0004", "11-1999"] {
            assert_eq!(month(s).to_string(), s);
        }
    }

    #[test]
    fn test_parse_zero_pads_on_format() {
        assert_eq!(month("7-2025").to_string(), "07-2025");
    }

    #[test]
    fn test_empty_is_absent() {
        assert_eq!(Month::parse("").unwrap(), None);
    }

    #[test]
    fn test_month_thirteen_rolls_over() {
        assert_eq!(month("13-2025"), month("01-2026"));
    }

    #[test]
    fn test_month_zero_rolls_back() {
        assert_eq!(month("00-2025"), month("12-2024"));
    }

    #[test]
    fn test_large_month_rolls_multiple_years() {
        // 25 months past December 2024
        assert_eq!(month("25-2024"), month("01-2026"));
    }

    #[test]
    fn test_parse_is_positional_not_semantic() {
        // Year-first input is still accepted; the components just land in
        // the wrong slots and normalize from there.
        let m = month("2025-07");
        assert_eq!(m.year(), 7 + (2025 - 1) / 12);
    }

    #[test]
    fn test_invalid_part_counts() {
        assert_eq!(Month::parse("2025").unwrap_err(), MonthError::InvalidFormat);
        assert_eq!(
            Month::parse("07-2025-01").unwrap_err(),
            MonthError::InvalidFormat
        );
        assert_eq!(Month::parse("-").unwrap_err(), MonthError::InvalidFormat);
    }

    #[test]
    fn test_invalid_integers() {
        assert_eq!(
            Month::parse("July-2025").unwrap_err(),
            MonthError::InvalidFormat
        );
        assert_eq!(
            Month::parse("07-20x5").unwrap_err(),
            MonthError::InvalidFormat
        );
    }

    #[test]
    fn test_ordering_follows_calendar() {
        assert!(month("07-2025") < month("08-2025"));
        assert!(month("12-2024") < month("01-2025"));
    }

    #[test]
    fn test_from_date_truncates() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 19).unwrap();
        assert_eq!(Month::from_date(date), month("07-2025"));
    }

    #[test]
    fn test_serde_uses_wire_form() {
        let m = month("07-2025");
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"07-2025\"");
        let back: Month = serde_json::from_str("\"07-2025\"").unwrap();
        assert_eq!(back, m);
    }
}
