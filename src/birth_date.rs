// 📅 Birth Date - Two-format parser + validation pre-check
// Accepts YYYY-MM-DD and DD/MM/YYYY, auto-detected by separator

use crate::error::NumerologyError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Oldest age a submitted birth date may imply
pub const MAX_AGE_YEARS: i32 = 150;

// ============================================================================
// DATE LAYOUT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateLayout {
    /// 1966-05-20
    YearMonthDay,
    /// 20/05/1966
    DayMonthYear,
}

impl DateLayout {
    /// Detect layout from the separator ('-' wins when both are present)
    pub fn detect(input: &str) -> Option<Self> {
        if input.contains('-') {
            Some(DateLayout::YearMonthDay)
        } else if input.contains('/') {
            Some(DateLayout::DayMonthYear)
        } else {
            None
        }
    }

    pub fn separator(&self) -> char {
        match self {
            DateLayout::YearMonthDay => '-',
            DateLayout::DayMonthYear => '/',
        }
    }
}

// ============================================================================
// BIRTH DATE
// ============================================================================

/// Calendar date as the user supplied it.
///
/// `parse` only checks shape (separator, three numeric segments). Range and
/// calendar checks live in `validate`, which callers run before the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BirthDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl BirthDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        BirthDate { year, month, day }
    }

    /// Parse `YYYY-MM-DD` or `DD/MM/YYYY` into its three components
    pub fn parse(input: &str) -> Result<Self, NumerologyError> {
        let trimmed = input.trim();

        let layout = DateLayout::detect(trimmed)
            .ok_or_else(|| NumerologyError::format(input, "expected '-' or '/' separator"))?;

        let segments: Vec<&str> = trimmed.split(layout.separator()).collect();
        if segments.len() != 3 {
            return Err(NumerologyError::format(
                input,
                format!("expected 3 segments, found {}", segments.len()),
            ));
        }

        let (year, month, day) = match layout {
            DateLayout::YearMonthDay => (segments[0], segments[1], segments[2]),
            DateLayout::DayMonthYear => (segments[2], segments[1], segments[0]),
        };

        Ok(BirthDate {
            year: parse_segment(input, year, "year")?,
            month: parse_segment(input, month, "month")?,
            day: parse_segment(input, day, "day")?,
        })
    }

    /// Full pre-check: shape, ranges, calendar validity, not in the future,
    /// age at most 150 years on `today`.
    pub fn validate(input: &str, today: NaiveDate) -> Result<Self, NumerologyError> {
        if input.trim().is_empty() {
            return Err(NumerologyError::EmptyBirthDate);
        }

        let date = BirthDate::parse(input)?;

        if !(1..=12).contains(&date.month) {
            return Err(NumerologyError::MonthOutOfRange(date.month));
        }
        if !(1..=31).contains(&date.day) {
            return Err(NumerologyError::DayOutOfRange(date.day));
        }

        let naive = date.to_naive_date().ok_or(NumerologyError::NonexistentDate {
            year: date.year,
            month: date.month,
            day: date.day,
        })?;

        if naive > today {
            return Err(NumerologyError::FutureDate(naive));
        }

        let age = date.age_on(today);
        if age > MAX_AGE_YEARS {
            return Err(NumerologyError::ImplausibleAge(age));
        }

        Ok(date)
    }

    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Has this year's anniversary (month/day) already been reached on `as_of`?
    pub fn birthday_reached(&self, as_of: NaiveDate) -> bool {
        (as_of.month(), as_of.day()) >= (self.month, self.day)
    }

    /// Whole years between the birth date and `as_of`
    pub fn age_on(&self, as_of: NaiveDate) -> i32 {
        let years = as_of.year() - self.year;
        if self.birthday_reached(as_of) {
            years
        } else {
            years - 1
        }
    }

    /// Canonical `YYYY-MM-DD` form, used as the storage key
    pub fn to_iso_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

fn parse_segment<T: FromStr>(input: &str, segment: &str, field: &str) -> Result<T, NumerologyError> {
    if segment.is_empty() || !segment.chars().all(|c| c.is_ascii_digit()) {
        return Err(NumerologyError::format(
            input,
            format!("{} segment {:?} is not numeric", field, segment),
        ));
    }

    segment
        .parse::<T>()
        .map_err(|_| NumerologyError::format(input, format!("{} segment {:?} is out of range", field, segment)))
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl FromStr for BirthDate {
    type Err = NumerologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BirthDate::parse(s)
    }
}

impl TryFrom<String> for BirthDate {
    type Error = NumerologyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BirthDate::parse(&value)
    }
}

impl From<BirthDate> for String {
    fn from(date: BirthDate) -> Self {
        date.to_iso_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_parse_iso_layout() {
        let date = BirthDate::parse("1966-05-20").unwrap();
        assert_eq!(date, BirthDate::new(1966, 5, 20));
    }

    #[test]
    fn test_parse_day_first_layout() {
        let date = BirthDate::parse("20/05/1966").unwrap();
        assert_eq!(date, BirthDate::new(1966, 5, 20));
        assert_eq!(date.to_string(), "1966-05-20");
    }

    #[test]
    fn test_parse_rejects_unknown_separator() {
        let err = BirthDate::parse("1966.05.20").unwrap_err();
        assert!(matches!(err, NumerologyError::InvalidDateFormat { .. }));
    }

    #[test]
    fn test_parse_rejects_wrong_segment_count() {
        assert!(BirthDate::parse("1966-05").is_err());
        assert!(BirthDate::parse("20/05/1966/01").is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric_segments() {
        assert!(BirthDate::parse("1966-May-20").is_err());
        assert!(BirthDate::parse("1966--20").is_err());
        assert!(BirthDate::parse("20/05/19a6").is_err());
        assert!(BirthDate::parse("1966-05-20/").is_err());
    }

    #[test]
    fn test_validate_boundaries() {
        assert_eq!(BirthDate::validate("", today()), Err(NumerologyError::EmptyBirthDate));
        assert_eq!(
            BirthDate::validate("1990-13-15", today()),
            Err(NumerologyError::MonthOutOfRange(13))
        );
        assert_eq!(
            BirthDate::validate("1990-05-32", today()),
            Err(NumerologyError::DayOutOfRange(32))
        );
        assert!(matches!(
            BirthDate::validate("1990-02-31", today()),
            Err(NumerologyError::NonexistentDate { .. })
        ));
        assert!(BirthDate::validate("2000-02-29", today()).is_ok());
        assert!(matches!(
            BirthDate::validate("1900-02-29", today()),
            Err(NumerologyError::NonexistentDate { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_future_date() {
        assert!(matches!(
            BirthDate::validate("2026-10-17", today()),
            Err(NumerologyError::FutureDate(_))
        ));
        assert!(BirthDate::validate("2026-10-16", today()).is_ok());
    }

    #[test]
    fn test_validate_rejects_implausible_age() {
        assert_eq!(
            BirthDate::validate("1870-01-01", today()),
            Err(NumerologyError::ImplausibleAge(156))
        );
        assert!(BirthDate::validate("1876-10-16", today()).is_ok());
    }

    #[test]
    fn test_validate_accepts_day_first_layout() {
        assert_eq!(
            BirthDate::validate("15/05/1990", today()).unwrap(),
            BirthDate::new(1990, 5, 15)
        );
    }

    #[test]
    fn test_age_on() {
        let date = BirthDate::new(1966, 5, 20);
        assert_eq!(date.age_on(NaiveDate::from_ymd_opt(2026, 5, 19).unwrap()), 59);
        assert_eq!(date.age_on(NaiveDate::from_ymd_opt(2026, 5, 20).unwrap()), 60);
        assert_eq!(date.age_on(today()), 60);
    }

    #[test]
    fn test_serde_uses_iso_string() {
        let date = BirthDate::new(1955, 7, 3);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"1955-07-03\"");

        let back: BirthDate = serde_json::from_str("\"03/07/1955\"").unwrap();
        assert_eq!(back, date);
    }
}
