// ⚠️ Engine Errors
// Typed failures for date parsing and validation

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the numerology engine.
///
/// Parsing errors (`InvalidDateFormat`) come from the engine itself; the
/// range and calendar variants come from the validation pre-check that
/// callers run before asking for a chart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumerologyError {
    #[error("invalid birth date format {input:?}: {reason}")]
    InvalidDateFormat { input: String, reason: String },

    #[error("birth date is empty")]
    EmptyBirthDate,

    #[error("month {0} is outside 1-12")]
    MonthOutOfRange(u32),

    #[error("day {0} is outside 1-31")]
    DayOutOfRange(u32),

    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    NonexistentDate { year: i32, month: u32, day: u32 },

    #[error("birth date {0} is in the future")]
    FutureDate(NaiveDate),

    #[error("birth date implies an age of {0} years (limit is 150)")]
    ImplausibleAge(i32),

    #[error("realization index {0} is outside 1-4")]
    InvalidRealizationIndex(u8),
}

impl NumerologyError {
    pub(crate) fn format(input: &str, reason: impl Into<String>) -> Self {
        NumerologyError::InvalidDateFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
