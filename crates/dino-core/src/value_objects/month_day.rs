//! Month/day pair for a recurring yearly date (birthdays)

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::fmt;

use crate::error::DomainError;

/// Non-leap year used to validate month/day combinations.
///
/// February is capped at 28 days, so `02/29` is never accepted.
pub const REFERENCE_YEAR: i32 = 2001;

/// A calendar day without a year, valid in a non-leap year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Create a month/day pair, validating it against the reference year
    pub fn new(month: u32, day: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidBirthday(format!(
                "month {month} is out of range"
            )));
        }
        if !(1..=31).contains(&day) {
            return Err(DomainError::InvalidBirthday(format!(
                "day {day} is out of range"
            )));
        }
        if NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day).is_none() {
            return Err(DomainError::InvalidBirthday(format!(
                "{month:02}/{day:02} is not a calendar date"
            )));
        }
        Ok(Self { month, day })
    }

    /// Parse `MM/DD` text. Single-digit parts such as `3/5` are accepted.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let mut parts = text.trim().split('/');
        let (Some(month), Some(day), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(DomainError::InvalidBirthday(format!(
                "expected MM/DD, got {text:?}"
            )));
        };

        let month = parse_part(month, text)?;
        let day = parse_part(day, text)?;
        Self::new(month, day)
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The date this month/day falls on in `year`
    pub fn in_year(&self, year: i32) -> NaiveDate {
        // Validation against a non-leap year guarantees the date exists in every year
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .or_else(|| NaiveDate::from_ymd_opt(year, self.month, 28))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Next occurrence on or after the reference instant's calendar day.
    ///
    /// A date earlier than the reference day rolls over to the following year;
    /// a date equal to the reference day stays in the current year.
    pub fn next_occurrence(&self, reference: NaiveDateTime) -> NaiveDate {
        let today = reference.date();
        let this_year = self.in_year(today.year());
        if this_year < today {
            self.in_year(today.year() + 1)
        } else {
            this_year
        }
    }

    /// Check whether a date falls on this month/day
    pub fn matches(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }
}

fn parse_part(part: &str, text: &str) -> Result<u32, DomainError> {
    let part = part.trim();
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvalidBirthday(format!(
            "expected MM/DD, got {text:?}"
        )));
    }
    part.parse::<u32>()
        .map_err(|_| DomainError::InvalidBirthday(format!("expected MM/DD, got {text:?}")))
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.day)
    }
}

impl std::str::FromStr for MonthDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MonthDay::parse(s)
    }
}
