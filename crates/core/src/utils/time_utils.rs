use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use chrono_tz::Tz;

use crate::errors::{Error, Result, ValidationError};

/// Default ledger timezone. Month boundaries for recurring materialization
/// follow the household's local calendar, not UTC.
pub const DEFAULT_LEDGER_TZ: Tz = chrono_tz::Asia::Tokyo;

/// Date format used for expense dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar month, the `YYYY-MM` key expenses and cached summaries are
/// bucketed by.
///
/// Ordering is chronological, which for four-digit years is the same as the
/// lexical ordering of the formatted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Parses a strict `YYYY-MM` key.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Invalid month '{}', expected YYYY-MM",
                value
            )))
        };
        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !digits(year) || !digits(month) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // year and month are range-checked on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Number of the last day in this month (28-31).
    pub fn last_day(&self) -> u32 {
        self.shift_months(1).first_day().pred_opt().map_or(28, |d| d.day())
    }

    /// The date in this month for `day`, clamped to the month's last day.
    pub fn clamped_date(&self, day: u32) -> NaiveDate {
        let day = day.clamp(1, self.last_day());
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or_else(|| self.first_day())
    }

    /// Moves by `delta` months, negative values go back in time.
    pub fn shift_months(&self, delta: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn previous(&self) -> Self {
        self.shift_months(-1)
    }

    pub fn previous_year(&self) -> Self {
        self.shift_months(-12)
    }

    /// `count` consecutive months ending at (and including) this one, oldest
    /// first.
    pub fn trailing(&self, count: u32) -> Vec<Self> {
        (0..count as i32)
            .rev()
            .map(|back| self.shift_months(-back))
            .collect()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Month key (`YYYY-MM`) of a `YYYY-MM-DD` date string, without parsing the
/// day.
pub fn month_key(date: &str) -> Option<&str> {
    date.get(..7)
}

/// Parses an expense date in strict `YYYY-MM-DD` form.
///
/// chrono alone accepts unpadded fields, signs and leading blanks, so the
/// shape is checked first: month keys are taken from the first seven bytes.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Invalid date '{}', expected YYYY-MM-DD",
            value
        ))));
    }
    Ok(NaiveDate::parse_from_str(value, DATE_FORMAT)?)
}

/// Today's date in the given timezone.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Timestamp string used for `createdAt`/`updatedAt` fields.
pub fn timestamp_now() -> String {
    format_timestamp(Utc::now())
}

pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}
