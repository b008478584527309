use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{TimelineError, TimelineResult};

/// `NaiveDate::num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Timezone-less calendar day stored as a day count from 1970-01-01.
///
/// Two tokens naming the same date always compare equal; there is no
/// wall-clock or offset component to drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDay(i32);

impl CalendarDay {
    /// Parses a canonical `YYYY-MM-DD` day token.
    ///
    /// Out-of-range components are rejected rather than rolled over, so
    /// `2024-02-30` is an error and never becomes March 1st.
    pub fn parse(token: &str) -> TimelineResult<Self> {
        let bytes = token.as_bytes();
        if bytes.len() != 10 {
            return Err(invalid_token(token, "expected YYYY-MM-DD"));
        }
        if bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(invalid_token(token, "expected hyphen separators"));
        }

        let year = parse_digits(&bytes[0..4]).ok_or_else(|| invalid_token(token, "bad year"))?;
        let month = parse_digits(&bytes[5..7]).ok_or_else(|| invalid_token(token, "bad month"))?;
        let day = parse_digits(&bytes[8..10]).ok_or_else(|| invalid_token(token, "bad day"))?;

        let date = i32::try_from(year)
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
            .ok_or_else(|| invalid_token(token, "date out of range"))?;
        Ok(Self::from_naive_date(date))
    }

    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from_naive_date)
    }

    #[must_use]
    pub fn from_naive_date(date: NaiveDate) -> Self {
        Self(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
    }

    /// Current UTC calendar date.
    #[must_use]
    pub fn today() -> Self {
        Self::from_naive_date(Utc::now().date_naive())
    }

    #[must_use]
    pub fn days_since_epoch(self) -> i32 {
        self.0
    }

    #[must_use]
    pub fn to_naive_date(self) -> NaiveDate {
        NaiveDate::from_num_days_from_ce_opt(self.0 + UNIX_EPOCH_DAYS_FROM_CE).unwrap_or_default()
    }

    /// Shifts the day by a signed offset.
    ///
    /// The result saturates at the bounds of the representable calendar.
    #[must_use]
    pub fn add_days(self, delta: i64) -> Self {
        let (min, max) = day_bounds();
        let shifted = i64::from(self.0).saturating_add(delta);
        let clamped = shifted.clamp(i64::from(min), i64::from(max));
        Self(i32::try_from(clamped).unwrap_or(self.0))
    }

    /// Signed number of days from `self` to `other`.
    #[must_use]
    pub fn days_until(self, other: Self) -> i64 {
        i64::from(other.0) - i64::from(self.0)
    }

    #[must_use]
    pub fn weekday(self) -> Weekday {
        self.to_naive_date().weekday()
    }

    #[must_use]
    pub fn is_weekend(self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.to_naive_date().year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.to_naive_date().month()
    }

    #[must_use]
    pub fn day(self) -> u32 {
        self.to_naive_date().day()
    }

    /// `count` consecutive days starting at `self`.
    pub fn enumerate(self, count: usize) -> impl Iterator<Item = CalendarDay> {
        (0..count).map(move |offset| self.add_days(offset as i64))
    }

    /// Formats the canonical zero-padded day token.
    #[must_use]
    pub fn format_token(self) -> String {
        self.to_string()
    }
}

/// Inclusive number of days covered by `[start, end]`.
///
/// A single-day interval has span 1. The result is `<= 0` when `end`
/// precedes `start`; callers guard against inverted intervals.
#[must_use]
pub fn day_span_inclusive(start: CalendarDay, end: CalendarDay) -> i64 {
    start.days_until(end) + 1
}

/// Pixel offset of `day` from the timeline origin.
#[must_use]
pub fn left_for_day(day: CalendarDay, origin: CalendarDay, px_per_day: f64) -> f64 {
    origin.days_until(day) as f64 * px_per_day
}

fn day_bounds() -> (i32, i32) {
    (
        NaiveDate::MIN.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE,
        NaiveDate::MAX.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE,
    )
}

fn parse_digits(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, byte| {
        byte.is_ascii_digit()
            .then(|| acc * 10 + u32::from(byte - b'0'))
    })
}

fn invalid_token(token: &str, reason: &'static str) -> TimelineError {
    TimelineError::InvalidDayToken {
        token: token.to_owned(),
        reason,
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.to_naive_date();
        write!(
            f,
            "{:04}-{:02}-{:02}",
            date.year(),
            date.month(),
            date.day()
        )
    }
}

impl FromStr for CalendarDay {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CalendarDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Self::parse(&token).map_err(serde::de::Error::custom)
    }
}
