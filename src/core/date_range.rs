use serde::{Deserialize, Serialize};

use super::calendar::{CalendarDay, day_span_inclusive};
use super::record::TimelineRecord;
use crate::error::{TimelineError, TimelineResult};

/// Inclusive calendar range with its precomputed day span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: CalendarDay,
    pub end_date: CalendarDay,
    pub total_days: i64,
}

impl DateRange {
    pub fn new(start_date: CalendarDay, end_date: CalendarDay) -> TimelineResult<Self> {
        if end_date < start_date {
            return Err(TimelineError::InvalidData(format!(
                "range end {end_date} precedes start {start_date}"
            )));
        }
        Ok(Self {
            start_date,
            end_date,
            total_days: day_span_inclusive(start_date, end_date),
        })
    }

    /// One-day range used when there is nothing to show.
    #[must_use]
    pub fn single_day(day: CalendarDay) -> Self {
        Self {
            start_date: day,
            end_date: day,
            total_days: 1,
        }
    }

    /// Real (unwidened) range of every record with a valid, non-inverted
    /// interval. Falls back to a one-day range at `today` when none qualify.
    #[must_use]
    pub fn from_records(records: &[TimelineRecord], today: CalendarDay) -> Self {
        let mut bounds: Option<(CalendarDay, CalendarDay)> = None;
        for (start, end) in records.iter().filter_map(parse_interval) {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(start), max.max(end)),
                None => (start, end),
            });
        }

        match bounds {
            Some((start_date, end_date)) => Self {
                start_date,
                end_date,
                total_days: day_span_inclusive(start_date, end_date),
            },
            None => Self::single_day(today),
        }
    }

    #[must_use]
    pub fn contains(self, day: CalendarDay) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    pub fn days(self) -> impl Iterator<Item = CalendarDay> {
        let count = usize::try_from(self.total_days).unwrap_or(0);
        self.start_date.enumerate(count)
    }
}

/// Parsed `(start, end)` of a record, or `None` when either token is missing,
/// malformed, or the interval is inverted.
fn parse_interval(record: &TimelineRecord) -> Option<(CalendarDay, CalendarDay)> {
    let start = CalendarDay::parse(record.start.as_deref()?).ok()?;
    let end = CalendarDay::parse(record.end.as_deref()?).ok()?;
    (end >= start).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(token: &str) -> CalendarDay {
        CalendarDay::parse(token).expect("valid token")
    }

    #[test]
    fn aggregates_min_start_and_max_end() {
        let records = vec![
            TimelineRecord::new("2024-01-03", "2024-01-04"),
            TimelineRecord::new("2024-01-01", "2024-01-02"),
            TimelineRecord::new("2024-01-06", "2024-01-10"),
        ];
        let range = DateRange::from_records(&records, day("2030-01-01"));
        assert_eq!(range.start_date, day("2024-01-01"));
        assert_eq!(range.end_date, day("2024-01-10"));
        assert_eq!(range.total_days, 10);
    }

    #[test]
    fn skips_invalid_and_inverted_records() {
        let records = vec![
            TimelineRecord::new("2024-02-10", "2024-02-09"),
            TimelineRecord::new("garbage", "2024-02-09"),
            TimelineRecord::default(),
            TimelineRecord::new("2024-03-01", "2024-03-01"),
        ];
        let range = DateRange::from_records(&records, day("2030-01-01"));
        assert_eq!(range, DateRange::single_day(day("2024-03-01")));
    }

    #[test]
    fn empty_input_anchors_on_today() {
        let today = day("2026-10-19");
        assert_eq!(DateRange::from_records(&[], today), DateRange::single_day(today));
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        assert!(DateRange::new(day("2024-01-02"), day("2024-01-01")).is_err());
        let range = DateRange::new(day("2024-01-01"), day("2024-01-03")).expect("range");
        assert!(range.contains(day("2024-01-03")));
        assert!(!range.contains(day("2024-01-04")));
        assert_eq!(range.days().count(), 3);
    }
}
