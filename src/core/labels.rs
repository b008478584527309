//! Human-readable calendar labels for day headers, toolbars and item meta.
//!
//! All helpers take [`CalendarDay`] so presentation shares the layout
//! engine's arithmetic base. Output is English-only.

use super::calendar::CalendarDay;

const EN_DASH_SEPARATOR: &str = " \u{2013} ";

/// Full month name, e.g. `"January"`.
#[must_use]
pub fn month_name(day: CalendarDay) -> String {
    day.to_naive_date().format("%B").to_string()
}

/// Three-letter month name, e.g. `"Jan"`.
#[must_use]
pub fn month_abbrev(day: CalendarDay) -> String {
    day.to_naive_date().format("%b").to_string()
}

/// Three-letter weekday name, e.g. `"Mon"`.
#[must_use]
pub fn weekday_abbrev(day: CalendarDay) -> String {
    day.to_naive_date().format("%a").to_string()
}

/// Day of month without padding, e.g. `"5"`.
#[must_use]
pub fn day_number(day: CalendarDay) -> String {
    day.day().to_string()
}

/// Short month-day, e.g. `"Jan 5"`.
#[must_use]
pub fn month_day(day: CalendarDay) -> String {
    format!("{} {}", month_abbrev(day), day.day())
}

/// Numeric `MM/DD/YYYY` date.
#[must_use]
pub fn numeric_date(day: CalendarDay) -> String {
    day.to_naive_date().format("%m/%d/%Y").to_string()
}

/// Toolbar heading covering the months touched by `[start, end]`.
///
/// `"January 2024"`, `"January – March 2024"` or
/// `"December 2024 – January 2025"`.
#[must_use]
pub fn month_range_label(start: CalendarDay, end: CalendarDay) -> String {
    let (start, end) = ordered(start, end);
    if start.year() == end.year() {
        if start.month() == end.month() {
            format!("{} {}", month_name(start), start.year())
        } else {
            format!(
                "{}{EN_DASH_SEPARATOR}{} {}",
                month_name(start),
                month_name(end),
                end.year()
            )
        }
    } else {
        format!(
            "{} {}{EN_DASH_SEPARATOR}{} {}",
            month_name(start),
            start.year(),
            month_name(end),
            end.year()
        )
    }
}

/// Compact summary of `[start, end]`.
///
/// `"Jan 1, 2024"`, `"Jan 1 – Jan 8, 2024"` or `"Dec 30, 2024 – Jan 2, 2025"`.
#[must_use]
pub fn range_summary(start: CalendarDay, end: CalendarDay) -> String {
    let (start, end) = ordered(start, end);
    if start == end {
        format!("{}, {}", month_day(start), start.year())
    } else if start.year() == end.year() {
        format!(
            "{}{EN_DASH_SEPARATOR}{}, {}",
            month_day(start),
            month_day(end),
            end.year()
        )
    } else {
        format!(
            "{}, {}{EN_DASH_SEPARATOR}{}, {}",
            month_day(start),
            start.year(),
            month_day(end),
            end.year()
        )
    }
}

fn ordered(a: CalendarDay, b: CalendarDay) -> (CalendarDay, CalendarDay) {
    if a <= b { (a, b) } else { (b, a) }
}
