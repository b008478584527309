use crate::core::{CalendarDay, TimelineRecord, day_span_inclusive};

use super::config::LayoutConfig;
use super::model::LayoutEntry;

const FALLBACK_ID_LABEL: &str = "item";

/// Approximate rendered label width; zero for a blank name.
#[must_use]
pub fn label_width_px(name: &str, config: LayoutConfig) -> f64 {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.chars().count() as f64 * config.label_character_px + config.label_padding_px
}

/// Days needed to cover `width_px` at the configured scale.
fn span_for_width(width_px: f64, px_per_day: f64) -> i64 {
    if width_px <= 0.0 {
        return 0;
    }
    (width_px / px_per_day).ceil() as i64
}

/// Stable key for a record: its own id, or one derived from its dates and name.
#[must_use]
pub fn resolve_item_id(record: &TimelineRecord) -> String {
    if let Some(id) = &record.id {
        return id.to_string();
    }
    let name = record.trimmed_name();
    let name = if name.is_empty() { FALLBACK_ID_LABEL } else { name };
    format!(
        "{}-{}-{}",
        record.start.as_deref().unwrap_or_default(),
        record.end.as_deref().unwrap_or_default(),
        name
    )
}

/// Builds the entry for a validated `[start, end]` record.
///
/// `config` must already be sanitized.
pub(crate) fn build_entry<'a>(
    record: &'a TimelineRecord,
    start_date: CalendarDay,
    end_date: CalendarDay,
    config: LayoutConfig,
) -> LayoutEntry<'a> {
    let px_per_day = config.px_per_day;
    let span_days = day_span_inclusive(start_date, end_date);
    let label_width_px = label_width_px(record.trimmed_name(), config);

    let min_width_span = span_for_width(config.min_item_width_px, px_per_day);
    let label_span = span_for_width(label_width_px, px_per_day);
    let overflow_cap = span_days + i64::from(config.max_overflow_days);
    // days from start through the last representable calendar day
    let calendar_cap = start_date.days_until(start_date.add_days(i64::MAX)) + 1;
    let display_span_days = span_days
        .max(min_width_span)
        .max(label_span)
        .min(overflow_cap)
        .min(calendar_cap);

    LayoutEntry {
        record,
        item_id: resolve_item_id(record),
        start_date,
        end_date,
        span_days,
        base_width_px: span_days as f64 * px_per_day,
        label_width_px,
        display_span_days,
        visual_end_date: start_date.add_days(display_span_days - 1),
        display_width_px: display_span_days as f64 * px_per_day,
        requires_tooltip: label_span > display_span_days,
    }
}
