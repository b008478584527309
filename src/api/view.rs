use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::labels::{
    day_number, month_day, month_range_label, numeric_date, range_summary, weekday_abbrev,
};
use crate::core::{CalendarDay, DateRange, RecordId, TimelineRecord};
use crate::interaction::{
    EditSession, GestureController, GestureKind, TimeframePreset, ZoomState, display_name,
};
use crate::layout::{LayoutEntry, TimelineLayout};

const META_SEPARATOR: &str = " \u{2022} ";
const TITLE_SEPARATOR: &str = " - ";

/// Category tone derived from a record's `stage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageTone {
    Alpha,
    Beta,
    Ga,
    Deprecated,
    Neutral,
}

impl StageTone {
    #[must_use]
    pub fn from_stage(stage: Option<&str>) -> Self {
        match stage.map(|value| value.trim().to_lowercase()).as_deref() {
            Some("alpha") => Self::Alpha,
            Some("beta") => Self::Beta,
            Some("ga") => Self::Ga,
            Some("deprecated") => Self::Deprecated,
            _ => Self::Neutral,
        }
    }
}

/// One column of the day header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub day: CalendarDay,
    pub weekday: String,
    pub day_number: String,
    pub is_weekend: bool,
    pub left_px: f64,
    pub width_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayMarker {
    pub day: CalendarDay,
    pub left_px: f64,
    pub label: String,
}

/// Everything needed to draw one item box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub item_id: String,
    pub record_id: Option<RecordId>,
    pub lane: usize,
    pub label: String,
    pub start_date: CalendarDay,
    pub end_date: CalendarDay,
    pub visual_end_date: CalendarDay,
    pub left_px: f64,
    pub width_px: f64,
    pub requires_tooltip: bool,
    pub stage_tone: StageTone,
    pub meta_label: String,
    pub title: String,
    pub active_gesture: Option<GestureKind>,
    pub is_editing: bool,
}

/// Render-ready snapshot of the whole timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineView {
    pub timeframe: TimeframePreset,
    pub px_per_day: f64,
    pub zoom_label: String,
    pub can_zoom_in: bool,
    pub can_zoom_out: bool,
    pub range: DateRange,
    pub content_width_px: f64,
    pub month_label: String,
    pub range_label: String,
    pub summary_label: String,
    pub item_count: usize,
    pub dropped_count: usize,
    pub days: Vec<DayCell>,
    pub today_marker: Option<TodayMarker>,
    pub lanes: Vec<Vec<ItemView>>,
}

impl TimelineView {
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.lanes.iter().any(|lane| !lane.is_empty())
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemView> {
        self.lanes.iter().flatten()
    }

    #[must_use]
    pub fn item(&self, item_id: &str) -> Option<&ItemView> {
        self.items().find(|item| item.item_id == item_id)
    }
}

pub(crate) struct ViewInputs<'a> {
    pub records: &'a [TimelineRecord],
    pub layout: &'a TimelineLayout<'a>,
    pub zoom: ZoomState,
    pub gestures: &'a GestureController,
    pub editor: &'a EditSession,
    pub today: CalendarDay,
}

pub(crate) fn build_view(inputs: ViewInputs<'_>) -> TimelineView {
    let ViewInputs {
        records,
        layout,
        zoom,
        gestures,
        editor,
        today,
    } = inputs;
    let px_per_day = layout.px_per_day;
    let range = DateRange {
        start_date: layout.start_date,
        end_date: layout.end_date,
        total_days: layout.total_days,
    };

    let days: Vec<DayCell> = range
        .days()
        .map(|day| DayCell {
            day,
            weekday: weekday_abbrev(day),
            day_number: day_number(day),
            is_weekend: day.is_weekend(),
            left_px: layout.left_for_day(day),
            width_px: px_per_day,
        })
        .collect();

    let has_data = !layout.is_empty();
    let today_marker = (has_data && range.contains(today)).then(|| TodayMarker {
        day: today,
        left_px: layout.left_for_day(today),
        label: month_day(today),
    });

    let active = gestures
        .active()
        .map(|session| (session.id(), session.kind()));
    let lanes: Vec<Vec<ItemView>> = layout
        .lanes
        .iter()
        .map(|lane| {
            lane.iter()
                .map(|entry| item_view(entry, lane.index, layout, active, editor))
                .collect()
        })
        .collect();

    let item_count = records.len();
    TimelineView {
        timeframe: zoom.preset(),
        px_per_day,
        zoom_label: zoom.zoom_label(),
        can_zoom_in: zoom.can_zoom_in(),
        can_zoom_out: zoom.can_zoom_out(),
        range,
        content_width_px: layout.content_width_px(),
        month_label: month_range_label(range.start_date, range.end_date),
        range_label: range_summary(range.start_date, range.end_date),
        summary_label: format!(
            "{item_count} {}",
            if item_count == 1 { "item" } else { "items" }
        ),
        item_count,
        dropped_count: layout.dropped_count,
        days,
        today_marker,
        lanes,
    }
}

fn item_view(
    entry: &LayoutEntry<'_>,
    lane: usize,
    layout: &TimelineLayout<'_>,
    active: Option<(&RecordId, GestureKind)>,
    editor: &EditSession,
) -> ItemView {
    let record = entry.record;
    let label = display_name(record);
    let stage_label = record
        .stage
        .as_deref()
        .map(str::trim)
        .filter(|stage| !stage.is_empty())
        .map(str::to_uppercase);
    let release = record
        .release
        .as_deref()
        .and_then(|token| CalendarDay::parse(token).ok())
        .unwrap_or(entry.end_date);
    let release_label = numeric_date(release);

    let mut meta_parts: SmallVec<[&str; 2]> = SmallVec::new();
    if let Some(stage) = stage_label.as_deref() {
        meta_parts.push(stage);
    }
    meta_parts.push(&release_label);
    let meta_label = meta_parts.join(META_SEPARATOR);

    let mut title_parts: SmallVec<[&str; 3]> = SmallVec::new();
    title_parts.push(label);
    title_parts.extend(meta_parts.iter().copied());
    let title = title_parts.join(TITLE_SEPARATOR);

    let active_gesture = match (active, &record.id) {
        (Some((active_id, kind)), Some(id)) if active_id == id => Some(kind),
        _ => None,
    };

    ItemView {
        item_id: entry.item_id.clone(),
        record_id: record.id.clone(),
        lane,
        label: label.to_owned(),
        start_date: entry.start_date,
        end_date: entry.end_date,
        visual_end_date: entry.visual_end_date,
        left_px: entry.left_px(layout.start_date, layout.px_per_day),
        width_px: entry.display_width_px,
        requires_tooltip: entry.requires_tooltip,
        stage_tone: StageTone::from_stage(record.stage.as_deref()),
        meta_label,
        title,
        active_gesture,
        is_editing: record.id.as_ref().is_some_and(|id| editor.is_editing(id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_tone_is_case_and_space_insensitive() {
        assert_eq!(StageTone::from_stage(Some(" GA ")), StageTone::Ga);
        assert_eq!(StageTone::from_stage(Some("Beta")), StageTone::Beta);
        assert_eq!(StageTone::from_stage(Some("launch")), StageTone::Neutral);
        assert_eq!(StageTone::from_stage(None), StageTone::Neutral);
    }
}
