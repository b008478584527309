use indexmap::IndexMap;
use serde::Serialize;

use crate::core::{CalendarDay, TimelineRecord, day_span_inclusive, left_for_day};

/// A record that survived validation, with its display geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEntry<'a> {
    pub record: &'a TimelineRecord,
    pub item_id: String,
    pub start_date: CalendarDay,
    pub end_date: CalendarDay,
    /// Inclusive day span of the real interval.
    pub span_days: i64,
    /// `span_days * px_per_day`, before minimum-width and label widening.
    pub base_width_px: f64,
    pub label_width_px: f64,
    pub display_span_days: i64,
    /// Last day covered by the displayed box.
    pub visual_end_date: CalendarDay,
    pub display_width_px: f64,
    /// The label needs more room than the box shows.
    pub requires_tooltip: bool,
}

impl LayoutEntry<'_> {
    #[must_use]
    pub fn left_px(&self, origin: CalendarDay, px_per_day: f64) -> f64 {
        left_for_day(self.start_date, origin, px_per_day)
    }

    /// Whether the visual intervals share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &LayoutEntry<'_>) -> bool {
        self.start_date <= other.visual_end_date && other.start_date <= self.visual_end_date
    }
}

/// One rendering row; entries never overlap in visual time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lane<'a> {
    pub index: usize,
    pub entries: Vec<LayoutEntry<'a>>,
}

impl<'a> Lane<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LayoutEntry<'a>> {
        self.entries.iter()
    }

    #[must_use]
    pub fn visual_end(&self) -> Option<CalendarDay> {
        self.entries.last().map(|entry| entry.visual_end_date)
    }
}

/// Output of [`compute_layout`](super::compute_layout).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineLayout<'a> {
    pub lanes: Vec<Lane<'a>>,
    /// Minimum real start across laid-out records.
    pub start_date: CalendarDay,
    /// Maximum visual end across laid-out records.
    pub end_date: CalendarDay,
    pub total_days: i64,
    pub px_per_day: f64,
    /// Records excluded by the validation filter.
    pub dropped_count: usize,
    #[serde(skip)]
    pub(crate) positions: IndexMap<String, (usize, usize)>,
}

impl<'a> TimelineLayout<'a> {
    pub(crate) fn empty(today: CalendarDay, px_per_day: f64, dropped_count: usize) -> Self {
        Self {
            lanes: Vec::new(),
            start_date: today,
            end_date: today,
            total_days: 1,
            px_per_day,
            dropped_count,
            positions: IndexMap::new(),
        }
    }

    pub(crate) fn from_lanes(
        lanes: Vec<Lane<'a>>,
        start_date: CalendarDay,
        end_date: CalendarDay,
        px_per_day: f64,
        dropped_count: usize,
    ) -> Self {
        let mut positions = IndexMap::new();
        for lane in &lanes {
            for (slot, entry) in lane.entries.iter().enumerate() {
                positions
                    .entry(entry.item_id.clone())
                    .or_insert((lane.index, slot));
            }
        }

        Self {
            lanes,
            start_date,
            end_date,
            total_days: day_span_inclusive(start_date, end_date),
            px_per_day,
            dropped_count,
            positions,
        }
    }

    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.lanes.iter().map(Lane::len).sum()
    }

    /// True when no record survived validation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(Lane::is_empty)
    }

    pub fn entries(&self) -> impl Iterator<Item = &LayoutEntry<'a>> {
        self.lanes.iter().flat_map(|lane| lane.entries.iter())
    }

    /// Looks up an entry by resolved id, returning its lane index too.
    ///
    /// With duplicate ids the first entry in lane order wins.
    #[must_use]
    pub fn find(&self, item_id: &str) -> Option<(usize, &LayoutEntry<'a>)> {
        let &(lane, slot) = self.positions.get(item_id)?;
        self.lanes
            .get(lane)
            .and_then(|lane_ref| lane_ref.entries.get(slot))
            .map(|entry| (lane, entry))
    }

    #[must_use]
    pub fn left_for_day(&self, day: CalendarDay) -> f64 {
        left_for_day(day, self.start_date, self.px_per_day)
    }

    /// Full scrollable width, never below one pixel.
    #[must_use]
    pub fn content_width_px(&self) -> f64 {
        (self.total_days as f64 * self.px_per_day).max(1.0)
    }
}
