//! Lane-assignment and layout engine.
//!
//! [`compute_layout`] filters invalid records, sorts the survivors into a
//! deterministic order, sizes each one for the configured zoom and packs
//! them greedily into the minimum number of non-overlapping lanes. The
//! transform is pure: input records are borrowed, never mutated, and every
//! call recomputes from scratch.

pub mod config;
pub mod geometry;
pub mod model;
mod ordering;
mod packing;

use serde::Serialize;
use tracing::{debug, trace};

use crate::core::{CalendarDay, TimelineRecord};

pub use config::LayoutConfig;
pub use geometry::{label_width_px, resolve_item_id};
pub use model::{Lane, LayoutEntry, TimelineLayout};

use geometry::build_entry;
use ordering::compare_entries;
use packing::LanePacker;

/// Why a record was left off the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DropReason {
    MissingStart,
    MissingEnd,
    InvalidStart,
    InvalidEnd,
    EndBeforeStart,
}

/// Parses a record's interval, tagging the failure instead of raising it.
pub fn validate_record(record: &TimelineRecord) -> Result<(CalendarDay, CalendarDay), DropReason> {
    let start = record.start.as_deref().ok_or(DropReason::MissingStart)?;
    let end = record.end.as_deref().ok_or(DropReason::MissingEnd)?;
    let start = CalendarDay::parse(start).map_err(|_| DropReason::InvalidStart)?;
    let end = CalendarDay::parse(end).map_err(|_| DropReason::InvalidEnd)?;
    if end < start {
        return Err(DropReason::EndBeforeStart);
    }
    Ok((start, end))
}

/// Lays out `records`, anchoring an empty result on the current UTC day.
#[must_use]
pub fn compute_layout(records: &[TimelineRecord], config: LayoutConfig) -> TimelineLayout<'_> {
    compute_layout_at(records, config, CalendarDay::today())
}

/// Lays out `records` with an explicit "today" for the empty-result range.
///
/// Never fails: malformed records are dropped and out-of-range config
/// values fall back to their defaults.
#[must_use]
pub fn compute_layout_at(
    records: &[TimelineRecord],
    config: LayoutConfig,
    today: CalendarDay,
) -> TimelineLayout<'_> {
    let config = config.sanitized();

    let mut dropped_count = 0usize;
    let mut entries: Vec<LayoutEntry<'_>> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match validate_record(record) {
            Ok((start, end)) => Some(build_entry(record, start, end, config)),
            Err(reason) => {
                dropped_count += 1;
                trace!(index, ?reason, "dropping record from layout");
                None
            }
        })
        .collect();

    if entries.is_empty() {
        debug!(
            record_count = records.len(),
            dropped_count, "no layout entries; using single-day fallback"
        );
        return TimelineLayout::empty(today, config.px_per_day, dropped_count);
    }

    entries.sort_by(compare_entries);

    let mut start_date = entries[0].start_date;
    let mut end_date = entries[0].visual_end_date;
    let mut packer = LanePacker::with_capacity(entries.len());
    for entry in entries {
        start_date = start_date.min(entry.start_date);
        end_date = end_date.max(entry.visual_end_date);
        packer.place(entry);
    }

    let layout = TimelineLayout::from_lanes(
        packer.into_lanes(),
        start_date,
        end_date,
        config.px_per_day,
        dropped_count,
    );
    debug!(
        record_count = records.len(),
        dropped_count,
        lane_count = layout.lane_count(),
        total_days = layout.total_days,
        "computed timeline layout"
    );
    layout
}

/// Lays out a loosely-typed JSON payload.
///
/// A payload that is not an array is treated as an empty record set.
/// Array elements that are not objects count towards `dropped_count`.
#[must_use]
pub fn compute_layout_from_json(
    records: &serde_json::Value,
    options: &serde_json::Value,
    today: CalendarDay,
) -> OwnedLayout {
    let element_count = records.as_array().map_or(0, Vec::len);
    let records = TimelineRecord::collection_from_json(records);
    let config = LayoutConfig::from_json_value(options);
    let skipped_count = element_count.saturating_sub(records.len());
    OwnedLayout {
        skipped_count,
        ..OwnedLayout::new(records, config, today)
    }
}

/// Record set bundled with the parameters needed to lay it out again.
///
/// Useful when the records are produced on the fly (e.g. from JSON) and
/// the caller has nowhere else to keep them alive.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedLayout {
    records: Vec<TimelineRecord>,
    config: LayoutConfig,
    today: CalendarDay,
    skipped_count: usize,
}

impl OwnedLayout {
    #[must_use]
    pub fn new(records: Vec<TimelineRecord>, config: LayoutConfig, today: CalendarDay) -> Self {
        Self {
            records,
            config,
            today,
            skipped_count: 0,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[TimelineRecord] {
        &self.records
    }

    /// Payload elements that never became records.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped_count
    }

    #[must_use]
    pub fn layout(&self) -> TimelineLayout<'_> {
        let mut layout = compute_layout_at(&self.records, self.config, self.today);
        layout.dropped_count += self.skipped_count;
        layout
    }
}
