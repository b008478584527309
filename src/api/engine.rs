use tracing::{debug, warn};

use crate::core::{CalendarDay, RecordId, TimelineRecord};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::{
    EditSession, GestureController, GestureKind, GestureSession, PointerDown, ZoomState,
    apply_date_mutation, apply_rename,
};
use crate::layout::{LayoutConfig, TimelineLayout, compute_layout_at, validate_record};

use super::engine_config::TimelineEngineConfig;
use super::view::{TimelineView, ViewInputs, build_view};

/// Host-facing timeline facade.
///
/// Owns the record set together with zoom, gesture and rename state, and
/// re-runs the layout engine on demand. Every mutating call leaves the
/// record set in its new state; layouts are never cached.
#[derive(Debug, Clone)]
pub struct TimelineEngine {
    records: Vec<TimelineRecord>,
    config: TimelineEngineConfig,
    zoom: ZoomState,
    gestures: GestureController,
    editor: EditSession,
}

impl TimelineEngine {
    pub fn new(records: Vec<TimelineRecord>, config: TimelineEngineConfig) -> TimelineResult<Self> {
        let config = config.validate()?;
        debug!(record_count = records.len(), timeframe = ?config.timeframe, "timeline engine created");
        Ok(Self {
            records,
            config,
            zoom: ZoomState::new(config.timeframe),
            gestures: GestureController::new(),
            editor: EditSession::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> TimelineEngineConfig {
        self.config
    }

    #[must_use]
    pub fn records(&self) -> &[TimelineRecord] {
        &self.records
    }

    /// Replaces the record set, e.g. after an external edit.
    pub fn set_records(&mut self, records: Vec<TimelineRecord>) {
        debug!(record_count = records.len(), "replacing timeline records");
        self.records = records;
        self.editor.retain_existing(&self.records);
    }

    #[must_use]
    pub fn into_records(self) -> Vec<TimelineRecord> {
        self.records
    }

    #[must_use]
    pub fn layout_config(&self) -> LayoutConfig {
        self.config.layout_config(self.zoom.px_per_day())
    }

    #[must_use]
    pub fn layout(&self) -> TimelineLayout<'_> {
        self.layout_at(CalendarDay::today())
    }

    #[must_use]
    pub fn layout_at(&self, today: CalendarDay) -> TimelineLayout<'_> {
        compute_layout_at(&self.records, self.layout_config(), today)
    }

    #[must_use]
    pub fn view(&self) -> TimelineView {
        self.view_at(CalendarDay::today())
    }

    /// Render-ready view with `today` used for the marker and empty range.
    #[must_use]
    pub fn view_at(&self, today: CalendarDay) -> TimelineView {
        let layout = self.layout_at(today);
        build_view(ViewInputs {
            records: &self.records,
            layout: &layout,
            zoom: self.zoom,
            gestures: &self.gestures,
            editor: &self.editor,
            today,
        })
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomState {
        self.zoom
    }

    pub fn zoom_in(&mut self) -> bool {
        let changed = self.zoom.zoom_in();
        self.after_zoom_change(changed)
    }

    pub fn zoom_out(&mut self) -> bool {
        let changed = self.zoom.zoom_out();
        self.after_zoom_change(changed)
    }

    /// Selects a timeframe by host value (`"week"`, `"two-week"`, `"month"`).
    pub fn select_timeframe(&mut self, value: &str) -> bool {
        let changed = self.zoom.select(value);
        self.after_zoom_change(changed)
    }

    fn after_zoom_change(&mut self, changed: bool) -> bool {
        if changed {
            debug!(px_per_day = self.zoom.px_per_day(), "zoom changed");
            // gesture anchors are pixels at the old scale
            self.gestures.cancel();
        }
        changed
    }

    #[must_use]
    pub fn active_gesture(&self) -> Option<&GestureSession> {
        self.gestures.active()
    }

    /// Starts a drag or resize on the record with `id`.
    ///
    /// Closes any open rename editor. Returns `Ok(false)` for presses that
    /// do not start gestures (non-primary buttons).
    pub fn begin_gesture(
        &mut self,
        id: &RecordId,
        kind: GestureKind,
        pointer: PointerDown,
    ) -> TimelineResult<bool> {
        let record = self.find_record(id)?;
        let (start, end) = validate_record(record).map_err(|reason| {
            TimelineError::InvalidData(format!(
                "record {id} is not on the timeline: {reason:?}"
            ))
        })?;

        if !self.gestures.begin(id.clone(), kind, pointer, start, end) {
            return Ok(false);
        }
        self.editor.cancel();
        Ok(true)
    }

    /// Feeds a pointer position to the active gesture.
    ///
    /// Returns `true` when the record set changed.
    pub fn pointer_move(&mut self, pointer_id: u32, x: f64) -> bool {
        let Some(mutation) = self
            .gestures
            .pointer_move(pointer_id, x, self.zoom.px_per_day())
        else {
            return false;
        };
        match apply_date_mutation(&self.records, &mutation) {
            Some(next) => {
                self.records = next;
                true
            }
            None => false,
        }
    }

    /// Ends the active gesture on pointer-up; other pointers are ignored.
    pub fn finish_gesture(&mut self, pointer_id: Option<u32>) -> bool {
        self.gestures.finish(pointer_id).is_some()
    }

    pub fn cancel_gesture(&mut self) -> bool {
        self.gestures.cancel().is_some()
    }

    #[must_use]
    pub fn editing_id(&self) -> Option<&RecordId> {
        self.editor.editing()
    }

    pub fn begin_edit(&mut self, id: &RecordId) -> TimelineResult<()> {
        self.find_record(id)?;
        self.editor.begin(id.clone());
        Ok(())
    }

    /// Commits the draft name of the open editor.
    ///
    /// Returns `true` when the record set changed.
    pub fn commit_edit(&mut self, draft: &str) -> bool {
        let Some(rename) = self.editor.commit(draft) else {
            warn!("commit_edit called without an open editor");
            return false;
        };
        match apply_rename(&self.records, &rename) {
            Some(next) => {
                self.records = next;
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) -> bool {
        self.editor.cancel()
    }

    fn find_record(&self, id: &RecordId) -> TimelineResult<&TimelineRecord> {
        self.records
            .iter()
            .find(|record| record.id.as_ref() == Some(id))
            .ok_or_else(|| TimelineError::UnknownRecord(id.to_string()))
    }
}
