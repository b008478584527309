use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{CalendarDay, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GestureKind {
    /// Shift both days by the same delta.
    Move,
    /// Move the start day; never past the current end.
    ResizeStart,
    /// Move the end day; never before the current start.
    ResizeEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

/// Pointer-down data needed to open a gesture session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerDown {
    pub pointer_id: u32,
    pub button: PointerButton,
    pub x: f64,
}

impl PointerDown {
    #[must_use]
    pub fn primary(pointer_id: u32, x: f64) -> Self {
        Self {
            pointer_id,
            button: PointerButton::Primary,
            x,
        }
    }
}

/// New dates for one record, to be applied upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateMutation {
    pub id: RecordId,
    pub start: CalendarDay,
    pub end: CalendarDay,
}

/// State of one in-flight drag or resize.
///
/// Sessions are created on pointer-down and dropped on pointer-up or
/// cancel; the anchor dates never change while the session lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureSession {
    id: RecordId,
    kind: GestureKind,
    pointer_id: u32,
    anchor_x: f64,
    anchor_start: CalendarDay,
    anchor_end: CalendarDay,
    last_delta_days: i64,
    last_start: CalendarDay,
    last_end: CalendarDay,
}

impl GestureSession {
    #[must_use]
    pub fn new(
        id: RecordId,
        kind: GestureKind,
        pointer: PointerDown,
        start: CalendarDay,
        end: CalendarDay,
    ) -> Self {
        Self {
            id,
            kind,
            pointer_id: pointer.pointer_id,
            anchor_x: pointer.x,
            anchor_start: start,
            anchor_end: end,
            last_delta_days: 0,
            last_start: start,
            last_end: end,
        }
    }

    #[must_use]
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    #[must_use]
    pub fn pointer_id(&self) -> u32 {
        self.pointer_id
    }

    /// Most recently emitted `(start, end)`.
    #[must_use]
    pub fn current_dates(&self) -> (CalendarDay, CalendarDay) {
        (self.last_start, self.last_end)
    }

    /// Advances the session to pointer position `x`.
    ///
    /// Emits a mutation only when the whole-day delta changes. Events from
    /// another pointer and non-positive scales are ignored.
    pub fn pointer_move(&mut self, pointer_id: u32, x: f64, px_per_day: f64) -> Option<DateMutation> {
        if pointer_id != self.pointer_id || !x.is_finite() {
            return None;
        }
        let delta_days = delta_days(x - self.anchor_x, px_per_day)?;
        if delta_days == self.last_delta_days {
            return None;
        }

        let (start, end) = match self.kind {
            GestureKind::Move => (
                self.anchor_start.add_days(delta_days),
                self.anchor_end.add_days(delta_days),
            ),
            GestureKind::ResizeStart => {
                let candidate = self.anchor_start.add_days(delta_days);
                (candidate.min(self.last_end), self.last_end)
            }
            GestureKind::ResizeEnd => {
                let candidate = self.anchor_end.add_days(delta_days);
                (self.last_start, candidate.max(self.last_start))
            }
        };

        self.last_delta_days = delta_days;
        self.last_start = start;
        self.last_end = end;
        trace!(id = %self.id, kind = ?self.kind, delta_days, %start, %end, "gesture moved");

        Some(DateMutation {
            id: self.id.clone(),
            start,
            end,
        })
    }
}

/// Pixel delta to whole days, rounding half-way cases towards +infinity.
fn delta_days(delta_px: f64, px_per_day: f64) -> Option<i64> {
    if !px_per_day.is_finite() || px_per_day <= 0.0 {
        return None;
    }
    let days = (delta_px / px_per_day + 0.5).floor();
    days.is_finite().then_some(days as i64)
}

/// Owner of the at-most-one active gesture session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureController {
    session: Option<GestureSession>,
}

impl GestureController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Opens a session, superseding any previous one.
    ///
    /// Only primary-button presses start gestures. Returns `false` when the
    /// press was ignored.
    pub fn begin(
        &mut self,
        id: RecordId,
        kind: GestureKind,
        pointer: PointerDown,
        start: CalendarDay,
        end: CalendarDay,
    ) -> bool {
        if pointer.button != PointerButton::Primary {
            return false;
        }
        if let Some(previous) = &self.session {
            debug!(id = %previous.id, pointer_id = previous.pointer_id, "superseding gesture");
        }
        debug!(%id, ?kind, pointer_id = pointer.pointer_id, "gesture started");
        self.session = Some(GestureSession::new(id, kind, pointer, start, end));
        true
    }

    pub fn pointer_move(&mut self, pointer_id: u32, x: f64, px_per_day: f64) -> Option<DateMutation> {
        self.session
            .as_mut()
            .and_then(|session| session.pointer_move(pointer_id, x, px_per_day))
    }

    /// Ends the session on pointer-up.
    ///
    /// With `Some(pointer_id)` only a matching session is closed; `None`
    /// closes whatever is active.
    pub fn finish(&mut self, pointer_id: Option<u32>) -> Option<GestureSession> {
        if let (Some(session), Some(pointer_id)) = (&self.session, pointer_id) {
            if session.pointer_id != pointer_id {
                return None;
            }
        }
        let finished = self.session.take();
        if let Some(session) = &finished {
            debug!(id = %session.id, "gesture finished");
        }
        finished
    }

    /// Drops the session unconditionally, e.g. after a zoom change.
    pub fn cancel(&mut self) -> Option<GestureSession> {
        let cancelled = self.session.take();
        if let Some(session) = &cancelled {
            debug!(id = %session.id, "gesture cancelled");
        }
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(token: &str) -> CalendarDay {
        CalendarDay::parse(token).expect("valid token")
    }

    fn session(kind: GestureKind) -> GestureSession {
        GestureSession::new(
            RecordId::from(1),
            kind,
            PointerDown::primary(7, 100.0),
            day("2024-01-10"),
            day("2024-01-12"),
        )
    }

    #[test]
    fn move_shifts_both_days() {
        let mut move_session = session(GestureKind::Move);
        let mutation = move_session.pointer_move(7, 200.0, 50.0).expect("moved");
        assert_eq!(mutation.start, day("2024-01-12"));
        assert_eq!(mutation.end, day("2024-01-14"));

        let back = move_session.pointer_move(7, 0.0, 50.0).expect("moved back");
        assert_eq!(back.start, day("2024-01-08"));
        assert_eq!(back.end, day("2024-01-10"));
    }

    #[test]
    fn unchanged_day_delta_emits_nothing() {
        let mut move_session = session(GestureKind::Move);
        assert!(move_session.pointer_move(7, 110.0, 50.0).is_none());
        assert!(move_session.pointer_move(7, 130.0, 50.0).is_some());
        assert!(move_session.pointer_move(7, 140.0, 50.0).is_none());
    }

    #[test]
    fn half_day_rounds_up() {
        assert_eq!(delta_days(25.0, 50.0), Some(1));
        assert_eq!(delta_days(-25.0, 50.0), Some(0));
        assert_eq!(delta_days(-26.0, 50.0), Some(-1));
        assert_eq!(delta_days(10.0, 0.0), None);
    }

    #[test]
    fn resize_start_never_passes_end() {
        let mut resize = session(GestureKind::ResizeStart);
        let mutation = resize.pointer_move(7, 100.0 + 50.0 * 5.0, 50.0).expect("resized");
        assert_eq!(mutation.start, day("2024-01-12"));
        assert_eq!(mutation.end, day("2024-01-12"));

        let mutation = resize.pointer_move(7, 50.0, 50.0).expect("resized");
        assert_eq!(mutation.start, day("2024-01-09"));
        assert_eq!(mutation.end, day("2024-01-12"));
    }

    #[test]
    fn resize_end_never_precedes_start() {
        let mut resize = session(GestureKind::ResizeEnd);
        let mutation = resize.pointer_move(7, 100.0 - 50.0 * 6.0, 50.0).expect("resized");
        assert_eq!(mutation.start, day("2024-01-10"));
        assert_eq!(mutation.end, day("2024-01-10"));
    }

    #[test]
    fn other_pointers_are_ignored() {
        let mut controller = GestureController::new();
        assert!(controller.begin(
            RecordId::from(1),
            GestureKind::Move,
            PointerDown::primary(7, 0.0),
            day("2024-01-10"),
            day("2024-01-12"),
        ));
        assert!(controller.pointer_move(8, 500.0, 50.0).is_none());
        assert!(controller.finish(Some(8)).is_none());
        assert!(controller.is_active());
        assert!(controller.finish(Some(7)).is_some());
        assert!(!controller.is_active());
    }

    #[test]
    fn non_primary_press_does_not_start() {
        let mut controller = GestureController::new();
        let pointer = PointerDown {
            pointer_id: 1,
            button: PointerButton::Secondary,
            x: 0.0,
        };
        assert!(!controller.begin(
            RecordId::from(1),
            GestureKind::Move,
            pointer,
            day("2024-01-10"),
            day("2024-01-12"),
        ));
        assert!(controller.active().is_none());
    }

    #[test]
    fn new_gesture_supersedes_previous() {
        let mut controller = GestureController::new();
        controller.begin(
            RecordId::from(1),
            GestureKind::Move,
            PointerDown::primary(1, 0.0),
            day("2024-01-10"),
            day("2024-01-12"),
        );
        controller.begin(
            RecordId::from(2),
            GestureKind::ResizeEnd,
            PointerDown::primary(2, 0.0),
            day("2024-02-10"),
            day("2024-02-12"),
        );
        assert!(controller.pointer_move(1, 100.0, 50.0).is_none());
        let mutation = controller.pointer_move(2, 100.0, 50.0).expect("second session");
        assert_eq!(mutation.id, RecordId::from(2));
        assert!(controller.cancel().is_some());
        assert!(controller.cancel().is_none());
    }
}
