/// Pointer travel (in px) below which a press-and-release still counts as a click.
pub const CLICK_SLOP_PX: f64 = 5.0;

/// Which input started a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Pointer,
    Touch(i32),
}

/// A single touch point as reported by a touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: i32,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub source: DragSource,
    /// Pointer position minus the translation at drag start.
    pub start_x: f64,
    pub start_y: f64,
    origin_x: f64,
    origin_y: f64,
    travel: f64,
}

impl DragSession {
    fn new(source: DragSource, x: f64, y: f64, translate: (f64, f64)) -> Self {
        Self {
            source,
            start_x: x - translate.0,
            start_y: y - translate.1,
            origin_x: x,
            origin_y: y,
            travel: 0.0,
        }
    }

    /// New translation for a pointer at `(x, y)`.
    fn follow(&mut self, x: f64, y: f64) -> (f64, f64) {
        let dx = (x - self.origin_x).abs();
        let dy = (y - self.origin_y).abs();
        self.travel = self.travel.max(dx.max(dy));
        (x - self.start_x, y - self.start_y)
    }

    /// Whether the session moved far enough that the trailing click should be swallowed.
    pub fn was_drag(&self) -> bool {
        self.travel >= CLICK_SLOP_PX
    }
}

/// Idle/Dragging state machine for single-pointer panning.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn cursor(&self) -> &'static str {
        if self.is_dragging() { "grabbing" } else { "grab" }
    }

    /// Start a session from a mouse/pen press. Ignored while a session is active.
    pub fn pointer_down(&mut self, x: f64, y: f64, translate: (f64, f64)) -> bool {
        if self.is_dragging() {
            return false;
        }
        *self = Self::Dragging(DragSession::new(DragSource::Pointer, x, y, translate));
        true
    }

    /// Start a session from a touch-start. Only a lone touch starts a drag; more than one
    /// active touch point, or a touch arriving during an active session, is ignored.
    pub fn touch_start(&mut self, touches: &[TouchPoint], translate: (f64, f64)) -> bool {
        if self.is_dragging() {
            return false;
        }
        let [touch] = touches else {
            return false;
        };
        *self = Self::Dragging(DragSession::new(
            DragSource::Touch(touch.id),
            touch.x,
            touch.y,
            translate,
        ));
        true
    }

    /// Translation for a pointer move, or `None` if no pointer session is active.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        match self {
            Self::Dragging(session) if session.source == DragSource::Pointer => {
                Some(session.follow(x, y))
            }
            _ => None,
        }
    }

    /// Translation for a touch move, read from the tracked touch only.
    pub fn touch_move(&mut self, touches: &[TouchPoint]) -> Option<(f64, f64)> {
        let Self::Dragging(session) = self else {
            return None;
        };
        let DragSource::Touch(id) = session.source else {
            return None;
        };
        let touch = touches.iter().find(|t| t.id == id)?;
        Some(session.follow(touch.x, touch.y))
    }

    /// End the session. Returns the finished session, if any.
    pub fn end(&mut self) -> Option<DragSession> {
        match std::mem::take(self) {
            Self::Dragging(session) => Some(session),
            Self::Idle => None,
        }
    }

    /// End a touch session once its tracked touch is no longer among `remaining`.
    pub fn touch_end(&mut self, remaining: &[TouchPoint]) -> Option<DragSession> {
        let source = match self {
            Self::Dragging(session) => session.source,
            Self::Idle => return None,
        };
        match source {
            DragSource::Touch(id) if !remaining.iter().any(|t| t.id == id) => self.end(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DragSource, DragState, TouchPoint};

    fn touch(id: i32, x: f64, y: f64) -> TouchPoint {
        TouchPoint { id, x, y }
    }

    #[test]
    fn pointer_drag_offsets_translation_by_delta() {
        let mut drag = DragState::default();
        assert!(drag.pointer_down(100.0, 100.0, (20.0, -10.0)));
        assert_eq!(drag.pointer_move(130.0, 90.0), Some((50.0, -20.0)));
        assert_eq!(drag.pointer_move(140.0, 125.0), Some((60.0, 15.0)));
        let session = drag.end().unwrap();
        assert!(session.was_drag());
        assert!(!drag.is_dragging());
    }

    #[test]
    fn cursor_tracks_state() {
        let mut drag = DragState::default();
        assert_eq!(drag.cursor(), "grab");
        drag.pointer_down(0.0, 0.0, (0.0, 0.0));
        assert_eq!(drag.cursor(), "grabbing");
        drag.end();
        assert_eq!(drag.cursor(), "grab");
    }

    #[test]
    fn second_pointer_down_does_not_restart_session() {
        let mut drag = DragState::default();
        drag.pointer_down(10.0, 10.0, (0.0, 0.0));
        assert!(!drag.pointer_down(500.0, 500.0, (0.0, 0.0)));
        assert_eq!(drag.pointer_move(15.0, 10.0), Some((5.0, 0.0)));
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut drag = DragState::default();
        assert_eq!(drag.pointer_move(10.0, 10.0), None);
        assert_eq!(drag.touch_move(&[touch(0, 1.0, 1.0)]), None);
        assert!(drag.end().is_none());
    }

    #[test]
    fn multi_touch_start_never_begins_session() {
        let mut drag = DragState::default();
        assert!(!drag.touch_start(&[touch(0, 1.0, 1.0), touch(1, 5.0, 5.0)], (0.0, 0.0)));
        assert!(!drag.is_dragging());
        assert!(!drag.touch_start(&[], (0.0, 0.0)));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn second_touch_is_ignored_during_touch_drag() {
        let mut drag = DragState::default();
        assert!(drag.touch_start(&[touch(7, 50.0, 50.0)], (0.0, 0.0)));
        assert!(!drag.touch_start(&[touch(7, 50.0, 50.0), touch(8, 300.0, 300.0)], (0.0, 0.0)));

        let moved = drag.touch_move(&[touch(8, 900.0, 900.0), touch(7, 60.0, 45.0)]);
        assert_eq!(moved, Some((10.0, -5.0)));
        assert_eq!(drag.touch_move(&[touch(8, 0.0, 0.0)]), None);

        // Lifting the second finger keeps the session alive.
        assert!(drag.touch_end(&[touch(7, 60.0, 45.0)]).is_none());
        assert!(drag.is_dragging());
        let session = drag.touch_end(&[]).unwrap();
        assert_eq!(session.source, DragSource::Touch(7));
    }

    #[test]
    fn pointer_moves_do_not_drive_touch_sessions() {
        let mut drag = DragState::default();
        drag.touch_start(&[touch(1, 0.0, 0.0)], (0.0, 0.0));
        assert_eq!(drag.pointer_move(40.0, 40.0), None);
    }

    #[test]
    fn short_press_is_not_a_drag() {
        let mut drag = DragState::default();
        drag.pointer_down(100.0, 100.0, (0.0, 0.0));
        drag.pointer_move(102.0, 103.0);
        drag.pointer_move(100.0, 100.0);
        assert!(!drag.end().unwrap().was_drag());
    }
}
