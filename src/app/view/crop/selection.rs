// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/selection.rs
//
// Drag state machine turning pointer events into overlay mutations.

use crate::app::message::{CursorHint, PointerEvent, PointerKind, PointerOutcome, Repaint};
use crate::domain::geometry::{Point, Rect};
use crate::domain::overlay::OverlayModel;

/// The gesture currently in flight, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Moving {
        /// Pointer position relative to the overlay origin at grab time.
        grab_offset: Point,
    },
    Resizing {
        anchor: Point,
        start_rect: Rect,
    },
}

/// At most one gesture per session; the state itself enforces that.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Start a gesture. The resize handle sits inside the overlay's corner,
    /// so it is tested first and wins.
    pub fn start_drag(&mut self, p: Point, overlay: &OverlayModel) {
        if overlay.is_on_resize_handle(p) {
            self.state = DragState::Resizing {
                anchor: p,
                start_rect: overlay.rect(),
            };
        } else if overlay.contains_point(p) {
            self.state = DragState::Moving {
                grab_offset: p - overlay.rect().origin(),
            };
        }
    }

    pub fn update_drag(&mut self, p: Point, overlay: &mut OverlayModel) -> Repaint {
        match self.state {
            DragState::Idle => Repaint::NotNeeded,
            DragState::Moving { grab_offset } => {
                let origin = p - grab_offset;
                overlay.move_to(origin.x, origin.y);
                Repaint::Requested
            }
            DragState::Resizing { anchor, start_rect } => {
                overlay.resize_from_anchor(start_rect.width + (p.x - anchor.x));
                Repaint::Requested
            }
        }
    }

    pub fn end_drag(&mut self) {
        self.state = DragState::Idle;
    }

    /// Feed one pointer event.
    pub fn handle(&mut self, event: PointerEvent, overlay: &mut OverlayModel) -> PointerOutcome {
        let repaint = match event.kind {
            PointerKind::Down => {
                self.start_drag(event.position, overlay);
                Repaint::NotNeeded
            }
            PointerKind::Move => self.update_drag(event.position, overlay),
            PointerKind::Up | PointerKind::Leave => {
                self.end_drag();
                Repaint::NotNeeded
            }
        };

        PointerOutcome {
            repaint,
            cursor: self.cursor_hint(event.position, overlay),
        }
    }

    pub fn cursor_hint(&self, p: Point, overlay: &OverlayModel) -> CursorHint {
        if overlay.is_on_resize_handle(p) || matches!(self.state, DragState::Resizing { .. }) {
            CursorHint::Resize
        } else if overlay.contains_point(p) {
            CursorHint::Move
        } else {
            CursorHint::Default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::ViewportBox;

    fn overlay() -> OverlayModel {
        OverlayModel::new(ViewportBox::new(300, 300), 10.0)
    }

    #[test]
    fn down_on_body_starts_move() {
        let o = overlay();
        let mut drag = DragController::default();
        drag.start_drag(Point::new(70.0, 80.0), &o);
        assert_eq!(
            drag.state(),
            DragState::Moving {
                grab_offset: Point::new(20.0, 30.0)
            }
        );
    }

    #[test]
    fn handle_wins_over_body() {
        let o = overlay();
        let mut drag = DragController::default();
        // inside the body and on the handle at once
        let p = Point::new(147.0, 147.0);
        assert!(o.contains_point(p) && o.is_on_resize_handle(p));
        drag.start_drag(p, &o);
        assert!(matches!(drag.state(), DragState::Resizing { .. }));
    }

    #[test]
    fn down_outside_stays_idle() {
        let mut o = overlay();
        let mut drag = DragController::default();
        let out = drag.handle(PointerEvent::down(10.0, 10.0), &mut o);
        assert_eq!(drag.state(), DragState::Idle);
        assert_eq!(out.cursor, CursorHint::Default);
        let moved = drag.handle(PointerEvent::moved(40.0, 40.0), &mut o);
        assert_eq!(moved.repaint, Repaint::NotNeeded);
        assert_eq!(o.rect(), Rect::new(50.0, 50.0, 100.0, 100.0));
    }

    #[test]
    fn move_drag_keeps_grab_offset() {
        let mut o = overlay();
        let mut drag = DragController::default();
        let _ = drag.handle(PointerEvent::down(60.0, 60.0), &mut o);
        let out = drag.handle(PointerEvent::moved(110.0, 90.0), &mut o);
        assert!(out.repaint.is_requested());
        assert_eq!(out.cursor, CursorHint::Move);
        assert_eq!(o.rect().origin(), Point::new(100.0, 80.0));
    }

    #[test]
    fn resize_drag_follows_horizontal_delta() {
        let mut o = overlay();
        let mut drag = DragController::default();
        let _ = drag.handle(PointerEvent::down(150.0, 150.0), &mut o);
        let out = drag.handle(PointerEvent::moved(180.0, 150.0), &mut o);
        assert_eq!(out.cursor, CursorHint::Resize);
        assert_eq!(o.rect(), Rect::new(50.0, 50.0, 130.0, 130.0));
        // vertical motion alone does not change the width
        let _ = drag.handle(PointerEvent::moved(180.0, 10.0), &mut o);
        assert_eq!(o.rect().width, 130.0);
    }

    #[test]
    fn up_and_leave_always_end_the_gesture() {
        let mut o = overlay();
        let mut drag = DragController::default();
        for end in [PointerEvent::up(0.0, 0.0), PointerEvent::leave(999.0, 999.0)] {
            let _ = drag.handle(PointerEvent::down(100.0, 100.0), &mut o);
            assert!(drag.is_dragging());
            let _ = drag.handle(end, &mut o);
            assert_eq!(drag.state(), DragState::Idle);
        }
    }

    #[test]
    fn resize_cursor_persists_while_resizing() {
        let mut o = overlay();
        let mut drag = DragController::default();
        let _ = drag.handle(PointerEvent::down(150.0, 150.0), &mut o);
        let out = drag.handle(PointerEvent::moved(20.0, 20.0), &mut o);
        assert_eq!(out.cursor, CursorHint::Resize);
        assert_eq!(o.rect().width, 10.0);
    }
}
