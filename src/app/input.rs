// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/input.rs
//
// Pointer adapter: turns mouse and touch input into viewport-relative
// pointer events.

use super::message::{PointerEvent, PointerKind};
use crate::domain::geometry::Point;

/// Normalises device input for one rendering surface.
///
/// `origin` is the surface's top-left corner in client (scroll-free)
/// coordinates.
#[derive(Debug, Clone, Default)]
pub struct PointerAdapter {
    origin: Point,
    last_touch: Option<Point>,
}

impl PointerAdapter {
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            last_touch: None,
        }
    }

    /// Update after the surface moved (layout change).
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Mouse input in page coordinates with the current page scroll.
    pub fn mouse(&self, kind: PointerKind, page: Point, scroll: Point) -> PointerEvent {
        PointerEvent::new(kind, page - scroll - self.origin)
    }

    /// Touch input in client coordinates. Only the first touch counts.
    ///
    /// Touch-end carries no touches, so it is reported at the last known
    /// position. Returns `None` when there is no position to report.
    pub fn touch(&mut self, kind: PointerKind, touches: &[Point]) -> Option<PointerEvent> {
        let position = match touches.first() {
            Some(client) => {
                let p = *client - self.origin;
                self.last_touch = Some(p);
                p
            }
            None => self.last_touch?,
        };

        if matches!(kind, PointerKind::Up | PointerKind::Leave) {
            self.last_touch = None;
        }

        Some(PointerEvent::new(kind, position))
    }
}
