// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Session messages: canonical pointer events, user actions and the
// signals a session hands back to its UI surface.

use crate::domain::geometry::Point;

/// Phase of a pointer gesture, regardless of the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Leave,
}

/// Viewport-relative pointer position plus its phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub const fn new(kind: PointerKind, position: Point) -> Self {
        Self { kind, position }
    }

    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, Point::new(x, y))
    }

    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, Point::new(x, y))
    }

    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, Point::new(x, y))
    }

    pub const fn leave(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Leave, Point::new(x, y))
    }
}

/// User actions a session understands.
#[derive(Debug, Clone, PartialEq)]
pub enum CropMessage {
    Pointer(PointerEvent),
    StartCrop,
    Restore,
    SetAspectRatio(f64),
}

/// Whether the UI surface has to repaint after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repaint {
    Requested,
    NotNeeded,
}

impl Repaint {
    pub fn is_requested(self) -> bool {
        self == Self::Requested
    }
}

/// Cursor the UI should show for the current pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Move,
    Resize,
}

impl CursorHint {
    /// CSS cursor keyword.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Default => "auto",
            Self::Move => "move",
            Self::Resize => "nwse-resize",
        }
    }
}

/// Result of feeding one pointer event to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerOutcome {
    pub repaint: Repaint,
    pub cursor: CursorHint,
}
