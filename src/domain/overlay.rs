// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/overlay.rs
//
// Selection overlay state and the invariants enforced on every mutation.

use crate::constant::{
    DEFAULT_ASPECT_RATIO, DEFAULT_OVERLAY_WIDTH, DEFAULT_OVERLAY_X, DEFAULT_OVERLAY_Y,
    HANDLE_PAINT_INSET, MIN_OVERLAY_WIDTH,
};

use super::error::{CropError, CropResult};
use super::geometry::{Point, Rect, ViewportBox};

/// The live crop selection, in display space.
///
/// The rectangle always lies inside the viewport and, after a resize, keeps
/// `height == width * aspect_ratio`. The only exception is the corner where
/// both the right and bottom clamps fire: height wins and width is derived
/// back from it, so the ratio holds only up to floating point rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayModel {
    rect: Rect,
    aspect_ratio: f64,
    handle_size: f64,
    viewport: ViewportBox,
}

impl OverlayModel {
    /// Overlay at the default position, normalised into `viewport`.
    pub fn new(viewport: ViewportBox, handle_size: f64) -> Self {
        let mut overlay = Self {
            rect: Rect::new(
                DEFAULT_OVERLAY_X,
                DEFAULT_OVERLAY_Y,
                DEFAULT_OVERLAY_WIDTH,
                DEFAULT_OVERLAY_WIDTH * DEFAULT_ASPECT_RATIO,
            ),
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            handle_size,
            viewport,
        };
        overlay.fit_into_viewport();
        overlay
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn handle_size(&self) -> f64 {
        self.handle_size
    }

    pub fn viewport(&self) -> ViewportBox {
        self.viewport
    }

    /// Lock the overlay to `ratio` (height / width).
    ///
    /// Height becomes `floor(width * ratio)`. If the taller rectangle no
    /// longer fits, it is pushed back inside the viewport.
    pub fn set_aspect_ratio(&mut self, ratio: f64) -> CropResult<()> {
        if !(ratio.is_finite() && ratio > 0.0) {
            log::warn!("Rejected aspect ratio {ratio}");
            return Err(CropError::invalid(format!(
                "aspect ratio must be positive, got {ratio}"
            )));
        }

        self.aspect_ratio = ratio;
        self.rect.height = (self.rect.width * ratio).floor();
        self.fit_into_viewport();
        Ok(())
    }

    /// Move the overlay origin, clamping each axis into
    /// `[0, viewport - size]`. Never changes the size.
    pub fn move_to(&mut self, x: f64, y: f64) {
        let max_x = (self.viewport.width_f() - self.rect.width).max(0.0);
        let max_y = (self.viewport.height_f() - self.rect.height).max(0.0);

        self.rect.x = x.clamp(0.0, max_x);
        self.rect.y = y.clamp(0.0, max_y);
    }

    /// Resize from the top-left anchor; `new_width` drives, height follows
    /// the aspect ratio.
    pub fn resize_from_anchor(&mut self, new_width: f64) {
        let vw = self.viewport.width_f();
        let vh = self.viewport.height_f();

        let mut width = new_width.max(MIN_OVERLAY_WIDTH);
        if self.rect.x + width > vw {
            width = vw - self.rect.x;
        }

        let mut height = width * self.aspect_ratio;
        if self.rect.y + height > vh {
            height = vh - self.rect.y;
            width = height / self.aspect_ratio;
        }

        // A floored height can back-derive a width a hair under the minimum.
        if width < MIN_OVERLAY_WIDTH {
            width = MIN_OVERLAY_WIDTH;
        }

        self.rect.width = width;
        self.rect.height = height;
    }

    /// Strictly inside the overlay body.
    pub fn contains_point(&self, p: Point) -> bool {
        self.rect.contains_strict(p)
    }

    /// Inside the resize hit zone: `handle_size` in every direction around
    /// the bottom-right corner, so it reaches past the painted handle.
    pub fn is_on_resize_handle(&self, p: Point) -> bool {
        self.handle_hit_zone().contains_strict(p)
    }

    pub fn handle_hit_zone(&self) -> Rect {
        Rect::centered(self.rect.bottom_right(), self.handle_size)
    }

    /// Where the resize handle is painted.
    pub fn handle_rect(&self) -> Rect {
        Rect::new(
            self.rect.right() - HANDLE_PAINT_INSET,
            self.rect.bottom() - HANDLE_PAINT_INSET,
            self.handle_size,
            self.handle_size,
        )
    }

    fn fit_into_viewport(&mut self) {
        let bounds = self.viewport.bounds();
        if self.rect.right() <= bounds.width && self.rect.bottom() <= bounds.height {
            return;
        }

        self.move_to(self.rect.x, self.rect.y);
        if self.rect.right() > bounds.width || self.rect.bottom() > bounds.height {
            self.resize_from_anchor(self.rect.width);
        }
    }
}
