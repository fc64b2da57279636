// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/overlay.rs
//
// Paint the preview: scaled raster, shaded surround and resize handle.

use image::Rgba;

use crate::constant::{HANDLE_FILL, HANDLE_STROKE, OVERLAY_SHADE};
use crate::domain::document::raster::RasterRef;
use crate::domain::document::surface::RasterSurface;
use crate::domain::geometry::{Point, Rect, ViewportBox};
use crate::domain::overlay::OverlayModel;
use crate::domain::transform::DisplayDimensions;

/// Full repaint of one frame. `overlay` is `None` outside crop mode.
pub fn paint<S: RasterSurface + ?Sized>(
    surface: &mut S,
    raster: Option<(&RasterRef, DisplayDimensions)>,
    overlay: Option<&OverlayModel>,
) {
    surface.clear();

    let Some((raster, dims)) = raster else {
        return;
    };
    surface.draw_scaled(raster, dims.width, dims.height);

    if let Some(overlay) = overlay {
        draw_shade(surface, overlay.rect(), overlay.viewport());
        draw_handle(surface, overlay.handle_rect());
    }
}

/// The four bands of the viewport outside `selection`.
pub fn shade_regions(selection: Rect, viewport: ViewportBox) -> Vec<Rect> {
    let bounds = viewport.bounds();
    let mut regions = Vec::with_capacity(4);

    // Top
    if selection.y > 0.0 {
        regions.push(Rect::new(0.0, 0.0, bounds.width, selection.y));
    }

    // Bottom
    if selection.bottom() < bounds.height {
        regions.push(Rect::new(
            0.0,
            selection.bottom(),
            bounds.width,
            bounds.height - selection.bottom(),
        ));
    }

    // Left
    if selection.x > 0.0 {
        regions.push(Rect::new(0.0, selection.y, selection.x, selection.height));
    }

    // Right
    if selection.right() < bounds.width {
        regions.push(Rect::new(
            selection.right(),
            selection.y,
            bounds.width - selection.right(),
            selection.height,
        ));
    }

    regions
}

fn draw_shade<S: RasterSurface + ?Sized>(surface: &mut S, selection: Rect, viewport: ViewportBox) {
    for region in shade_regions(selection, viewport) {
        surface.fill_quad(region, Rgba(OVERLAY_SHADE));
    }
}

fn draw_handle<S: RasterSurface + ?Sized>(surface: &mut S, handle: Rect) {
    surface.fill_quad(handle, Rgba(HANDLE_FILL));
    surface.stroke_quad(handle, Rgba(HANDLE_STROKE));
}

/// Whether any shade band covers `p`.
pub fn is_shaded(p: Point, selection: Rect, viewport: ViewportBox) -> bool {
    shade_regions(selection, viewport).iter().any(|r| {
        p.x >= r.x && p.x < r.right() && p.y >= r.y && p.y < r.bottom()
    })
}
