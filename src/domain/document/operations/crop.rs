// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/operations/crop.rs
//
// Crop export: map a display-space selection to source pixels and
// produce the encoded crop.

use crate::domain::document::format::{ExportOutput, OutputFormat};
use crate::domain::document::raster::RasterRef;
use crate::domain::document::surface::RasterSurface;
use crate::domain::error::{CropError, CropResult};
use crate::domain::geometry::{PixelRect, Rect};
use crate::domain::transform::source_floor;

/// What part of the raster an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Only the pixels under the overlay.
    Selection,
    /// The full raster, overlay ignored.
    EntireImage,
}

impl ExportMode {
    pub fn from_entire(entire_image: bool) -> Self {
        if entire_image {
            Self::EntireImage
        } else {
            Self::Selection
        }
    }
}

/// A finished export: the cropped raster and its encoding.
#[derive(Debug, Clone)]
pub struct Exported {
    pub raster: RasterRef,
    pub output: ExportOutput,
}

/// Exact source-space pixel bounds of `selection`.
///
/// Each of x, y, width and height is divided by `factor` and floored on its
/// own. The origin is clamped into the image first, then the size is shrunk
/// so the rectangle ends at the image edge at the latest.
pub fn compute_source_rect(
    selection: Rect,
    factor: f64,
    source_width: u32,
    source_height: u32,
    mode: ExportMode,
) -> PixelRect {
    if mode == ExportMode::EntireImage {
        return PixelRect::full(source_width, source_height);
    }

    let sw = i64::from(source_width);
    let sh = i64::from(source_height);

    let x = source_floor(selection.x, factor).clamp(0, sw);
    let y = source_floor(selection.y, factor).clamp(0, sh);
    let mut width = source_floor(selection.width, factor);
    let mut height = source_floor(selection.height, factor);

    if x + width > sw {
        width = sw - x;
    }
    if y + height > sh {
        height = sh - y;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rect = PixelRect::new(x as u32, y as u32, width.max(0) as u32, height.max(0) as u32);
    rect
}

/// Copy `region` out of `raster` through `surface` and encode it.
///
/// `raster` itself is never modified.
pub fn export<S: RasterSurface + ?Sized>(
    surface: &S,
    raster: Option<&RasterRef>,
    region: PixelRect,
    format: OutputFormat,
) -> CropResult<Exported> {
    let raster = raster.ok_or(CropError::NoImageLoaded)?;
    if !region.is_valid() {
        return Err(CropError::invalid(format!(
            "crop region {region:?} is empty"
        )));
    }

    let cropped = surface.copy_region(raster, region);
    let bytes = surface.encode(&cropped, format)?;
    log::debug!(
        "Exported {}x{} region at ({}, {}) as {format}",
        region.width,
        region.height,
        region.x,
        region.y
    );

    Ok(Exported {
        output: ExportOutput {
            bytes,
            format,
            width: cropped.width(),
            height: cropped.height(),
        },
        raster: cropped,
    })
}
