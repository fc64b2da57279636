// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/surface.rs
//
// Raster-surface ("canvas") collaborator and its image-rs implementation.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Pixel, Rgba, RgbaImage};

use super::format::OutputFormat;
use super::raster::RasterRef;
use crate::domain::error::{CropError, CropResult};
use crate::domain::geometry::{PixelRect, Rect, ViewportBox};

/// Everything the engine needs from a drawing surface.
///
/// The engine never touches pixel buffers itself; painting the preview,
/// copying a region out of a raster and encoding all go through here.
pub trait RasterSurface {
    /// Reset the visible surface to transparent.
    fn clear(&mut self);

    /// Draw `raster` at the origin, scaled to `dest_width`×`dest_height`.
    fn draw_scaled(&mut self, raster: &RasterRef, dest_width: u32, dest_height: u32);

    /// Blend a filled rectangle over the surface.
    fn fill_quad(&mut self, quad: Rect, color: Rgba<u8>);

    /// Blend a one pixel outline over the surface.
    fn stroke_quad(&mut self, quad: Rect, color: Rgba<u8>);

    /// Copy `region` of `raster` into a new raster. `raster` is left untouched.
    fn copy_region(&self, raster: &RasterRef, region: PixelRect) -> RasterRef;

    /// Encode `raster` in `format`.
    fn encode(&self, raster: &RasterRef, format: OutputFormat) -> CropResult<Vec<u8>>;
}

/// In-memory RGBA canvas the size of the viewport.
#[derive(Debug, Clone)]
pub struct ImageSurface {
    canvas: RgbaImage,
}

impl ImageSurface {
    pub fn new(viewport: ViewportBox) -> Self {
        Self {
            canvas: RgbaImage::new(viewport.width, viewport.height),
        }
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Pixel span covered by `quad`, clipped to the canvas.
    fn span(&self, quad: Rect) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = self.canvas.dimensions();
        let x0 = clip(quad.x.floor(), w);
        let y0 = clip(quad.y.floor(), h);
        let x1 = clip(quad.right().ceil(), w);
        let y1 = clip(quad.bottom().ceil(), h);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

impl RasterSurface for ImageSurface {
    fn clear(&mut self) {
        for pixel in self.canvas.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    fn draw_scaled(&mut self, raster: &RasterRef, dest_width: u32, dest_height: u32) {
        if dest_width == 0 || dest_height == 0 {
            return;
        }
        let scaled = imageops::resize(raster.image(), dest_width, dest_height, FilterType::Triangle);
        imageops::overlay(&mut self.canvas, &scaled, 0, 0);
    }

    fn fill_quad(&mut self, quad: Rect, color: Rgba<u8>) {
        let Some((x0, y0, x1, y1)) = self.span(quad) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.canvas.get_pixel_mut(x, y).blend(&color);
            }
        }
    }

    fn stroke_quad(&mut self, quad: Rect, color: Rgba<u8>) {
        let edges = [
            Rect::new(quad.x, quad.y, quad.width, 1.0),
            Rect::new(quad.x, quad.bottom() - 1.0, quad.width, 1.0),
            Rect::new(quad.x, quad.y + 1.0, 1.0, quad.height - 2.0),
            Rect::new(quad.right() - 1.0, quad.y + 1.0, 1.0, quad.height - 2.0),
        ];
        for edge in edges {
            self.fill_quad(edge, color);
        }
    }

    fn copy_region(&self, raster: &RasterRef, region: PixelRect) -> RasterRef {
        let (x, y, width, height) = region.as_tuple();
        RasterRef::new(raster.image().crop_imm(x, y, width, height))
    }

    fn encode(&self, raster: &RasterRef, format: OutputFormat) -> CropResult<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        let result = if format.supports_alpha() {
            raster.image().write_to(&mut out, format.image_format())
        } else {
            DynamicImage::ImageRgb8(raster.image().to_rgb8())
                .write_to(&mut out, format.image_format())
        };
        result.map_err(|e| CropError::Encode(e.to_string()))?;
        Ok(out.into_inner())
    }
}

fn clip(value: f64, max: u32) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let v = value.clamp(0.0, f64::from(max)) as u32;
    v
}
