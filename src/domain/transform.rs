// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/transform.rs
//
// Display <-> source coordinate transform.

use super::error::{CropError, CropResult};
use super::geometry::{Point, ViewportBox};

/// Scaled preview size of a raster together with the factor that produced it.
///
/// `factor` is `display / source` and is kept at full precision so that
/// selections can be mapped back to source pixels without drift; `width` and
/// `height` are floor-truncated to whole display pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayDimensions {
    pub width: u32,
    pub height: u32,
    pub factor: f64,
}

/// Pick the single scale factor used to fit a source raster into `viewport`.
///
/// The axis with the smaller gap (`viewport - source`, which is negative when
/// the source overflows) is the one scaled to fit; the other axis follows with
/// the same factor. This means the second axis can still overflow the
/// viewport, which is the long-standing preview behaviour and is kept as is.
/// An exact tie takes the width branch.
pub fn compute_scale(
    viewport: ViewportBox,
    source_width: u32,
    source_height: u32,
) -> CropResult<DisplayDimensions> {
    if source_width == 0 || source_height == 0 {
        return Err(CropError::invalid(format!(
            "source raster has zero size ({source_width}x{source_height})"
        )));
    }

    let sw = f64::from(source_width);
    let sh = f64::from(source_height);
    let vw = viewport.width_f();
    let vh = viewport.height_f();

    let factor = if vw - sw <= vh - sh { vw / sw } else { vh / sh };

    if !(factor.is_finite() && factor > 0.0) {
        return Err(CropError::invalid(format!(
            "viewport {}x{} yields no usable scale factor",
            viewport.width, viewport.height
        )));
    }

    Ok(DisplayDimensions {
        width: floor_to_u32(sw * factor),
        height: floor_to_u32(sh * factor),
        factor,
    })
}

/// Convert a display-space point into integer source coordinates,
/// floor-truncated and clamped into `[0, source_dimension]`.
pub fn to_source_space(
    p: Point,
    factor: f64,
    source_width: u32,
    source_height: u32,
) -> (u32, u32) {
    let x = source_floor(p.x, factor).clamp(0, i64::from(source_width));
    let y = source_floor(p.y, factor).clamp(0, i64::from(source_height));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let point = (x as u32, y as u32);
    point
}

/// Convert a source-space point into display space.
pub fn to_display_space(p: Point, factor: f64) -> Point {
    Point::new(p.x * factor, p.y * factor)
}

/// Floor of a single display-space length divided by `factor`, unclamped.
pub(crate) fn source_floor(value: f64, factor: f64) -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    let v = (value / factor).floor() as i64;
    v
}

fn floor_to_u32(value: f64) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let v = value.floor().max(0.0) as u32;
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_source_scales_by_width() {
        let dims = compute_scale(ViewportBox::new(300, 300), 600, 200).unwrap();
        assert_eq!(dims.factor, 0.5);
        assert_eq!((dims.width, dims.height), (300, 100));
    }

    #[test]
    fn tall_source_scales_by_height() {
        let dims = compute_scale(ViewportBox::new(300, 300), 200, 600).unwrap();
        assert_eq!(dims.factor, 0.5);
        assert_eq!((dims.width, dims.height), (100, 300));
    }

    #[test]
    fn square_source_still_scales() {
        let dims = compute_scale(ViewportBox::new(300, 300), 900, 900).unwrap();
        assert!((dims.factor - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!((dims.width, dims.height), (300, 300));
    }

    #[test]
    fn small_source_is_upscaled() {
        let dims = compute_scale(ViewportBox::new(300, 300), 100, 50).unwrap();
        // width gap 200 < height gap 250
        assert_eq!(dims.factor, 3.0);
        assert_eq!((dims.width, dims.height), (300, 150));
    }

    #[test]
    fn exact_tie_takes_width_branch() {
        let dims = compute_scale(ViewportBox::new(300, 200), 400, 300).unwrap();
        assert_eq!(dims.factor, 0.75);
        assert_eq!(dims.width, 300);
    }

    #[test]
    fn other_axis_may_overflow() {
        // width gap -100 < height gap -50: width fits, height overflows
        let dims = compute_scale(ViewportBox::new(300, 100), 400, 150).unwrap();
        assert_eq!(dims.factor, 0.75);
        assert_eq!((dims.width, dims.height), (300, 112));
    }

    #[test]
    fn scaled_axis_never_exceeds_viewport() {
        let viewports = [(300, 300), (640, 480), (123, 457), (1000, 10)];
        let sources = [(1, 1), (7, 3), (600, 200), (4000, 3000), (333, 999), (10, 5000)];
        for (vw, vh) in viewports {
            for (sw, sh) in sources {
                let vp = ViewportBox::new(vw, vh);
                let dims = compute_scale(vp, sw, sh).unwrap();
                let by_width = f64::from(vw) - f64::from(sw) <= f64::from(vh) - f64::from(sh);
                if by_width {
                    assert!(dims.width <= vw, "{vw}x{vh} / {sw}x{sh}");
                } else {
                    assert!(dims.height <= vh, "{vw}x{vh} / {sw}x{sh}");
                }
            }
        }
    }

    #[test]
    fn zero_sized_source_is_rejected() {
        let err = compute_scale(ViewportBox::new(300, 300), 0, 10).unwrap_err();
        assert!(matches!(err, CropError::InvalidArgument(_)));
    }

    #[test]
    fn zero_viewport_is_rejected() {
        assert!(compute_scale(ViewportBox::new(0, 0), 10, 10).is_err());
    }

    #[test]
    fn source_space_is_floored_and_clamped() {
        assert_eq!(to_source_space(Point::new(10.9, 3.2), 0.5, 100, 100), (21, 6));
        assert_eq!(to_source_space(Point::new(-4.0, 500.0), 0.5, 100, 100), (0, 100));
    }

    #[test]
    fn round_trip_stays_within_one_pixel() {
        for factor in [0.1, 0.25, 0.37, 0.5, 0.999, 1.0, 2.0, 3.3] {
            for v in [0.0, 1.5, 17.25, 123.4, 299.99] {
                let p = Point::new(v, v / 2.0);
                let source = Point::new(p.x / factor, p.y / factor);
                let back = to_display_space(source, factor);
                assert!((back.x - p.x).abs() < 1.0);
                assert!((back.y - p.y).abs() < 1.0);
            }
        }
    }

    #[test]
    fn truncated_round_trip_within_one_pixel_when_downscaling() {
        for factor in [0.1, 0.25, 0.37, 0.5, 0.999] {
            for v in [0.0, 1.5, 17.25, 123.4, 299.99] {
                let (sx, _) = to_source_space(Point::new(v, 0.0), factor, 100_000, 100_000);
                let back = to_display_space(Point::new(f64::from(sx), 0.0), factor);
                assert!((back.x - v).abs() < 1.0, "factor {factor}, v {v}");
            }
        }
    }
}
