// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Engine constants that should not be changed by the user.

/// Smallest width the selection overlay may shrink to (display pixels).
pub const MIN_OVERLAY_WIDTH: f64 = 10.0;

/// Side length of the resize handle and half-extent of its hit zone.
pub const DEFAULT_HANDLE_SIZE: f64 = 10.0;

/// Inset of the painted resize handle from the overlay's bottom-right corner.
pub const HANDLE_PAINT_INSET: f64 = 5.0;

/// Initial overlay origin (display pixels).
pub const DEFAULT_OVERLAY_X: f64 = 50.0;
pub const DEFAULT_OVERLAY_Y: f64 = 50.0;

/// Initial overlay width (display pixels).
pub const DEFAULT_OVERLAY_WIDTH: f64 = 100.0;

/// Initial aspect ratio (height / width).
pub const DEFAULT_ASPECT_RATIO: f64 = 1.0;

/// Default viewport edge length when none is configured.
pub const DEFAULT_VIEWPORT_SIZE: u32 = 300;

/// Shade painted over the area outside the selection (RGBA, 60% black).
pub const OVERLAY_SHADE: [u8; 4] = [0, 0, 0, 153];

/// Fill and stroke colours of the resize handle.
pub const HANDLE_FILL: [u8; 4] = [0, 0, 0, 255];
pub const HANDLE_STROKE: [u8; 4] = [255, 255, 255, 255];

/// Suffix appended to the input stem when no output path is given.
pub const OUTPUT_SUFFIX: &str = "-cropped";
