// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/mod.rs
//
// Pure crop-engine domain: geometry, transforms, overlay and documents.
// No UI concerns.

pub mod document;
pub mod error;
pub mod geometry;
pub mod overlay;
pub mod transform;

pub use error::{CropError, CropResult};
pub use geometry::{PixelRect, Point, Rect, ViewportBox};
pub use overlay::OverlayModel;
pub use transform::{DisplayDimensions, compute_scale, to_display_space, to_source_space};
