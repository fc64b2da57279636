// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/mod.rs
//
// Crop selection module: drag state machine and overlay painting.

mod overlay;
mod selection;

pub use overlay::{is_shaded, paint, shade_regions};
pub use selection::{DragController, DragState};
