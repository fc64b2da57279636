// SPDX-License-Identifier: GPL-3.0-or-later
// src/lib.rs
//
// Crop engine: a draggable, resizable selection over a scaled preview,
// mapped back to exact source pixels for export.

pub mod app;
pub mod config;
pub mod constant;
pub mod domain;

pub use app::{
    CropMessage, CursorHint, LoadTicket, PointerAdapter, PointerEvent, PointerKind,
    PointerOutcome, Repaint, Session,
};
pub use config::CropConfig;
pub use domain::document::operations::{ExportMode, compute_source_rect};
pub use domain::document::{
    ExportOutput, ImageSurface, OutputFormat, RasterRef, RasterSurface, decode_async,
};
pub use domain::{
    CropError, CropResult, DisplayDimensions, OverlayModel, PixelRect, Point, Rect, ViewportBox,
    compute_scale, to_display_space, to_source_space,
};
