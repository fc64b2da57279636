// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/mod.rs
//
// Raster documents, their encodings and the surface they are drawn on.

pub mod format;
pub mod operations;
pub mod raster;
pub mod surface;

pub use format::{ExportOutput, OutputFormat};
pub use raster::{RasterRef, decode_async};
pub use surface::{ImageSurface, RasterSurface};
