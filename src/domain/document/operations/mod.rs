// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/operations/mod.rs
//
// Operations applied to raster documents.

pub mod crop;

pub use crop::{ExportMode, Exported, compute_source_rect, export};
