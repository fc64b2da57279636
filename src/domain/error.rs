// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/error.rs
//
// Error taxonomy shared by the crop engine.

use thiserror::Error;

/// Failures reported by the crop engine.
///
/// Geometry that falls outside the viewport or the image is never an error;
/// it is clamped silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CropError {
    /// Crop, export or restore attempted with no active raster.
    #[error("no image loaded")]
    NoImageLoaded,

    /// Non-positive aspect ratio, degenerate rectangle or unusable viewport.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Raw bytes could not be decoded into a raster.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// A raster could not be re-encoded.
    #[error("failed to encode image: {0}")]
    Encode(String),
}

impl CropError {
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type CropResult<T> = Result<T, CropError>;
