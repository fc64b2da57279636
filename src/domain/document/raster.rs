// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/raster.rs
//
// Decoded raster handle plus the decoder collaborator (sync and async).

use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, GenericImageView};

use crate::domain::error::{CropError, CropResult};

/// Opaque, cheaply cloneable handle to a decoded raster.
///
/// The pixels are shared and never mutated; a new image always means a new
/// `RasterRef`.
#[derive(Clone)]
pub struct RasterRef {
    image: Arc<DynamicImage>,
    width: u32,
    height: u32,
}

impl RasterRef {
    pub fn new(image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            image: Arc::new(image),
            width,
            height,
        }
    }

    /// Decode an encoded image (PNG, JPEG, WebP, ...) from memory.
    pub fn decode(bytes: &[u8]) -> CropResult<Self> {
        let image = image::load_from_memory(bytes).map_err(|e| CropError::Decode(e.to_string()))?;
        if image.width() == 0 || image.height() == 0 {
            return Err(CropError::Decode("image has zero size".into()));
        }
        Ok(Self::new(image))
    }

    /// Decode a `data:<mime>;base64,<payload>` URL.
    pub fn decode_data_url(url: &str) -> CropResult<Self> {
        let payload = parse_data_url(url)?;
        Self::decode(&payload)
    }

    /// Returns the natural (unscaled) pixel dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// True if both handles point at the same decoded pixels.
    pub fn same_pixels(&self, other: &RasterRef) -> bool {
        Arc::ptr_eq(&self.image, &other.image)
    }
}

impl fmt::Debug for RasterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RasterRef({}x{})", self.width, self.height)
    }
}

/// Decode on tokio's blocking pool. Resolves exactly once.
pub async fn decode_async(bytes: Vec<u8>) -> CropResult<RasterRef> {
    tokio::task::spawn_blocking(move || RasterRef::decode(&bytes))
        .await
        .map_err(|e| CropError::Decode(format!("decode task failed: {e}")))?
}

fn parse_data_url(url: &str) -> CropResult<Vec<u8>> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| CropError::Decode("not a data URL".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| CropError::Decode("data URL has no payload".into()))?;
    if !header.split(';').any(|part| part == "base64") {
        return Err(CropError::Decode("only base64 data URLs are supported".into()));
    }

    STANDARD
        .decode(payload.trim())
        .map_err(|e| CropError::Decode(format!("invalid base64 payload: {e}")))
}
