// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Session configuration.

use std::path::PathBuf;

use crate::constant::{DEFAULT_HANDLE_SIZE, DEFAULT_VIEWPORT_SIZE, MIN_OVERLAY_WIDTH};
use crate::domain::document::format::OutputFormat;
use crate::domain::error::{CropError, CropResult};
use crate::domain::geometry::ViewportBox;

/// Configuration for one crop session.
#[derive(Debug, Clone, PartialEq)]
pub struct CropConfig {
    /// Width of the rendering surface in pixels.
    pub viewport_width: u32,
    /// Height of the rendering surface in pixels.
    pub viewport_height: u32,
    /// Fixed selection aspect ratio (height / width). `None` keeps 1:1.
    pub aspect_ratio: Option<f64>,
    /// Side of the resize handle in display pixels.
    pub handle_size: f64,
    /// Encoding used for exports.
    pub output_format: OutputFormat,
    /// Directory exports are written to when no explicit path is given.
    pub output_dir: Option<PathBuf>,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_SIZE,
            viewport_height: DEFAULT_VIEWPORT_SIZE,
            aspect_ratio: None,
            handle_size: DEFAULT_HANDLE_SIZE,
            output_format: OutputFormat::default(),
            output_dir: dirs::picture_dir().or_else(dirs::home_dir),
        }
    }
}

impl CropConfig {
    pub fn viewport(&self) -> ViewportBox {
        ViewportBox::new(self.viewport_width, self.viewport_height)
    }

    /// Reject settings no session could honour.
    pub fn validate(&self) -> CropResult<()> {
        let min = MIN_OVERLAY_WIDTH;
        if f64::from(self.viewport_width) < min || f64::from(self.viewport_height) < min {
            return Err(CropError::invalid(format!(
                "viewport {}x{} is smaller than the minimum selection ({min})",
                self.viewport_width, self.viewport_height
            )));
        }
        if let Some(ratio) = self.aspect_ratio {
            if !(ratio.is_finite() && ratio > 0.0) {
                return Err(CropError::invalid(format!(
                    "aspect ratio must be positive, got {ratio}"
                )));
            }
        }
        if !(self.handle_size.is_finite() && self.handle_size > 0.0) {
            return Err(CropError::invalid(format!(
                "handle size must be positive, got {}",
                self.handle_size
            )));
        }
        Ok(())
    }
}
