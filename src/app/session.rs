// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/session.rs
//
// Crop session: current and prior raster, crop mode and the wiring
// between pointer input, overlay, exporter and surface.

use crate::app::message::{CropMessage, CursorHint, PointerEvent, PointerOutcome, Repaint};
use crate::app::view::crop::{self, DragController, DragState};
use crate::config::CropConfig;
use crate::domain::document::format::{ExportOutput, OutputFormat};
use crate::domain::document::operations::crop::{ExportMode, compute_source_rect, export};
use crate::domain::document::raster::RasterRef;
use crate::domain::document::surface::{ImageSurface, RasterSurface};
use crate::domain::error::{CropError, CropResult};
use crate::domain::geometry::{Point, ViewportBox};
use crate::domain::overlay::OverlayModel;
use crate::domain::transform::{DisplayDimensions, compute_scale};

/// Identifies one requested load. Only the most recent ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// The raster on screen and how it is scaled.
#[derive(Debug, Clone)]
struct Loaded {
    raster: RasterRef,
    display: DisplayDimensions,
}

/// One crop widget. Sessions share nothing, so any number may coexist.
pub struct Session<S: RasterSurface = ImageSurface> {
    viewport: ViewportBox,
    overlay: OverlayModel,
    drag: DragController,
    surface: S,
    current: Option<Loaded>,
    prior: Option<RasterRef>,
    cropping: bool,
    load_generation: u64,
}

impl Session<ImageSurface> {
    /// Session drawing into an in-memory canvas the size of the viewport.
    pub fn new(config: &CropConfig) -> CropResult<Self> {
        Self::with_surface(config, ImageSurface::new(config.viewport()))
    }
}

impl<S: RasterSurface> Session<S> {
    pub fn with_surface(config: &CropConfig, surface: S) -> CropResult<Self> {
        config.validate()?;

        let viewport = config.viewport();
        let mut overlay = OverlayModel::new(viewport, config.handle_size);
        if let Some(ratio) = config.aspect_ratio {
            overlay.set_aspect_ratio(ratio)?;
        }

        Ok(Self {
            viewport,
            overlay,
            drag: DragController::default(),
            surface,
            current: None,
            prior: None,
            cropping: false,
            load_generation: 0,
        })
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Decode `bytes` and show the result. Supersedes any pending load.
    pub fn load_image(&mut self, bytes: &[u8]) -> CropResult<Repaint> {
        let ticket = self.begin_load();
        self.complete_load(ticket, RasterRef::decode(bytes))
    }

    /// Load from a `data:` URL, as produced by [`ExportOutput::to_data_url`].
    pub fn load_data_url(&mut self, url: &str) -> CropResult<Repaint> {
        let ticket = self.begin_load();
        self.complete_load(ticket, RasterRef::decode_data_url(url))
    }

    /// Register an upcoming (possibly asynchronous) load.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        LoadTicket(self.load_generation)
    }

    /// Finish a load started with [`begin_load`](Self::begin_load).
    ///
    /// Results for a ticket that has since been superseded are dropped.
    /// A decode failure leaves the session as it was.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: CropResult<RasterRef>,
    ) -> CropResult<Repaint> {
        if ticket.0 != self.load_generation {
            log::warn!(
                "Discarding stale load (ticket {}, latest {})",
                ticket.0,
                self.load_generation
            );
            return Ok(Repaint::NotNeeded);
        }

        self.show_raster(result?)
    }

    fn show_raster(&mut self, raster: RasterRef) -> CropResult<Repaint> {
        let display = compute_scale(self.viewport, raster.width(), raster.height())?;
        log::debug!(
            "Showing {}x{} raster at {}x{} (factor {})",
            raster.width(),
            raster.height(),
            display.width,
            display.height,
            display.factor
        );

        self.current = Some(Loaded { raster, display });
        self.cropping = false;
        self.drag.end_drag();
        Ok(Repaint::Requested)
    }

    // -------------------------------------------------------------------------
    // Crop lifecycle
    // -------------------------------------------------------------------------

    /// Enter crop mode, remembering the current raster for [`restore`](Self::restore).
    pub fn start_cropping(&mut self) -> CropResult<Repaint> {
        let Some(current) = &self.current else {
            return Err(CropError::NoImageLoaded);
        };

        self.prior = Some(current.raster.clone());
        self.cropping = true;
        log::debug!("Crop mode started");
        Ok(Repaint::Requested)
    }

    /// Export the selection, or the whole image.
    ///
    /// `entire_image` defaults to "not cropping"; outside crop mode the whole
    /// image is exported regardless. When cropping, the exported raster
    /// replaces the current one and crop mode ends.
    pub fn export_selection(
        &mut self,
        entire_image: Option<bool>,
        format: OutputFormat,
    ) -> CropResult<(ExportOutput, Repaint)> {
        let Some(current) = &self.current else {
            return Err(CropError::NoImageLoaded);
        };

        let entire = !self.cropping || entire_image.unwrap_or(false);
        let region = compute_source_rect(
            self.overlay.rect(),
            current.display.factor,
            current.raster.width(),
            current.raster.height(),
            ExportMode::from_entire(entire),
        );
        let exported = export(&self.surface, Some(&current.raster), region, format)?;

        let repaint = if self.cropping {
            self.load_generation += 1;
            self.show_raster(exported.raster)?
        } else {
            Repaint::NotNeeded
        };
        self.cropping = false;

        Ok((exported.output, repaint))
    }

    /// Bring back the raster saved when crop mode was last entered and
    /// start cropping it again.
    pub fn restore(&mut self) -> CropResult<Repaint> {
        let Some(prior) = self.prior.take() else {
            return Err(CropError::NoImageLoaded);
        };

        self.cropping = false;
        self.load_generation += 1;
        self.show_raster(prior)?;
        log::debug!("Restored prior raster");
        self.start_cropping()
    }

    pub fn set_aspect_ratio(&mut self, ratio: f64) -> CropResult<Repaint> {
        self.overlay.set_aspect_ratio(ratio)?;
        Ok(Repaint::Requested)
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Feed a pointer event. Ignored outside crop mode.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerOutcome {
        if !self.cropping {
            return PointerOutcome {
                repaint: Repaint::NotNeeded,
                cursor: CursorHint::Default,
            };
        }
        self.drag.handle(event, &mut self.overlay)
    }

    pub fn cursor_hint(&self, p: Point) -> CursorHint {
        if !self.cropping {
            return CursorHint::Default;
        }
        self.drag.cursor_hint(p, &self.overlay)
    }

    /// Dispatch a user action.
    pub fn update(&mut self, message: CropMessage) -> CropResult<Repaint> {
        match message {
            CropMessage::Pointer(event) => Ok(self.handle_pointer(event).repaint),
            CropMessage::StartCrop => self.start_cropping(),
            CropMessage::Restore => self.restore(),
            CropMessage::SetAspectRatio(ratio) => self.set_aspect_ratio(ratio),
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Repaint the whole surface.
    pub fn draw(&mut self) {
        let raster = self.current.as_ref().map(|c| (&c.raster, c.display));
        let overlay = self.cropping.then_some(&self.overlay);
        crop::paint(&mut self.surface, raster, overlay);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn is_cropping(&self) -> bool {
        self.cropping
    }

    pub fn viewport(&self) -> ViewportBox {
        self.viewport
    }

    pub fn overlay(&self) -> &OverlayModel {
        &self.overlay
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn current_raster(&self) -> Option<&RasterRef> {
        self.current.as_ref().map(|c| &c.raster)
    }

    pub fn prior_raster(&self) -> Option<&RasterRef> {
        self.prior.as_ref()
    }

    pub fn display_dimensions(&self) -> Option<DisplayDimensions> {
        self.current.as_ref().map(|c| c.display)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::message::PointerEvent;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 7, 255])
        });
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn session() -> Session {
        Session::new(&CropConfig::default()).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let config = CropConfig {
            viewport_height: 3,
            ..CropConfig::default()
        };
        assert!(Session::new(&config).is_err());
    }

    #[test]
    fn configured_ratio_is_applied() {
        let config = CropConfig {
            aspect_ratio: Some(0.5),
            ..CropConfig::default()
        };
        let s = Session::new(&config).unwrap();
        assert_eq!(s.overlay().rect().height, 50.0);
    }

    #[test]
    fn load_computes_display_dimensions() {
        let mut s = session();
        assert!(s.load_image(&png(600, 200)).unwrap().is_requested());
        let dims = s.display_dimensions().unwrap();
        assert_eq!((dims.width, dims.height, dims.factor), (300, 100, 0.5));
        assert!(!s.is_cropping());
    }

    #[test]
    fn failed_decode_keeps_previous_image() {
        let mut s = session();
        s.load_image(&png(10, 10)).unwrap();
        let err = s.load_image(b"nope").unwrap_err();
        assert!(matches!(err, CropError::Decode(_)));
        assert_eq!(s.current_raster().unwrap().dimensions(), (10, 10));
    }

    #[test]
    fn start_cropping_without_image_fails() {
        let mut s = session();
        assert_eq!(s.start_cropping().unwrap_err(), CropError::NoImageLoaded);
        assert!(!s.is_cropping());
        assert!(s.prior_raster().is_none());
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut s = session();
        let first = s.begin_load();
        let second = s.begin_load();
        let late = RasterRef::decode(&png(40, 40));
        assert_eq!(s.complete_load(first, late).unwrap(), Repaint::NotNeeded);
        assert!(s.current_raster().is_none());
        s.complete_load(second, RasterRef::decode(&png(20, 20))).unwrap();
        assert_eq!(s.current_raster().unwrap().dimensions(), (20, 20));
    }

    #[test]
    fn loading_leaves_crop_mode() {
        let mut s = session();
        s.load_image(&png(300, 300)).unwrap();
        s.start_cropping().unwrap();
        s.load_image(&png(100, 100)).unwrap();
        assert!(!s.is_cropping());
    }

    #[test]
    fn export_outside_crop_mode_is_whole_image() {
        let mut s = session();
        s.load_image(&png(64, 32)).unwrap();
        let (out, repaint) = s.export_selection(Some(false), OutputFormat::Png).unwrap();
        assert_eq!((out.width, out.height), (64, 32));
        assert_eq!(repaint, Repaint::NotNeeded);
    }

    #[test]
    fn export_without_image_fails() {
        let mut s = session();
        let err = s.export_selection(None, OutputFormat::Png).unwrap_err();
        assert_eq!(err, CropError::NoImageLoaded);
    }

    #[test]
    fn crop_export_commits_selection() {
        let mut s = session();
        s.load_image(&png(600, 600)).unwrap();
        s.start_cropping().unwrap();
        let (out, repaint) = s.export_selection(None, OutputFormat::Png).unwrap();

        // overlay {50,50,100,100} at factor 0.5
        assert_eq!((out.width, out.height), (200, 200));
        assert!(repaint.is_requested());
        assert!(!s.is_cropping());
        assert_eq!(s.current_raster().unwrap().dimensions(), (200, 200));

        let decoded = RasterRef::decode(&out.bytes).unwrap();
        let px = decoded.image().to_rgba8();
        assert_eq!(px.get_pixel(0, 0), &Rgba([100, 100, 7, 255]));
    }

    #[test]
    fn entire_export_while_cropping_still_commits() {
        let mut s = session();
        s.load_image(&png(600, 600)).unwrap();
        s.start_cropping().unwrap();
        let (out, _) = s.export_selection(Some(true), OutputFormat::Png).unwrap();
        assert_eq!((out.width, out.height), (600, 600));
        assert!(!s.is_cropping());
    }

    #[test]
    fn restore_without_prior_fails() {
        let mut s = session();
        s.load_image(&png(10, 10)).unwrap();
        assert_eq!(s.restore().unwrap_err(), CropError::NoImageLoaded);
    }

    #[test]
    fn restore_brings_back_precrop_image_in_crop_mode() {
        let mut s = session();
        s.load_image(&png(600, 600)).unwrap();
        let original = s.current_raster().unwrap().clone();
        s.start_cropping().unwrap();
        s.export_selection(None, OutputFormat::Png).unwrap();

        assert!(s.restore().unwrap().is_requested());
        assert!(s.is_cropping());
        assert!(s.current_raster().unwrap().same_pixels(&original));
        assert!(s.prior_raster().unwrap().same_pixels(&original));
    }

    #[test]
    fn pointer_is_ignored_outside_crop_mode() {
        let mut s = session();
        s.load_image(&png(300, 300)).unwrap();
        let out = s.handle_pointer(PointerEvent::down(100.0, 100.0));
        assert_eq!(out.cursor, CursorHint::Default);
        assert_eq!(s.drag_state(), DragState::Idle);
    }

    #[test]
    fn update_dispatches_messages() {
        let mut s = session();
        s.load_image(&png(300, 300)).unwrap();
        s.update(CropMessage::StartCrop).unwrap();
        s.update(CropMessage::Pointer(PointerEvent::down(150.0, 150.0)))
            .unwrap();
        let repaint = s
            .update(CropMessage::Pointer(PointerEvent::moved(180.0, 150.0)))
            .unwrap();
        assert!(repaint.is_requested());
        assert_eq!(s.overlay().rect().width, 130.0);
        s.update(CropMessage::SetAspectRatio(0.5)).unwrap();
        assert_eq!(s.overlay().rect().height, 65.0);
        assert!(s.update(CropMessage::SetAspectRatio(0.0)).is_err());
    }

    #[test]
    fn draw_shows_overlay_only_when_cropping() {
        let mut s = session();
        s.load_image(&png(300, 300)).unwrap();
        s.draw();
        let outside = *s.surface().canvas().get_pixel(40, 200);
        let inside = *s.surface().canvas().get_pixel(100, 100);

        s.start_cropping().unwrap();
        s.draw();
        assert_eq!(*s.surface().canvas().get_pixel(100, 100), inside);
        assert!(s.surface().canvas().get_pixel(40, 200)[0] < outside[0]);
    }
}
