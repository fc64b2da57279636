// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// Headless command line driver: load an image, place the selection,
// export the crop.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::Parser;

use cropper::app::view::crop::DragState;
use cropper::constant::{MIN_OVERLAY_WIDTH, OUTPUT_SUFFIX};
use cropper::{CropConfig, CropMessage, OutputFormat, PointerEvent, Session, decode_async};

/// Crop a region out of an image the way the interactive overlay would.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    /// Image to crop.
    pub file: PathBuf,

    /// Where to write the export. Defaults to `<output dir>/<stem>-cropped.<ext>`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview surface size as WIDTHxHEIGHT.
    #[arg(long, default_value = "300x300")]
    pub viewport: Viewport,

    /// Fixed selection aspect ratio (height / width).
    #[arg(long)]
    pub ratio: Option<f64>,

    /// Selection in preview coordinates as X,Y,WIDTH. Enables crop mode.
    #[arg(long)]
    pub select: Option<Selection>,

    /// Export the whole image even when a selection is given.
    #[arg(long)]
    pub entire: bool,

    /// Output encoding (png, jpeg, webp, bmp). Guessed from `--output` if omitted.
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Also write the rendered preview (with overlay) as PNG.
    #[arg(long)]
    pub preview: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
        let height = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
        Ok(Self { width, height })
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Selection {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|e| format!("bad selection '{s}': {e}"))?;
        match parts.as_slice() {
            [x, y, width] => Ok(Self {
                x: *x,
                y: *y,
                width: *width,
            }),
            _ => Err(format!("expected X,Y,WIDTH, got '{s}'")),
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()).await {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let output_format = args
        .format
        .or_else(|| args.output.as_deref().and_then(OutputFormat::from_path))
        .unwrap_or_default();

    let config = CropConfig {
        viewport_width: args.viewport.width,
        viewport_height: args.viewport.height,
        aspect_ratio: args.ratio,
        output_format,
        ..CropConfig::default()
    };
    let mut session = Session::new(&config).context("Invalid session configuration")?;

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let ticket = session.begin_load();
    let decoded = decode_async(bytes).await;
    session
        .complete_load(ticket, decoded)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;

    if let Some(selection) = args.select {
        session.update(CropMessage::StartCrop)?;
        place_selection(&mut session, selection)?;
        let rect = session.overlay().rect();
        log::info!(
            "Selection at ({:.1}, {:.1}) size {:.1}x{:.1}",
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
    }

    if let Some(preview) = &args.preview {
        session.draw();
        session
            .surface()
            .canvas()
            .save(preview)
            .with_context(|| format!("Failed to write preview {}", preview.display()))?;
        log::info!("Wrote preview to {}", preview.display());
    }

    let entire = args.entire.then_some(true);
    let (export, _) = session.export_selection(entire, config.output_format)?;

    let target = match args.output {
        Some(path) => path,
        None => default_output_path(&config, &args.file, config.output_format),
    };
    std::fs::write(&target, &export.bytes)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    log::info!(
        "Wrote {}x{} {} to {}",
        export.width,
        export.height,
        export.mime_type(),
        target.display()
    );

    Ok(())
}

/// Replay the gestures a user would make: shrink the selection until it
/// fits at the target origin, drag its body there, then drag the handle to
/// the target width. Resizing keeps the origin, so a selection too small to
/// grab by its body is only ever sized, never moved.
fn place_selection(session: &mut Session, selection: Selection) -> Result<()> {
    let viewport = session.viewport();
    let overlay = session.overlay();
    let fit = (viewport.width_f() - selection.x)
        .min((viewport.height_f() - selection.y) / overlay.aspect_ratio())
        .max(MIN_OVERLAY_WIDTH);
    if overlay.rect().width > fit {
        drag_handle_to_width(session, fit)?;
    }

    drag_body_to(session, selection.x, selection.y)?;
    drag_handle_to_width(session, selection.width)
}

fn drag_handle_to_width(session: &mut Session, width: f64) -> Result<()> {
    let rect = session.overlay().rect();
    let corner = rect.bottom_right();
    let target_right = corner.x + (width - rect.width);
    for event in [
        PointerEvent::down(corner.x, corner.y),
        PointerEvent::moved(target_right, corner.y),
        PointerEvent::up(target_right, corner.y),
    ] {
        session.update(CropMessage::Pointer(event))?;
    }
    Ok(())
}

fn drag_body_to(session: &mut Session, x: f64, y: f64) -> Result<()> {
    let rect = session.overlay().rect();
    if rect.x == x && rect.y == y {
        return Ok(());
    }
    let grab = (rect.x + 1.0, rect.y + 1.0);

    session.update(CropMessage::Pointer(PointerEvent::down(grab.0, grab.1)))?;
    if !matches!(session.drag_state(), DragState::Moving { .. }) {
        session.update(CropMessage::Pointer(PointerEvent::up(grab.0, grab.1)))?;
        bail!("Selection is too small to grab by its body");
    }
    session.update(CropMessage::Pointer(PointerEvent::moved(x + 1.0, y + 1.0)))?;
    session.update(CropMessage::Pointer(PointerEvent::up(x + 1.0, y + 1.0)))?;
    Ok(())
}

fn default_output_path(config: &CropConfig, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    let dir = config
        .output_dir
        .clone()
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{stem}{OUTPUT_SUFFIX}.{}", format.extension()))
}
