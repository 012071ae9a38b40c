//! Parametric layout engine for a laser-cut mobile robot chassis.
//!
//! A [`ChassisConfig`] dimension table goes in; SVG comes out. The geometry
//! is built as plain data ([`Drawing`]) first, validated against the canvas,
//! and only then emitted to a [`render::Canvas`] sink.
//!
//! ```no_run
//! let config = chassis_layout::ChassisConfig::default();
//! let svg = chassis_layout::render_sheet_svg(&config)?;
//! std::fs::write("chassis.svg", svg)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod errors;
pub mod log;
pub mod render;
pub mod types;

use std::path::Path;

pub use config::{ChassisConfig, Features, TesselationSpec};
pub use errors::{ConfigError, RenderError, ShapeError};
pub use render::{Drawing, Layer, render};
pub use types::{CanvasSpec, Length, Unit};

use render::{SvgCanvas, flush, tessellate};
use types::Scaler;

/// Render one chassis on its own canvas, ignoring tesselation.
pub fn render_svg(config: &ChassisConfig) -> Result<String, RenderError> {
    let drawing = render(config)?;
    let scaler = Scaler::points();
    let mut canvas = SvgCanvas::new(scaler.px(config.canvas.width), scaler.px(config.canvas.height));
    flush(&drawing, &scaler, &config.canvas, &mut canvas)?;
    Ok(canvas.into_string())
}

/// Render the sheet described by `config.tesselation`.
pub fn render_sheet_svg(config: &ChassisConfig) -> Result<String, RenderError> {
    let spec = &config.tesselation;
    let scaler = Scaler::points();
    let mut canvas = SvgCanvas::new(scaler.px(spec.sheet.width), scaler.px(spec.sheet.height));
    tessellate(config, spec, &mut canvas)?;
    Ok(canvas.into_string())
}

/// Render the sheet and write it to `path`. Nothing is written on error.
pub fn write_svg(path: impl AsRef<Path>, config: &ChassisConfig) -> Result<(), RenderError> {
    let svg = render_sheet_svg(config)?;
    std::fs::write(path, svg)?;
    Ok(())
}
