//! Chassis drawing pipeline
//!
//! This module is organized into submodules:
//! - `defaults`: Stroke styles and mounting-hole constants
//! - `types`: Core types like LineStyle, MountingHole, Layer, Stroke, Drawing
//! - `geometry`: Arc helpers and the rounded-corner table
//! - `path_builder`: Drawing primitives accumulated as contours
//! - `shapes`: Parametric shapes built on the path builder
//! - `layout`: Anchor derivation and the draw-order orchestration
//! - `canvas`: Sink trait and the flush to device units
//! - `svg`: SVG sink
//! - `tessellate`: Sheet replication

pub mod canvas;
pub mod defaults;
pub mod geometry;
pub mod layout;
pub mod path_builder;
pub mod shapes;
pub mod svg;
pub mod tessellate;
pub mod types;

// Re-export commonly used items
pub use canvas::{Canvas, CanvasOp, RecordingCanvas, flush};
pub use layout::{ChassisLayout, render};
pub use path_builder::{Contour, PathBuilder, PathSegment};
pub use shapes::{Shape, ShapeEnum};
pub use self::svg::SvgCanvas;
pub use tessellate::{sheet_drawing, tessellate};
pub use types::*;
