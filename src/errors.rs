//! Error types with diagnostics using miette
//!
//! Every fatal condition carries the shape or dimension that caused it, so the
//! configuration can be corrected without a debugger.

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors in the dimension table, feature toggles or device conversion
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{what} = {value}mm exceeds both canvas axes ({max_width}mm x {max_height}mm)")]
    #[diagnostic(
        code(chassis::config::out_of_bounds),
        help("a dimension is probably in the wrong unit")
    )]
    OutOfBounds {
        what: String,
        value: f64,
        max_width: f64,
        max_height: f64,
    },

    #[error("{what} = {value}mm is negative in device space")]
    #[diagnostic(code(chassis::config::negative_coordinate))]
    NegativeCoordinate { what: String, value: f64 },

    #[error("{what} is {value}, not a finite length")]
    #[diagnostic(
        code(chassis::config::non_finite),
        help("a dimension was probably divided by zero")
    )]
    NonFiniteCoordinate { what: String, value: f64 },

    #[error("mounting hole `{hole}` has only one of nut width / nut height")]
    #[diagnostic(
        code(chassis::config::incomplete_nut),
        help("give both nut dimensions, or neither to skip the nut outline")
    )]
    IncompleteNutSpec { hole: String },

    #[error("mounting hole `{hole}` is smaller than its screw ({hole_diameter}mm < {screw}mm)")]
    #[diagnostic(code(chassis::config::hole_smaller_than_screw))]
    HoleSmallerThanScrew {
        hole: String,
        screw: f64,
        hole_diameter: f64,
    },

    #[error("{what} must be a positive, finite length")]
    #[diagnostic(code(chassis::config::invalid_pitch))]
    InvalidPitch { what: String },

    #[error("{what} of {pitch}mm needs {lines} lines, more than the limit of {limit}")]
    #[diagnostic(code(chassis::config::grid_too_dense))]
    GridTooDense {
        what: String,
        pitch: f64,
        lines: f64,
        limit: usize,
    },

    #[error("invalid tesselation: {reason}")]
    #[diagnostic(code(chassis::config::invalid_tesselation))]
    InvalidTesselation { reason: String },
}

// ============================================================================
// Shape Construction Errors
// ============================================================================

/// Errors raised while building contours
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("{shape}: corner radius {radius}mm exceeds half of {width}mm x {height}mm")]
    #[diagnostic(
        code(chassis::shape::degenerate_corner),
        help("corner radius must be at most min(width, height) / 2")
    )]
    DegenerateCorner {
        shape: String,
        radius: f64,
        width: f64,
        height: f64,
    },

    #[error("{shape}: {what} is negative")]
    #[diagnostic(code(chassis::shape::negative_dimension))]
    NegativeDimension { shape: String, what: String },

    #[error("{shape}: cannot round a corner from {incoming} to {outgoing}")]
    #[diagnostic(
        code(chassis::shape::invalid_turn),
        help("a rounded corner joins two perpendicular edges")
    )]
    InvalidTurn {
        shape: String,
        incoming: String,
        outgoing: String,
    },

    #[error("{shape}: relative move without a current point")]
    #[diagnostic(code(chassis::shape::no_current_point))]
    NoCurrentPoint { shape: String },

    #[error("{shape}: pitch {pitch}mm needs more than {limit} lines")]
    #[diagnostic(code(chassis::shape::grid_too_dense))]
    GridTooDense { shape: String, pitch: f64, limit: usize },

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidHole(#[from] ConfigError),
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors surfaced by the public rendering entry points
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Shape(#[from] ShapeError),

    #[error("failed to write SVG")]
    #[diagnostic(code(chassis::render::io))]
    Io(#[from] std::io::Error),
}
