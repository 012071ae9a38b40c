//! Strongly-typed length primitives for chassis layout (zero-cost newtypes).
//!
//! Design goals:
//! - No raw `f64` lengths in layout logic
//! - One canonical unit (millimetres) inside `Length`
//! - Conversions to device space only via `Scaler`

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use glam::{DVec2, dvec2};

use crate::errors::ConfigError;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Length units accepted at the configuration boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Millimeter,
    Inch,
    /// PostScript point, 1/72 inch
    Point,
}

impl Unit {
    /// Millimetres in one of this unit.
    pub const fn in_mm(self) -> f64 {
        match self {
            Unit::Millimeter => 1.0,
            Unit::Inch => MM_PER_INCH,
            Unit::Point => MM_PER_INCH / POINTS_PER_INCH,
        }
    }
}

pub const MM_PER_INCH: f64 = 25.4;
pub const POINTS_PER_INCH: f64 = 72.0;

/// Length in millimetres (canonical unit)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    /// Create a Length from millimetres (const-friendly, unchecked).
    #[inline]
    pub const fn mm(val: f64) -> Length {
        Length(val)
    }

    /// Create a Length from inches (const-friendly, unchecked).
    #[inline]
    pub const fn inches(val: f64) -> Length {
        Length(val * MM_PER_INCH)
    }

    /// Create a Length from a magnitude tagged with its unit.
    #[inline]
    pub const fn new(val: f64, unit: Unit) -> Length {
        Length(val * unit.in_mm())
    }

    /// Create a Length with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64, unit: Unit) -> Result<Length, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Length::new(val, unit))
        }
    }

    /// Magnitude expressed in `unit`.
    #[inline]
    pub fn to(self, unit: Unit) -> f64 {
        self.0 / unit.in_mm()
    }

    /// Get the raw millimetre value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn min(self, other: Length) -> Length {
        Length(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Length) -> Length {
        Length(self.0.max(other.0))
    }

    /// Checked ratio returning None if divisor is zero
    #[inline]
    pub fn checked_div(self, rhs: Length) -> Option<f64> {
        if rhs.0 == 0.0 { None } else { Some(self.0 / rhs.0) }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// True when both lengths agree within `eps` millimetres.
    #[inline]
    pub fn approx_eq(self, other: Length, eps: f64) -> bool {
        (self.0 - other.0).abs() <= eps
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length { Length(self.0 + rhs.0) }
}
impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length { Length(self.0 - rhs.0) }
}
impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length { Length(self.0 * rhs) }
}
impl Mul<Length> for f64 {
    type Output = Length;
    fn mul(self, rhs: Length) -> Length { Length(self * rhs.0) }
}
impl Div<f64> for Length {
    type Output = Length;
    fn div(self, rhs: f64) -> Length { Length(self.0 / rhs) }
}

// Length / Length goes through checked_div.

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length { Length(-self.0) }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Length) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", self.0)
    }
}

/// Extent of the drawing area. Device coordinates are sanity-checked against it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSpec {
    pub width: Length,
    pub height: Length,
}

impl CanvasSpec {
    pub const fn new(width: Length, height: Length) -> Self {
        Self { width, height }
    }
}

/// Convert millimetres → device units (points by default).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scaler {
    /// Device units per millimetre
    pub per_mm: f64,
}

impl Scaler {
    /// Scaler for PostScript points, the unit of the vector surface.
    pub const fn points() -> Self {
        Scaler { per_mm: POINTS_PER_INCH / MM_PER_INCH }
    }

    /// Create a Scaler with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(per_mm: f64) -> Result<Self, NumericError> {
        if per_mm.is_nan() {
            Err(NumericError::NaN)
        } else if per_mm.is_infinite() {
            Err(NumericError::Infinite)
        } else if per_mm == 0.0 {
            Err(NumericError::Zero)
        } else if per_mm < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Scaler { per_mm })
        }
    }

    /// Convert a length to a raw device scalar without bounds checks.
    #[inline]
    pub fn px(&self, l: Length) -> f64 {
        l.0 * self.per_mm
    }

    /// Inverse of [`Scaler::px`].
    #[inline]
    pub fn from_device(&self, value: f64) -> Length {
        Length(value / self.per_mm)
    }

    /// Convert a length to a device scalar, checking it against `canvas`.
    ///
    /// The result must be non-negative and must not exceed the canvas extent on
    /// at least one axis. This catches unit mistakes, not per-axis overflow.
    pub fn to_device(&self, what: &str, l: Length, canvas: &CanvasSpec) -> Result<f64, ConfigError> {
        let value = self.px(l);
        if !value.is_finite() {
            return Err(ConfigError::NonFiniteCoordinate {
                what: what.to_string(),
                value: l.raw(),
            });
        }
        if value < 0.0 {
            return Err(ConfigError::NegativeCoordinate {
                what: what.to_string(),
                value: l.raw(),
            });
        }
        let max_width = self.px(canvas.width);
        let max_height = self.px(canvas.height);
        if value > max_width && value > max_height {
            return Err(ConfigError::OutOfBounds {
                what: what.to_string(),
                value: l.raw(),
                max_width: canvas.width.raw(),
                max_height: canvas.height.raw(),
            });
        }
        Ok(value)
    }

    /// Convert a point to device space with bounds checks on both coordinates.
    pub fn point(&self, what: &str, p: Pt, canvas: &CanvasSpec) -> Result<DVec2, ConfigError> {
        Ok(dvec2(
            self.to_device(what, p.x, canvas)?,
            self.to_device(what, p.y, canvas)?,
        ))
    }

    /// Convert an offset to device space (no bounds: offsets may be negative).
    pub fn offset(&self, o: OffsetMm) -> DVec2 {
        dvec2(self.px(o.dx), self.px(o.dy))
    }
}

/// Generic 2D point
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self { Point { x, y } }
}

impl Point<Length> {
    /// Euclidean distance in millimetres.
    pub fn distance(self, other: Self) -> f64 {
        let d = other - self;
        d.dx.0.hypot(d.dy.0)
    }

    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        self.x.approx_eq(other.x, eps) && self.y.approx_eq(other.y, eps)
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox<T> {
    pub min: Point<T>,
    pub max: Point<T>,
}

impl BBox<Length> {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: Point { x: Length(f64::MAX), y: Length(f64::MAX) },
            max: Point { x: Length(f64::MIN), y: Length(f64::MIN) },
        }
    }

    /// Box spanning the given edges.
    pub fn from_edges(left: Length, top: Length, right: Length, bottom: Length) -> Self {
        BBox {
            min: Point::new(left, top),
            max: Point::new(right, bottom),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x.0 > self.max.x.0 || self.min.y.0 > self.max.y.0
    }

    pub fn expand_point(&mut self, p: Point<Length>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn expand_box(&mut self, other: &BBox<Length>) {
        if other.is_empty() {
            return;
        }
        self.expand_point(other.min);
        self.expand_point(other.max);
    }

    pub fn left(&self) -> Length { self.min.x }
    pub fn right(&self) -> Length { self.max.x }
    /// Smaller y (y grows downward on the canvas)
    pub fn top(&self) -> Length { self.min.y }
    pub fn bottom(&self) -> Length { self.max.y }

    pub fn width(&self) -> Length { self.max.x - self.min.x }

    pub fn height(&self) -> Length { self.max.y - self.min.y }

    pub fn center(&self) -> Point<Length> {
        Point {
            x: (self.min.x + self.max.x) / 2.0,
            y: (self.min.y + self.max.y) / 2.0,
        }
    }
}

impl Default for BBox<Length> {
    fn default() -> Self {
        Self::new()
    }
}

/// A displacement/offset vector (not an absolute position)
/// Use this for translations; Point + Offset = Point
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offset<T> {
    pub dx: T,
    pub dy: T,
}

impl<T> Offset<T> {
    pub fn new(dx: T, dy: T) -> Self {
        Offset { dx, dy }
    }
}

/// Add an offset to a point to get a new point
impl Add<Offset<Length>> for Point<Length> {
    type Output = Point<Length>;
    fn add(self, rhs: Offset<Length>) -> Point<Length> {
        Point {
            x: self.x + rhs.dx,
            y: self.y + rhs.dy,
        }
    }
}

/// Subtract two points to get an offset
impl Sub<Point<Length>> for Point<Length> {
    type Output = Offset<Length>;
    fn sub(self, rhs: Point<Length>) -> Offset<Length> {
        Offset {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

/// Convenient aliases
pub type Pt = Point<Length>;
pub type OffsetMm = Offset<Length>;
pub type BoxMm = BBox<Length>;

/// Point from raw millimetre coordinates.
pub fn pmm(x: f64, y: f64) -> Pt {
    Point::new(Length::mm(x), Length::mm(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Length tests ====================

    #[test]
    fn length_try_new_valid() {
        assert!(Length::try_new(1.0, Unit::Millimeter).is_ok());
        assert!(Length::try_new(0.0, Unit::Inch).is_ok());
        assert!(Length::try_new(-1.0, Unit::Point).is_ok());
    }

    #[test]
    fn length_try_new_rejects_nan() {
        assert_eq!(Length::try_new(f64::NAN, Unit::Millimeter), Err(NumericError::NaN));
    }

    #[test]
    fn length_try_new_rejects_infinity() {
        assert_eq!(Length::try_new(f64::INFINITY, Unit::Inch), Err(NumericError::Infinite));
        assert_eq!(Length::try_new(f64::NEG_INFINITY, Unit::Inch), Err(NumericError::Infinite));
    }

    #[test]
    fn length_arithmetic() {
        let a = Length::mm(3.0);
        let b = Length::mm(2.0);

        assert_eq!(a + b, Length::mm(5.0));
        assert_eq!(a - b, Length::mm(1.0));
        assert_eq!(a * 2.0, Length::mm(6.0));
        assert_eq!(2.0 * a, Length::mm(6.0));
        assert_eq!(a / 2.0, Length::mm(1.5));
        assert_eq!(-a, Length::mm(-3.0));
    }

    #[test]
    fn length_units_convert() {
        assert_eq!(Length::inches(1.0), Length::mm(25.4));
        assert!((Length::inches(0.05).raw() - 1.27).abs() < 1e-12);
        assert!((Length::new(72.0, Unit::Point).to(Unit::Inch) - 1.0).abs() < 1e-12);
        assert!((Length::mm(25.4).to(Unit::Point) - 72.0).abs() < 1e-12);
    }

    #[test]
    fn length_checked_div_by_zero() {
        assert_eq!(Length::mm(6.0).checked_div(Length::mm(2.0)), Some(3.0));
        assert_eq!(Length::mm(6.0).checked_div(Length::ZERO), None);
    }

    // ==================== Scaler tests ====================

    #[test]
    fn scaler_try_new_rejects_bad_factors() {
        assert_eq!(Scaler::try_new(0.0), Err(NumericError::Zero));
        assert_eq!(Scaler::try_new(-1.0), Err(NumericError::Negative));
        assert_eq!(Scaler::try_new(f64::NAN), Err(NumericError::NaN));
        assert_eq!(Scaler::try_new(f64::INFINITY), Err(NumericError::Infinite));
    }

    #[test]
    fn scaler_converts_inch_to_points() {
        let scaler = Scaler::points();
        assert!((scaler.px(Length::inches(1.0)) - 72.0).abs() < 1e-12);
    }

    #[test]
    fn scaler_round_trip_is_linear() {
        let scaler = Scaler::points();
        for mm in [0.0, 0.1, 2.5, 69.0, 96.6443, 180.0, 355.6] {
            let back = scaler.from_device(scaler.px(Length::mm(mm)));
            let err = if mm == 0.0 { back.raw().abs() } else { ((back.raw() - mm) / mm).abs() };
            assert!(err < 1e-9, "round trip of {mm} drifted by {err}");
        }
    }

    #[test]
    fn to_device_rejects_negative() {
        let canvas = CanvasSpec::new(Length::mm(70.0), Length::mm(180.0));
        let err = Scaler::points().to_device("x", Length::mm(-0.5), &canvas).unwrap_err();
        assert!(matches!(err, ConfigError::NegativeCoordinate { .. }));
    }

    #[test]
    fn to_device_reports_non_finite_separately() {
        let canvas = CanvasSpec::new(Length::mm(70.0), Length::mm(180.0));
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Scaler::points().to_device("x", Length::mm(bad), &canvas).unwrap_err();
            assert!(matches!(err, ConfigError::NonFiniteCoordinate { .. }), "{bad}: {err:?}");
        }
    }

    #[test]
    fn to_device_accepts_value_within_one_axis() {
        // 100mm is wider than the canvas but shorter than its height.
        let canvas = CanvasSpec::new(Length::mm(70.0), Length::mm(180.0));
        assert!(Scaler::points().to_device("y", Length::mm(100.0), &canvas).is_ok());
    }

    #[test]
    fn to_device_rejects_value_beyond_both_axes() {
        let canvas = CanvasSpec::new(Length::mm(70.0), Length::mm(180.0));
        let err = Scaler::points()
            .to_device("y", Length::inches(8.0), &canvas)
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfBounds { .. }));
    }

    // ==================== Point/Offset tests ====================

    #[test]
    fn point_plus_offset_gives_point() {
        let p = pmm(1.0, 2.0);
        let o = Offset::new(Length::mm(3.0), Length::mm(4.0));
        assert_eq!(p + o, pmm(4.0, 6.0));
    }

    #[test]
    fn point_minus_point_gives_offset() {
        let offset = pmm(5.0, 7.0) - pmm(2.0, 3.0);
        assert_eq!(offset.dx, Length::mm(3.0));
        assert_eq!(offset.dy, Length::mm(4.0));
    }

    #[test]
    fn point_distance() {
        assert!((pmm(0.0, 0.0).distance(pmm(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    // ==================== BBox tests ====================

    #[test]
    fn bbox_new_is_empty() {
        assert!(BoxMm::new().is_empty());
    }

    #[test]
    fn bbox_expand_and_measure() {
        let mut bb = BoxMm::new();
        bb.expand_point(pmm(1.0, 2.0));
        bb.expand_point(pmm(5.0, 8.0));

        assert!(!bb.is_empty());
        assert_eq!(bb.width(), Length::mm(4.0));
        assert_eq!(bb.height(), Length::mm(6.0));
        assert_eq!(bb.center(), pmm(3.0, 5.0));
    }

    #[test]
    fn bbox_expand_box_ignores_empty() {
        let mut bb = BoxMm::from_edges(Length::mm(0.0), Length::mm(0.0), Length::mm(1.0), Length::mm(1.0));
        bb.expand_box(&BoxMm::new());
        assert_eq!(bb.width(), Length::mm(1.0));
    }
}
