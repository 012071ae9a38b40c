//! Parametric shapes
//!
//! Each shape is its own type that knows how to:
//! - Check that its dimensions can be drawn
//! - Append its contours to a [`PathBuilder`] and stroke them
//!
//! [`ShapeEnum`] gives uniform storage; calls go through `enum_dispatch`.

use std::f64::consts::{FRAC_PI_4, TAU};

use enum_dispatch::enum_dispatch;

use crate::errors::ShapeError;
use crate::types::{BoxMm, CanvasSpec, Length, OffsetMm, Pt, Point};

use super::defaults::MAX_GRID_LINES;
use super::geometry::Heading;
use super::path_builder::PathBuilder;
use super::types::{Layer, LineStyle, MountingHole};

/// Common behavior for all shapes
#[enum_dispatch]
pub trait Shape {
    /// Human-readable name used in error messages
    fn name(&self) -> &'static str;

    /// Layer the strokes are emitted on
    fn layer(&self) -> Layer;

    /// Append and stroke this shape's contours.
    fn build(&self, path: &mut PathBuilder) -> Result<(), ShapeError>;
}

fn degenerate(shape: &str, radius: Length, width: Length, height: Length) -> ShapeError {
    ShapeError::DegenerateCorner {
        shape: shape.to_string(),
        radius: radius.raw(),
        width: width.raw(),
        height: height.raw(),
    }
}

/// Fail unless `radius` fits a `width` x `height` feature. Never clamps.
fn check_corner(shape: &str, radius: Length, width: Length, height: Length) -> Result<(), ShapeError> {
    if radius < Length::ZERO || !radius.is_finite() {
        return Err(ShapeError::NegativeDimension {
            shape: shape.to_string(),
            what: "corner radius".to_string(),
        });
    }
    if width < Length::ZERO || height < Length::ZERO {
        return Err(ShapeError::NegativeDimension {
            shape: shape.to_string(),
            what: "extent".to_string(),
        });
    }
    if radius > width.min(height) / 2.0 {
        return Err(degenerate(shape, radius, width, height));
    }
    Ok(())
}

// ============================================================================
// Shape Types
// ============================================================================

/// Rectangle with four convex quarter-round corners. Radius 0 gives sharp corners.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRect {
    pub rect: BoxMm,
    pub radius: Length,
    pub layer: Layer,
    pub style: LineStyle,
}

impl RoundedRect {
    pub fn new(rect: BoxMm, radius: Length, layer: Layer, style: LineStyle) -> Self {
        Self {
            rect,
            radius,
            layer,
            style,
        }
    }

    pub fn sharp(rect: BoxMm, layer: Layer, style: LineStyle) -> Self {
        Self::new(rect, Length::ZERO, layer, style)
    }
}

impl Shape for RoundedRect {
    fn name(&self) -> &'static str {
        "rounded rectangle"
    }

    fn layer(&self) -> Layer {
        self.layer
    }

    fn build(&self, path: &mut PathBuilder) -> Result<(), ShapeError> {
        let r = self.radius;
        let (left, top, right, bottom) = (self.rect.left(), self.rect.top(), self.rect.right(), self.rect.bottom());
        check_corner(self.name(), r, self.rect.width(), self.rect.height())?;

        // Start on the left edge and walk clockwise on screen.
        path.move_to(Point::new(left, bottom - r));
        path.corner(Point::new(left, top), Heading::North, Heading::East, r)?;
        path.corner(Point::new(right, top), Heading::East, Heading::South, r)?;
        path.corner(Point::new(right, bottom), Heading::South, Heading::West, r)?;
        path.corner(Point::new(left, bottom), Heading::West, Heading::North, r)?;
        path.close_path();
        path.stroke_with(self.style);
        Ok(())
    }
}

/// Clearance hole with optional screw guide and hex-nut outline.
#[derive(Debug, Clone, PartialEq)]
pub struct MountingHoleShape {
    pub hole: MountingHole,
    pub center: Pt,
    pub guides: bool,
    pub guide_style: LineStyle,
    pub cut_style: LineStyle,
}

impl MountingHoleShape {
    /// Vertices of the flat-top hexagon whose flats are `nut_width` apart.
    pub fn nut_vertices(center: Pt, nut_width: Length) -> [Pt; 6] {
        let circumradius = nut_width / 3.0_f64.sqrt();
        std::array::from_fn(|k| {
            let angle = k as f64 * TAU / 6.0;
            center + OffsetMm::new(circumradius * angle.cos(), circumradius * angle.sin())
        })
    }
}

impl Shape for MountingHoleShape {
    fn name(&self) -> &'static str {
        self.hole.name
    }

    fn layer(&self) -> Layer {
        Layer::Holes
    }

    fn build(&self, path: &mut PathBuilder) -> Result<(), ShapeError> {
        self.hole.validate()?;
        if self.guides {
            path.arc(self.center, self.hole.screw_diameter / 2.0, 0.0, TAU);
            path.stroke_with(self.guide_style);

            if let Some((nut_width, _)) = self.hole.nut() {
                let [first, rest @ ..] = Self::nut_vertices(self.center, nut_width);
                path.move_to(first);
                for vertex in rest {
                    path.line_to(vertex);
                }
                path.close_path();
                path.stroke_with(self.guide_style);
            }
        }

        // The cut circle is always last.
        path.arc(self.center, self.hole.hole_diameter / 2.0, 0.0, TAU);
        path.stroke_with(self.cut_style);
        Ok(())
    }
}

/// U-shaped servo holder: two prongs either side of a rectangular notch.
#[derive(Debug, Clone, PartialEq)]
pub struct ServoHolderInset {
    pub left: Length,
    pub bottom: Length,
    /// Overall width
    pub width_major: Length,
    /// Width of each prong
    pub width_minor: Length,
    pub height: Length,
    pub radius: Length,
    pub style: LineStyle,
}

impl ServoHolderInset {
    pub fn top(&self) -> Length {
        self.bottom - self.height
    }

    pub fn right(&self) -> Length {
        self.left + self.width_major
    }

    /// y of the notch floor; the notch is `width_minor` above the bottom edge.
    pub fn notch_floor(&self) -> Length {
        self.bottom - self.width_minor
    }
}

impl Shape for ServoHolderInset {
    fn name(&self) -> &'static str {
        "servo holder inset"
    }

    fn layer(&self) -> Layer {
        Layer::ServoHolder
    }

    fn build(&self, path: &mut PathBuilder) -> Result<(), ShapeError> {
        let r = self.radius;
        let (left, right, top, bottom) = (self.left, self.right(), self.top(), self.bottom);
        let left_prong_right = left + self.width_minor;
        let right_prong_left = right - self.width_minor;
        let floor = self.notch_floor();

        check_corner(self.name(), r, self.width_major, self.height)?;
        check_corner(self.name(), r, self.width_minor, floor - top)?;
        if right_prong_left < left_prong_right {
            return Err(ShapeError::NegativeDimension {
                shape: self.name().to_string(),
                what: "notch width".to_string(),
            });
        }

        path.corner(Point::new(left, bottom), Heading::West, Heading::North, r)?;
        path.corner(Point::new(left, top), Heading::North, Heading::East, r)?;
        path.corner(Point::new(left_prong_right, top), Heading::East, Heading::South, r)?;
        // Notch walls and floor are square.
        path.line_to(Point::new(left_prong_right, floor));
        path.line_to(Point::new(right_prong_left, floor));
        path.corner(Point::new(right_prong_left, top), Heading::North, Heading::East, r)?;
        path.corner(Point::new(right, top), Heading::East, Heading::South, r)?;
        path.corner(Point::new(right, bottom), Heading::South, Heading::West, r)?;
        path.line_to(Point::new(left + r, bottom));
        path.close_path();
        path.stroke_with(self.style);
        Ok(())
    }
}

/// Reference outline of the controller board with its two angled notches.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSilhouette {
    pub left: Length,
    pub top: Length,
    pub width: Length,
    /// Depth of the straight right edge, up to the notches
    pub breadth: Length,
    pub recessed_long: Length,
    pub angled: Length,
    pub extended: Length,
    pub recessed_short: Length,
    pub style: LineStyle,
}

impl Shape for BoardSilhouette {
    fn name(&self) -> &'static str {
        "board silhouette"
    }

    fn layer(&self) -> Layer {
        Layer::BoardOutline
    }

    fn build(&self, path: &mut PathBuilder) -> Result<(), ShapeError> {
        let right = self.left + self.width;
        let diag_x = self.angled * FRAC_PI_4.cos();
        let diag_y = self.angled * FRAC_PI_4.sin();

        path.move_to(Point::new(self.left, self.top));
        path.line_to(Point::new(right, self.top));
        path.line_to(Point::new(right, self.top + self.breadth));
        path.rel_line_to(OffsetMm::new(-self.recessed_long, Length::ZERO))?;
        path.rel_line_to(OffsetMm::new(-diag_x, diag_y))?;
        path.rel_line_to(OffsetMm::new(-self.extended, Length::ZERO))?;
        path.rel_line_to(OffsetMm::new(-diag_x, -diag_y))?;
        path.rel_line_to(OffsetMm::new(-self.recessed_short, Length::ZERO))?;
        path.close_path();
        path.stroke_with(self.style);
        Ok(())
    }
}

/// One family of grid lines spanning `extent`, each line stroked on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLines {
    pub extent: CanvasSpec,
    pub pitch: Length,
    pub layer: Layer,
    pub style: LineStyle,
}

impl GridLines {
    /// Lines needed to cover `0..=extent` at this pitch. `None` for a pitch
    /// that cannot be drawn or would exceed [`MAX_GRID_LINES`].
    pub fn line_count(&self, extent: Length) -> Option<usize> {
        let ratio = extent.checked_div(self.pitch)?;
        if !ratio.is_finite() || ratio < 0.0 || ratio >= MAX_GRID_LINES as f64 {
            return None;
        }
        Some((ratio + 1e-9).floor() as usize + 1)
    }
}

impl Shape for GridLines {
    fn name(&self) -> &'static str {
        match self.layer {
            Layer::MinorGrid => "minor grid",
            _ => "major grid",
        }
    }

    fn layer(&self) -> Layer {
        self.layer
    }

    fn build(&self, path: &mut PathBuilder) -> Result<(), ShapeError> {
        let invalid = || ShapeError::NegativeDimension {
            shape: self.name().to_string(),
            what: "pitch".to_string(),
        };
        if self.pitch <= Length::ZERO || !self.pitch.is_finite() {
            return Err(invalid());
        }
        let longest = self.extent.width.max(self.extent.height);
        if longest.checked_div(self.pitch).is_some_and(|r| r >= MAX_GRID_LINES as f64) {
            return Err(ShapeError::GridTooDense {
                shape: self.name().to_string(),
                pitch: self.pitch.raw(),
                limit: MAX_GRID_LINES,
            });
        }
        let columns = self.line_count(self.extent.width).ok_or_else(invalid)?;
        let rows = self.line_count(self.extent.height).ok_or_else(invalid)?;

        for i in 0..columns {
            let x = self.pitch * i as f64;
            path.move_to(Point::new(x, Length::ZERO));
            path.line_to(Point::new(x, self.extent.height));
            path.stroke_with(self.style);
        }
        for j in 0..rows {
            let y = self.pitch * j as f64;
            path.move_to(Point::new(Length::ZERO, y));
            path.line_to(Point::new(self.extent.width, y));
            path.stroke_with(self.style);
        }
        Ok(())
    }
}

/// Chassis plate: two servo-mount bumps on top, a caster extrusion below.
#[derive(Debug, Clone, PartialEq)]
pub struct ChassisOutline {
    pub left: Length,
    pub right: Length,
    pub top: Length,
    pub bottom: Length,
    /// Top edge of both servo-mount bumps
    pub mount_top: Length,
    pub left_mount_right: Length,
    pub right_mount_left: Length,
    pub extrusion_left: Length,
    pub extrusion_right: Length,
    pub extrusion_bottom: Length,
    pub radius: Length,
    pub style: LineStyle,
}

impl ChassisOutline {
    fn check(&self) -> Result<(), ShapeError> {
        let name = self.name();
        let r = self.radius;
        let bump_height = self.top - self.mount_top;
        let extrusion_depth = self.extrusion_bottom - self.bottom;
        check_corner(name, r, self.left_mount_right - self.left, bump_height)?;
        check_corner(name, r, self.right - self.right_mount_left, bump_height)?;
        check_corner(name, r, self.right_mount_left - self.left_mount_right, bump_height)?;
        check_corner(name, r, self.right - self.left, self.bottom - self.mount_top)?;
        check_corner(name, r, self.extrusion_right - self.extrusion_left, extrusion_depth)?;
        check_corner(name, r, self.extrusion_left - self.left, extrusion_depth)?;
        check_corner(name, r, self.right - self.extrusion_right, extrusion_depth)?;
        Ok(())
    }
}

impl Shape for ChassisOutline {
    fn name(&self) -> &'static str {
        "chassis outline"
    }

    fn layer(&self) -> Layer {
        Layer::Outline
    }

    fn build(&self, path: &mut PathBuilder) -> Result<(), ShapeError> {
        use Heading::{East, North, South, West};

        self.check()?;
        let r = self.radius;
        let p = Point::new;

        // Left servo-mount bump
        path.corner(p(self.left, self.mount_top), North, East, r)?;
        path.corner(p(self.left_mount_right, self.mount_top), East, South, r)?;
        path.corner(p(self.left_mount_right, self.top), South, East, r)?;
        // Chassis top between the bumps, then the right bump
        path.corner(p(self.right_mount_left, self.top), East, North, r)?;
        path.corner(p(self.right_mount_left, self.mount_top), North, East, r)?;
        path.corner(p(self.right, self.mount_top), East, South, r)?;
        path.corner(p(self.right, self.bottom), South, West, r)?;
        // Caster extrusion
        path.corner(p(self.extrusion_right, self.bottom), West, South, r)?;
        path.corner(p(self.extrusion_right, self.extrusion_bottom), South, West, r)?;
        path.corner(p(self.extrusion_left, self.extrusion_bottom), West, North, r)?;
        path.corner(p(self.extrusion_left, self.bottom), North, West, r)?;
        path.corner(p(self.left, self.bottom), West, North, r)?;
        path.close_path();
        path.stroke_with(self.style);
        Ok(())
    }
}

// ============================================================================
// Shape Enum
// ============================================================================

/// A shape enum wrapping all shape types
#[enum_dispatch(Shape)]
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeEnum {
    RoundedRect,
    MountingHoleShape,
    ServoHolderInset,
    BoardSilhouette,
    GridLines,
    ChassisOutline,
}

impl ShapeEnum {
    /// Build onto `path` with the shape's own layer and name.
    pub fn draw(&self, path: &mut PathBuilder) -> Result<(), ShapeError> {
        path.set_layer(self.layer());
        path.set_shape(self.name());
        self.build(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;
    use crate::render::defaults::{CUT_STYLE, GUIDE_STYLE, M2_MOUNTING_HOLE, M3_MOUNTING_HOLE};
    use crate::render::path_builder::PathSegment;
    use crate::render::types::Stroke;
    use crate::types::pmm;

    fn mm(v: f64) -> Length {
        Length::mm(v)
    }

    fn strokes_of(shape: impl Into<ShapeEnum>) -> Result<Vec<Stroke>, ShapeError> {
        let shape = shape.into();
        let mut path = PathBuilder::new(shape.layer());
        shape.draw(&mut path)?;
        Ok(path.finish())
    }

    fn arc_count(stroke: &Stroke) -> usize {
        stroke.contours[0]
            .segments
            .iter()
            .filter(|s| matches!(s, PathSegment::Arc { .. }))
            .count()
    }

    // ==================== RoundedRect tests ====================

    #[test]
    fn rounded_rect_is_one_closed_contour_with_four_arcs() {
        let rect = BoxMm::from_edges(mm(10.0), mm(20.0), mm(40.0), mm(35.0));
        let strokes = strokes_of(RoundedRect::new(rect, mm(2.5), Layer::Outline, CUT_STYLE)).unwrap();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].contours.len(), 1);
        let contour = &strokes[0].contours[0];
        assert!(contour.is_closed(1e-6));
        assert!(contour.is_continuous(1e-6));
        assert_eq!(arc_count(&strokes[0]), 4);

        let bb = contour.bounds();
        assert!(bb.width().approx_eq(mm(30.0), 1e-9));
        assert!(bb.height().approx_eq(mm(15.0), 1e-9));
    }

    #[test]
    fn rounded_rect_radius_at_limit_is_allowed() {
        let rect = BoxMm::from_edges(mm(0.0), mm(0.0), mm(10.0), mm(5.0));
        assert!(strokes_of(RoundedRect::new(rect, mm(2.5), Layer::Outline, CUT_STYLE)).is_ok());
    }

    #[test]
    fn rounded_rect_rejects_oversized_radius() {
        let rect = BoxMm::from_edges(mm(0.0), mm(0.0), mm(10.0), mm(4.0));
        let err = strokes_of(RoundedRect::new(rect, mm(2.5), Layer::Outline, CUT_STYLE)).unwrap_err();
        assert_eq!(
            err,
            ShapeError::DegenerateCorner {
                shape: "rounded rectangle".to_string(),
                radius: 2.5,
                width: 10.0,
                height: 4.0,
            }
        );
    }

    #[test]
    fn zero_radius_rect_is_four_straight_edges() {
        let rect = BoxMm::from_edges(mm(1.0), mm(2.0), mm(3.0), mm(8.0));
        let strokes = strokes_of(RoundedRect::sharp(rect, Layer::Slots, CUT_STYLE)).unwrap();
        let contour = &strokes[0].contours[0];
        assert_eq!(arc_count(&strokes[0]), 0);
        assert_eq!(contour.start, pmm(1.0, 8.0));
        let corners: Vec<Pt> = contour.vertices().take(5).collect();
        assert_eq!(
            corners,
            vec![pmm(1.0, 8.0), pmm(1.0, 2.0), pmm(3.0, 2.0), pmm(3.0, 8.0), pmm(1.0, 8.0)]
        );
        assert!(contour.closed);
    }

    // ==================== MountingHole tests ====================

    fn hole_at(hole: MountingHole, guides: bool) -> MountingHoleShape {
        MountingHoleShape {
            hole,
            center: pmm(10.0, 10.0),
            guides,
            guide_style: GUIDE_STYLE,
            cut_style: CUT_STYLE,
        }
    }

    #[test]
    fn m3_hole_with_guides_emits_guide_nut_cut() {
        let strokes = strokes_of(hole_at(M3_MOUNTING_HOLE, true)).unwrap();
        assert_eq!(strokes.len(), 3);
        assert_eq!(strokes[0].style, GUIDE_STYLE);
        assert_eq!(strokes[1].style, GUIDE_STYLE);
        assert_eq!(strokes[2].style, CUT_STYLE);

        let guide = strokes[0].contours[0].bounds();
        assert!(guide.width().approx_eq(mm(3.0), 1e-9));
        assert_eq!(strokes[1].contours[0].segments.len(), 6);
        let cut = strokes[2].contours[0].bounds();
        assert!(cut.width().approx_eq(mm(3.125), 1e-9));
    }

    #[test]
    fn hole_without_guides_is_cut_only() {
        let strokes = strokes_of(hole_at(M3_MOUNTING_HOLE, false)).unwrap();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].style, CUT_STYLE);
    }

    #[test]
    fn hole_without_nut_skips_hexagon() {
        let strokes = strokes_of(hole_at(M3_MOUNTING_HOLE.without_nut("plain"), true)).unwrap();
        assert_eq!(strokes.len(), 2);
    }

    #[test]
    fn half_specified_nut_fails_instead_of_dropping_the_hexagon() {
        let mut hole = M3_MOUNTING_HOLE;
        hole.nut_height = None;
        let mut path = PathBuilder::new(Layer::Holes);
        let err = ShapeEnum::from(hole_at(hole, true)).draw(&mut path).unwrap_err();
        assert_eq!(
            err,
            ShapeError::InvalidHole(ConfigError::IncompleteNutSpec { hole: "M3".to_string() })
        );
        assert!(path.finish().is_empty());
    }

    #[test]
    fn hole_smaller_than_screw_is_rejected() {
        let mut hole = M3_MOUNTING_HOLE;
        hole.hole_diameter = mm(1.0);
        let err = strokes_of(hole_at(hole, false)).unwrap_err();
        assert!(
            matches!(err, ShapeError::InvalidHole(ConfigError::HoleSmallerThanScrew { .. })),
            "{err:?}"
        );
    }

    #[test]
    fn nut_is_flat_top_with_requested_flats() {
        let vertices = MountingHoleShape::nut_vertices(pmm(0.0, 0.0), M2_MOUNTING_HOLE.nut_width.unwrap());
        // Vertices 4 and 5 form the top flat.
        assert!(vertices[4].y.approx_eq(vertices[5].y, 1e-12));
        assert!(vertices[1].y.approx_eq(vertices[2].y, 1e-12));
        let flats = vertices[1].y - vertices[4].y;
        assert!(flats.approx_eq(mm(4.0), 1e-9));
    }

    // ==================== ServoHolderInset tests ====================

    fn inset() -> ServoHolderInset {
        ServoHolderInset {
            left: mm(17.75),
            bottom: mm(37.93),
            width_major: mm(34.5),
            width_minor: mm(6.0),
            height: mm(19.07),
            radius: mm(2.5),
            style: CUT_STYLE,
        }
    }

    #[test]
    fn servo_inset_is_closed_u() {
        let strokes = strokes_of(inset()).unwrap();
        let contour = &strokes[0].contours[0];
        assert!(contour.is_closed(1e-6));
        assert!(contour.is_continuous(1e-6));
        assert_eq!(arc_count(&strokes[0]), 6);

        let bb = contour.bounds();
        assert!(bb.width().approx_eq(mm(34.5), 1e-9));
        assert!(bb.height().approx_eq(mm(19.07), 1e-9));
        // Notch floor is reached.
        assert!(contour.vertices().any(|v| v.y.approx_eq(mm(31.93), 1e-9)));
    }

    #[test]
    fn servo_inset_rejects_prongs_thinner_than_corners() {
        let mut narrow = inset();
        narrow.width_minor = mm(4.0);
        assert!(matches!(
            strokes_of(narrow),
            Err(ShapeError::DegenerateCorner { .. })
        ));
    }

    // ==================== BoardSilhouette tests ====================

    #[test]
    fn board_silhouette_has_two_angled_notches() {
        let board = BoardSilhouette {
            left: mm(7.85),
            top: mm(64.0),
            width: mm(53.3),
            breadth: mm(66.3),
            recessed_long: mm(12.404),
            angled: mm(3.25),
            extended: mm(33.5),
            recessed_short: mm(2.5),
            style: CUT_STYLE,
        };
        let strokes = strokes_of(board).unwrap();
        let contour = &strokes[0].contours[0];
        assert_eq!(strokes[0].layer, Layer::BoardOutline);
        assert!(contour.is_closed(1e-6));
        // Two straight + five relative segments + the closing line
        assert_eq!(contour.segments.len(), 8);

        let bb = contour.bounds();
        let notch_depth = 3.25 * FRAC_PI_4.sin();
        assert!(bb.bottom().approx_eq(mm(64.0 + 66.3 + notch_depth), 1e-9));
    }

    // ==================== GridLines tests ====================

    #[test]
    fn grid_covers_extent_inclusive() {
        let grid = GridLines {
            extent: CanvasSpec::new(mm(70.0), mm(180.0)),
            pitch: mm(5.0),
            layer: Layer::MajorGrid,
            style: CUT_STYLE,
        };
        assert_eq!(grid.line_count(mm(70.0)), Some(15));
        assert_eq!(grid.line_count(mm(180.0)), Some(37));
        let strokes = strokes_of(grid).unwrap();
        assert_eq!(strokes.len(), 52);
        assert!(strokes.iter().all(|s| s.layer == Layer::MajorGrid));
    }

    #[test]
    fn grid_rejects_zero_pitch() {
        let grid = GridLines {
            extent: CanvasSpec::new(mm(70.0), mm(180.0)),
            pitch: Length::ZERO,
            layer: Layer::MinorGrid,
            style: CUT_STYLE,
        };
        assert!(matches!(strokes_of(grid), Err(ShapeError::NegativeDimension { .. })));
    }

    #[test]
    fn grid_rejects_pitch_beyond_line_limit() {
        let grid = GridLines {
            extent: CanvasSpec::new(mm(70.0), mm(180.0)),
            pitch: mm(1e-9),
            layer: Layer::MinorGrid,
            style: CUT_STYLE,
        };
        assert_eq!(grid.line_count(mm(180.0)), None);
        assert!(matches!(strokes_of(grid), Err(ShapeError::GridTooDense { .. })));
    }
}
