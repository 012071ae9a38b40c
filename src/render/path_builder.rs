//! Path builder: turns drawing primitives into immutable contours.
//!
//! The builder mirrors the primitives of a vector drawing context (move, line,
//! relative line, arc in either direction, close, stroke) but instead of
//! painting it appends [`PathSegment`] values. A stroke packages every
//! contour accumulated since the previous stroke into a [`Stroke`] with the
//! active layer and style. Nothing touches a sink until the finished
//! [`Stroke`] list is flushed.
//!
//! # Cursor rules
//!
//! - `line_to` without a current point behaves as `move_to`.
//! - `arc` without a current point starts the contour at the arc's start
//!   point; with a current point it first draws a straight connector to it.
//! - `close_path` appends the closing line explicitly and leaves the cursor
//!   on the contour's start point.
//! - `stroke_with` clears the path and the cursor.

use crate::errors::ShapeError;
use crate::types::{BoxMm, Length, OffsetMm, Pt};

use super::geometry::{Corner, EPSILON, Heading, Sweep, arc_point, axis_extrema, normalize_end_angle};
use super::types::{Layer, LineStyle, Stroke};

/// One piece of a contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    Line {
        to: Pt,
    },
    Arc {
        center: Pt,
        radius: Length,
        start_angle: f64,
        /// Already normalized so that it lies on the `sweep` side of `start_angle`
        end_angle: f64,
        sweep: Sweep,
    },
}

impl PathSegment {
    /// Where the segment begins, if it determines that itself (arcs do, lines don't).
    pub fn start_point(&self) -> Option<Pt> {
        match *self {
            PathSegment::Line { .. } => None,
            PathSegment::Arc {
                center,
                radius,
                start_angle,
                ..
            } => Some(arc_point(center, radius, start_angle)),
        }
    }

    pub fn end_point(&self) -> Pt {
        match *self {
            PathSegment::Line { to } => to,
            PathSegment::Arc {
                center,
                radius,
                end_angle,
                ..
            } => arc_point(center, radius, end_angle),
        }
    }

    pub fn translated(&self, offset: OffsetMm) -> PathSegment {
        match *self {
            PathSegment::Line { to } => PathSegment::Line { to: to + offset },
            PathSegment::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                sweep,
            } => PathSegment::Arc {
                center: center + offset,
                radius,
                start_angle,
                end_angle,
                sweep,
            },
        }
    }

    fn expand_bounds(&self, bb: &mut BoxMm) {
        match *self {
            PathSegment::Line { to } => bb.expand_point(to),
            PathSegment::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                ..
            } => {
                bb.expand_point(arc_point(center, radius, start_angle));
                bb.expand_point(arc_point(center, radius, end_angle));
                for angle in axis_extrema(start_angle, end_angle) {
                    bb.expand_point(arc_point(center, radius, angle));
                }
            }
        }
    }
}

/// A starting point followed by connected segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub start: Pt,
    pub segments: Vec<PathSegment>,
    /// True once `close_path` appended the closing line
    pub closed: bool,
}

impl Contour {
    pub fn new(start: Pt) -> Self {
        Self {
            start,
            segments: Vec::new(),
            closed: false,
        }
    }

    pub fn end_point(&self) -> Pt {
        self.segments.last().map_or(self.start, PathSegment::end_point)
    }

    /// Final segment ends on the start point.
    pub fn is_closed(&self, eps: f64) -> bool {
        !self.segments.is_empty() && self.end_point().approx_eq(self.start, eps)
    }

    /// Every arc begins where the previous segment ended.
    pub fn is_continuous(&self, eps: f64) -> bool {
        let mut cursor = self.start;
        for segment in &self.segments {
            if segment.start_point().is_some_and(|start| !start.approx_eq(cursor, eps)) {
                return false;
            }
            cursor = segment.end_point();
        }
        true
    }

    /// Bounding box, including the extreme points of arcs.
    pub fn bounds(&self) -> BoxMm {
        let mut bb = BoxMm::new();
        bb.expand_point(self.start);
        for segment in &self.segments {
            segment.expand_bounds(&mut bb);
        }
        bb
    }

    pub fn translated(&self, offset: OffsetMm) -> Contour {
        Contour {
            start: self.start + offset,
            segments: self.segments.iter().map(|s| s.translated(offset)).collect(),
            closed: self.closed,
        }
    }

    /// Start point plus every segment end point, in order.
    pub fn vertices(&self) -> impl Iterator<Item = Pt> + '_ {
        std::iter::once(self.start).chain(self.segments.iter().map(PathSegment::end_point))
    }
}

/// Accumulates contours and packages them into strokes.
#[derive(Debug)]
pub struct PathBuilder {
    layer: Layer,
    /// Name of the shape being built, for error messages
    shape: &'static str,
    current: Option<Contour>,
    pending: Vec<Contour>,
    cursor: Option<Pt>,
    strokes: Vec<Stroke>,
}

impl PathBuilder {
    pub fn new(layer: Layer) -> Self {
        Self {
            layer,
            shape: "path",
            current: None,
            pending: Vec::new(),
            cursor: None,
            strokes: Vec::new(),
        }
    }

    pub fn set_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn set_shape(&mut self, shape: &'static str) {
        self.shape = shape;
    }

    pub fn current_point(&self) -> Option<Pt> {
        self.cursor
    }

    /// Strokes emitted so far.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Finish building. An unstroked path is discarded, as a drawing context would.
    pub fn finish(self) -> Vec<Stroke> {
        self.strokes
    }

    fn flush_current(&mut self) {
        if let Some(contour) = self.current.take() {
            if !contour.segments.is_empty() {
                self.pending.push(contour);
            }
        }
    }

    fn push(&mut self, segment: PathSegment) {
        if self.current.is_none() {
            let start = self.cursor.unwrap_or_else(|| segment.end_point());
            self.current = Some(Contour::new(start));
        }
        if let Some(contour) = self.current.as_mut() {
            contour.segments.push(segment);
        }
        self.cursor = Some(segment.end_point());
    }

    pub fn move_to(&mut self, p: Pt) {
        self.flush_current();
        self.current = Some(Contour::new(p));
        self.cursor = Some(p);
    }

    pub fn line_to(&mut self, p: Pt) {
        if self.cursor.is_none() {
            self.move_to(p);
            return;
        }
        self.push(PathSegment::Line { to: p });
    }

    pub fn rel_line_to(&mut self, offset: OffsetMm) -> Result<(), ShapeError> {
        let cursor = self.cursor.ok_or_else(|| ShapeError::NoCurrentPoint {
            shape: self.shape.to_string(),
        })?;
        self.line_to(cursor + offset);
        Ok(())
    }

    fn arc_with(&mut self, center: Pt, radius: Length, start_angle: f64, end_angle: f64, sweep: Sweep) {
        let start = arc_point(center, radius, start_angle);
        match self.cursor {
            None => self.move_to(start),
            Some(cursor) if !cursor.approx_eq(start, EPSILON) => {
                self.push(PathSegment::Line { to: start });
            }
            Some(_) => {}
        }
        if radius == Length::ZERO {
            return;
        }
        self.push(PathSegment::Arc {
            center,
            radius,
            start_angle,
            end_angle: normalize_end_angle(start_angle, end_angle, sweep),
            sweep,
        });
    }

    /// Arc of increasing angle.
    pub fn arc(&mut self, center: Pt, radius: Length, start_angle: f64, end_angle: f64) {
        self.arc_with(center, radius, start_angle, end_angle, Sweep::Positive);
    }

    /// Arc of decreasing angle.
    pub fn arc_negative(&mut self, center: Pt, radius: Length, start_angle: f64, end_angle: f64) {
        self.arc_with(center, radius, start_angle, end_angle, Sweep::Negative);
    }

    /// Round the vertex between two perpendicular edges.
    ///
    /// Draws up to the tangent point on the incoming edge, then the quarter
    /// arc; the cursor ends on the tangent point of the outgoing edge. A zero
    /// radius leaves a sharp corner at `vertex`.
    pub fn corner(&mut self, vertex: Pt, incoming: Heading, outgoing: Heading, radius: Length) -> Result<(), ShapeError> {
        let corner = Corner::new(vertex, incoming, outgoing, radius).ok_or_else(|| ShapeError::InvalidTurn {
            shape: self.shape.to_string(),
            incoming: incoming.to_string(),
            outgoing: outgoing.to_string(),
        })?;
        if radius == Length::ZERO {
            self.line_to(vertex);
            return Ok(());
        }
        self.arc_with(corner.center, radius, corner.start_angle, corner.end_angle, corner.sweep);
        Ok(())
    }

    pub fn close_path(&mut self) {
        if let Some(mut contour) = self.current.take() {
            let start = contour.start;
            contour.segments.push(PathSegment::Line { to: start });
            contour.closed = true;
            self.pending.push(contour);
            self.cursor = Some(start);
        }
    }

    /// Emit everything accumulated since the last stroke with `style`.
    pub fn stroke_with(&mut self, style: LineStyle) {
        self.flush_current();
        self.cursor = None;
        if self.pending.is_empty() {
            return;
        }
        let contours = std::mem::take(&mut self.pending);
        self.strokes.push(Stroke {
            layer: self.layer,
            style,
            contours,
        });
    }
}
