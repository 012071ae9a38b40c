//! Canvas sink abstraction and the flush from a [`Drawing`] to sink calls.
//!
//! A sink is an imperative vector surface in device units (points). The
//! drawing is converted and bounds-checked in full before the sink sees a
//! single call, so a bad dimension never leaves a half-written artifact.

use glam::DVec2;

use crate::errors::ConfigError;
use crate::types::{CanvasSpec, Scaler};

use super::path_builder::PathSegment;
use super::types::{Drawing, Rgba};
use super::geometry::Sweep;

/// A stateful vector drawing surface. All coordinates are device scalars.
pub trait Canvas {
    fn set_line_style(&mut self, width: f64, color: Rgba, dash: Option<(f64, f64)>);
    fn move_to(&mut self, p: DVec2);
    fn line_to(&mut self, p: DVec2);
    fn rel_line_to(&mut self, d: DVec2);
    /// Increasing-angle arc
    fn arc(&mut self, center: DVec2, radius: f64, start_angle: f64, end_angle: f64);
    /// Decreasing-angle arc
    fn arc_negative(&mut self, center: DVec2, radius: f64, start_angle: f64, end_angle: f64);
    fn close_path(&mut self);
    fn stroke(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, d: DVec2);
}

/// One sink call, as data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasOp {
    SetLineStyle {
        width: f64,
        color: Rgba,
        dash: Option<(f64, f64)>,
    },
    MoveTo(DVec2),
    LineTo(DVec2),
    RelLineTo(DVec2),
    Arc {
        center: DVec2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    ArcNegative {
        center: DVec2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    ClosePath,
    Stroke,
    Save,
    Restore,
    Translate(DVec2),
}

impl CanvasOp {
    pub fn apply<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        match *self {
            CanvasOp::SetLineStyle { width, color, dash } => canvas.set_line_style(width, color, dash),
            CanvasOp::MoveTo(p) => canvas.move_to(p),
            CanvasOp::LineTo(p) => canvas.line_to(p),
            CanvasOp::RelLineTo(d) => canvas.rel_line_to(d),
            CanvasOp::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => canvas.arc(center, radius, start_angle, end_angle),
            CanvasOp::ArcNegative {
                center,
                radius,
                start_angle,
                end_angle,
            } => canvas.arc_negative(center, radius, start_angle, end_angle),
            CanvasOp::ClosePath => canvas.close_path(),
            CanvasOp::Stroke => canvas.stroke(),
            CanvasOp::Save => canvas.save(),
            CanvasOp::Restore => canvas.restore(),
            CanvasOp::Translate(d) => canvas.translate(d),
        }
    }
}

/// Convert a drawing into sink calls, checking every coordinate against `canvas`.
pub fn device_ops(drawing: &Drawing, scaler: &Scaler, canvas: &CanvasSpec) -> Result<Vec<CanvasOp>, ConfigError> {
    let mut ops = Vec::new();
    for stroke in &drawing.strokes {
        let what = stroke.layer.name();
        let style = &stroke.style;
        let dash = match style.dash {
            Some((on, off)) => Some((
                scaler.to_device("dash length", on, canvas)?,
                scaler.to_device("dash gap", off, canvas)?,
            )),
            None => None,
        };
        ops.push(CanvasOp::SetLineStyle {
            width: scaler.to_device("line width", style.width, canvas)?,
            color: style.color,
            dash,
        });

        for contour in &stroke.contours {
            ops.push(CanvasOp::MoveTo(scaler.point(what, contour.start, canvas)?));
            // The closing line is implied by close_path.
            let segments = match contour.segments.split_last() {
                Some((PathSegment::Line { .. }, rest)) if contour.closed => rest,
                _ => &contour.segments[..],
            };
            for segment in segments {
                ops.push(match *segment {
                    PathSegment::Line { to } => CanvasOp::LineTo(scaler.point(what, to, canvas)?),
                    PathSegment::Arc {
                        center,
                        radius,
                        start_angle,
                        end_angle,
                        sweep,
                    } => {
                        let center = scaler.point(what, center, canvas)?;
                        let radius = scaler.to_device(what, radius, canvas)?;
                        match sweep {
                            Sweep::Positive => CanvasOp::Arc {
                                center,
                                radius,
                                start_angle,
                                end_angle,
                            },
                            Sweep::Negative => CanvasOp::ArcNegative {
                                center,
                                radius,
                                start_angle,
                                end_angle,
                            },
                        }
                    }
                });
            }
            if contour.closed {
                ops.push(CanvasOp::ClosePath);
            }
        }
        ops.push(CanvasOp::Stroke);
    }
    Ok(ops)
}

pub fn replay<C: Canvas + ?Sized>(ops: &[CanvasOp], canvas: &mut C) {
    for op in ops {
        op.apply(canvas);
    }
}

/// Validate the whole drawing, then emit it.
pub fn flush<C: Canvas + ?Sized>(
    drawing: &Drawing,
    scaler: &Scaler,
    canvas_spec: &CanvasSpec,
    canvas: &mut C,
) -> Result<(), ConfigError> {
    let ops = device_ops(drawing, scaler, canvas_spec)?;
    replay(&ops, canvas);
    Ok(())
}

/// Sink that records calls with the current translation already applied.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    pub ops: Vec<CanvasOp>,
    translation: DVec2,
    saved: Vec<DVec2>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls between each `Save` and its `Restore`.
    pub fn cells(&self) -> Vec<&[CanvasOp]> {
        let mut cells = Vec::new();
        let mut start = None;
        for (i, op) in self.ops.iter().enumerate() {
            match op {
                CanvasOp::Save => start = Some(i + 1),
                CanvasOp::Restore => {
                    if let Some(s) = start.take() {
                        cells.push(&self.ops[s..i]);
                    }
                }
                _ => {}
            }
        }
        cells
    }

    pub fn stroke_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, CanvasOp::Stroke)).count()
    }
}

impl Canvas for RecordingCanvas {
    fn set_line_style(&mut self, width: f64, color: Rgba, dash: Option<(f64, f64)>) {
        self.ops.push(CanvasOp::SetLineStyle { width, color, dash });
    }

    fn move_to(&mut self, p: DVec2) {
        self.ops.push(CanvasOp::MoveTo(p + self.translation));
    }

    fn line_to(&mut self, p: DVec2) {
        self.ops.push(CanvasOp::LineTo(p + self.translation));
    }

    fn rel_line_to(&mut self, d: DVec2) {
        self.ops.push(CanvasOp::RelLineTo(d));
    }

    fn arc(&mut self, center: DVec2, radius: f64, start_angle: f64, end_angle: f64) {
        self.ops.push(CanvasOp::Arc {
            center: center + self.translation,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn arc_negative(&mut self, center: DVec2, radius: f64, start_angle: f64, end_angle: f64) {
        self.ops.push(CanvasOp::ArcNegative {
            center: center + self.translation,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn close_path(&mut self) {
        self.ops.push(CanvasOp::ClosePath);
    }

    fn stroke(&mut self) {
        self.ops.push(CanvasOp::Stroke);
    }

    fn save(&mut self) {
        self.saved.push(self.translation);
        self.ops.push(CanvasOp::Save);
    }

    fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.translation = t;
        }
        self.ops.push(CanvasOp::Restore);
    }

    fn translate(&mut self, d: DVec2) {
        self.translation += d;
        self.ops.push(CanvasOp::Translate(d));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::defaults::CUT_STYLE;
    use crate::render::path_builder::PathBuilder;
    use crate::render::types::Layer;
    use crate::types::{Length, pmm};
    use glam::dvec2;

    fn canvas() -> CanvasSpec {
        CanvasSpec::new(Length::mm(70.0), Length::mm(180.0))
    }

    fn square(at: f64) -> Drawing {
        let mut path = PathBuilder::new(Layer::Slots);
        path.move_to(pmm(at, at));
        path.line_to(pmm(at + 1.0, at));
        path.line_to(pmm(at + 1.0, at + 1.0));
        path.close_path();
        path.stroke_with(CUT_STYLE);
        Drawing {
            strokes: path.finish(),
        }
    }

    #[test]
    fn closed_contour_uses_close_path() {
        let ops = device_ops(&square(10.0), &Scaler::points(), &canvas()).unwrap();
        assert!(matches!(ops[0], CanvasOp::SetLineStyle { .. }));
        assert!(matches!(ops[1], CanvasOp::MoveTo(_)));
        assert_eq!(ops.len(), 6);
        assert_eq!(ops[4], CanvasOp::ClosePath);
        assert_eq!(ops[5], CanvasOp::Stroke);
    }

    #[test]
    fn coordinates_are_in_points() {
        let ops = device_ops(&square(25.4), &Scaler::points(), &canvas()).unwrap();
        match ops[1] {
            CanvasOp::MoveTo(p) => assert!((p - dvec2(72.0, 72.0)).length() < 1e-9),
            other => panic!("expected move, got {other:?}"),
        }
    }

    #[test]
    fn negative_coordinate_aborts_before_any_call() {
        let mut drawing = square(10.0);
        drawing.extend(square(-2.0).strokes);
        let mut sink = RecordingCanvas::new();
        let err = flush(&drawing, &Scaler::points(), &canvas(), &mut sink).unwrap_err();
        assert!(matches!(err, ConfigError::NegativeCoordinate { .. }));
        assert!(sink.ops.is_empty());
    }

    #[test]
    fn recording_applies_translation_until_restore() {
        let mut sink = RecordingCanvas::new();
        sink.save();
        sink.translate(dvec2(10.0, 0.0));
        sink.move_to(dvec2(1.0, 1.0));
        sink.restore();
        sink.move_to(dvec2(1.0, 1.0));

        assert_eq!(sink.ops[2], CanvasOp::MoveTo(dvec2(11.0, 1.0)));
        assert_eq!(sink.ops[4], CanvasOp::MoveTo(dvec2(1.0, 1.0)));
        assert_eq!(sink.cells().len(), 1);
    }
}
