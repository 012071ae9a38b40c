//! Geometry helpers: arc endpoints, the rounded-corner table, SVG arc flags.
//!
//! All angles are radians measured from +x. The canvas is y-down, so a
//! positive sweep runs clockwise on screen.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

use glam::{DVec2, dvec2};

use crate::types::{Length, OffsetMm, Pt};

/// Tolerance for point equality, in millimetres.
pub const EPSILON: f64 = 1e-6;

/// Direction an arc is swept in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sweep {
    /// Increasing angle
    Positive,
    /// Decreasing angle
    Negative,
}

/// Bring `end` onto the correct side of `start` for `sweep`, adding or
/// subtracting whole turns. A positive arc from 0 to 2π stays a full turn.
pub fn normalize_end_angle(start: f64, end: f64, sweep: Sweep) -> f64 {
    let mut end = end;
    match sweep {
        Sweep::Positive => {
            while end < start {
                end += TAU;
            }
        }
        Sweep::Negative => {
            while end > start {
                end -= TAU;
            }
        }
    }
    end
}

/// Point on the circle at `angle`.
pub fn arc_point(center: Pt, radius: Length, angle: f64) -> Pt {
    center + OffsetMm::new(radius * angle.cos(), radius * angle.sin())
}

/// Axis-aligned edge direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    East,
    South,
    West,
    North,
}

impl Heading {
    /// Unit vector on the y-down canvas.
    pub fn unit(self) -> DVec2 {
        match self {
            Heading::East => dvec2(1.0, 0.0),
            Heading::South => dvec2(0.0, 1.0),
            Heading::West => dvec2(-1.0, 0.0),
            Heading::North => dvec2(0.0, -1.0),
        }
    }

    /// Angle of the unit vector, in `[0, 2π)`.
    pub fn angle(self) -> f64 {
        match self {
            Heading::East => 0.0,
            Heading::South => FRAC_PI_2,
            Heading::West => PI,
            Heading::North => 3.0 * FRAC_PI_2,
        }
    }

    pub fn reversed(self) -> Heading {
        match self {
            Heading::East => Heading::West,
            Heading::South => Heading::North,
            Heading::West => Heading::East,
            Heading::North => Heading::South,
        }
    }

    /// Sweep of the quarter arc that turns from `self` into `outgoing`.
    ///
    /// Only the eight perpendicular pairs are corners; `None` otherwise.
    pub fn turn(self, outgoing: Heading) -> Option<Sweep> {
        let a = self.unit();
        let b = outgoing.unit();
        let cross = a.perp_dot(b);
        if cross > 0.5 {
            Some(Sweep::Positive)
        } else if cross < -0.5 {
            Some(Sweep::Negative)
        } else {
            None
        }
    }

    fn offset(self, distance: Length) -> OffsetMm {
        let u = self.unit();
        OffsetMm::new(distance * u.x, distance * u.y)
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::East => "east",
            Heading::South => "south",
            Heading::West => "west",
            Heading::North => "north",
        };
        f.write_str(name)
    }
}

/// A quarter arc rounding the vertex where two perpendicular edges meet.
///
/// The arc is tangent to the incoming edge at [`Corner::start`] and to the
/// outgoing edge at [`Corner::end`]. Walking an outline clockwise on screen,
/// convex corners sweep positive and re-entrant corners sweep negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub center: Pt,
    pub radius: Length,
    pub start_angle: f64,
    pub end_angle: f64,
    pub sweep: Sweep,
}

impl Corner {
    pub fn new(vertex: Pt, incoming: Heading, outgoing: Heading, radius: Length) -> Option<Corner> {
        let sweep = incoming.turn(outgoing)?;
        let center = vertex + incoming.reversed().offset(radius) + outgoing.offset(radius);
        let start_angle = outgoing.reversed().angle();
        let end_angle = normalize_end_angle(start_angle, incoming.angle(), sweep);
        Some(Corner {
            center,
            radius,
            start_angle,
            end_angle,
            sweep,
        })
    }

    pub fn start(&self) -> Pt {
        arc_point(self.center, self.radius, self.start_angle)
    }

    pub fn end(&self) -> Pt {
        arc_point(self.center, self.radius, self.end_angle)
    }
}

/// `(large-arc-flag, sweep-flag)` for an SVG elliptical arc command.
///
/// SVG's sweep-flag 1 means increasing angle in the y-down user space,
/// which is [`Sweep::Positive`] here.
pub fn svg_arc_flags(start_angle: f64, end_angle: f64, sweep: Sweep) -> (bool, bool) {
    let large = (end_angle - start_angle).abs() > PI + EPSILON;
    (large, sweep == Sweep::Positive)
}

/// Angles in the closed range swept by an arc where the circle reaches an
/// axis extreme (multiples of π/2).
pub fn axis_extrema(start_angle: f64, end_angle: f64) -> impl Iterator<Item = f64> {
    let lo = start_angle.min(end_angle);
    let hi = start_angle.max(end_angle);
    let first = (lo / FRAC_PI_2).ceil() as i64;
    let last = (hi / FRAC_PI_2).floor() as i64;
    (first..=last).map(|k| k as f64 * FRAC_PI_2)
}
