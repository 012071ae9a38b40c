//! Core value types for one drawing pass

use crate::errors::ConfigError;
use crate::types::{BoxMm, Length, OffsetMm};

use super::path_builder::Contour;

/// Stroke colour with alpha, each channel in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// `rgb(r,g,b)` with 8-bit channels, the form C-style SVG writers emit.
    pub fn to_rgb_string(&self) -> String {
        let c = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("rgb({},{},{})", c(self.r), c(self.g), c(self.b))
    }
}

/// Stroke width, colour and optional `(on, off)` dash pattern. `None` is solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: Length,
    pub color: Rgba,
    pub dash: Option<(Length, Length)>,
}

impl LineStyle {
    pub const fn solid(width: Length, color: Rgba) -> Self {
        Self { width, color, dash: None }
    }

    pub const fn dashed(width: Length, color: Rgba, on: Length, off: Length) -> Self {
        Self {
            width,
            color,
            dash: Some((on, off)),
        }
    }

    pub fn with_width(self, width: Length) -> Self {
        Self { width, ..self }
    }
}

/// Screw clearance hole with an optional hex-nut outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountingHole {
    pub name: &'static str,
    pub screw_diameter: Length,
    pub hole_diameter: Length,
    /// Flat-to-flat width
    pub nut_width: Option<Length>,
    /// Corner-to-corner height
    pub nut_height: Option<Length>,
}

impl MountingHole {
    /// Nut dimensions when both are present.
    pub fn nut(&self) -> Option<(Length, Length)> {
        self.nut_width.zip(self.nut_height)
    }

    /// Same hole, nut outline dropped.
    pub const fn without_nut(self, name: &'static str) -> Self {
        Self {
            name,
            nut_width: None,
            nut_height: None,
            ..self
        }
    }

    /// Hole must clear the screw; nut dimensions come in pairs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nut_width.is_some() != self.nut_height.is_some() {
            return Err(ConfigError::IncompleteNutSpec {
                hole: self.name.to_string(),
            });
        }
        if self.hole_diameter < self.screw_diameter {
            return Err(ConfigError::HoleSmallerThanScrew {
                hole: self.name.to_string(),
                screw: self.screw_diameter.raw(),
                hole_diameter: self.hole_diameter.raw(),
            });
        }
        Ok(())
    }
}

/// Draw layers, declared in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    MinorGrid,
    MajorGrid,
    Outline,
    ServoHolder,
    Holes,
    Slots,
    BoardOutline,
}

impl Layer {
    pub const ALL: [Layer; 7] = [
        Layer::MinorGrid,
        Layer::MajorGrid,
        Layer::Outline,
        Layer::ServoHolder,
        Layer::Holes,
        Layer::Slots,
        Layer::BoardOutline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Layer::MinorGrid => "minor-grid",
            Layer::MajorGrid => "major-grid",
            Layer::Outline => "outline",
            Layer::ServoHolder => "servo-holder",
            Layer::Holes => "holes",
            Layer::Slots => "slots",
            Layer::BoardOutline => "board-outline",
        }
    }
}

/// One stroked path: all its contours share a style.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub layer: Layer,
    pub style: LineStyle,
    pub contours: Vec<Contour>,
}

impl Stroke {
    pub fn bounds(&self) -> BoxMm {
        let mut bb = BoxMm::new();
        for contour in &self.contours {
            bb.expand_box(&contour.bounds());
        }
        bb
    }

    pub fn translated(&self, offset: OffsetMm) -> Stroke {
        Stroke {
            layer: self.layer,
            style: self.style,
            contours: self.contours.iter().map(|c| c.translated(offset)).collect(),
        }
    }
}

/// Ordered strokes of one layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    pub strokes: Vec<Stroke>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, strokes: impl IntoIterator<Item = Stroke>) {
        self.strokes.extend(strokes);
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter().filter(move |s| s.layer == layer)
    }

    pub fn bounds(&self) -> BoxMm {
        let mut bb = BoxMm::new();
        for stroke in &self.strokes {
            bb.expand_box(&stroke.bounds());
        }
        bb
    }

    pub fn translated(&self, offset: OffsetMm) -> Drawing {
        Drawing {
            strokes: self.strokes.iter().map(|s| s.translated(offset)).collect(),
        }
    }

    /// `layer: count` per line, in draw order. Layers with no strokes are omitted.
    pub fn summary(&self) -> String {
        Layer::ALL
            .iter()
            .filter_map(|&layer| {
                let n = self.layer(layer).count();
                (n > 0).then(|| format!("{}: {}", layer.name(), n))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
