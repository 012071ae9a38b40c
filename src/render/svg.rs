//! SVG generation
//!
//! [`SvgCanvas`] implements [`Canvas`] on top of the `svg` crate. Each
//! `stroke` becomes one `<path>` whose `d` attribute is a [`Data`] builder.

use std::f64::consts::TAU;

use glam::{DVec2, dvec2};
use svg::Document;
use svg::node::element::Path;
use svg::node::element::path::Data;

use super::canvas::Canvas;
use super::geometry::{Sweep, normalize_end_angle, svg_arc_flags};
use super::types::Rgba;

/// Format a number with 8 significant figures, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 8)
}

/// Format a number with specified significant figures, trailing zeros trimmed.
fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    // Trig noise around zero would otherwise print as 1.2246468e-16.
    if value.abs() < 1e-9 || !value.is_finite() {
        return "0".to_string();
    }

    // Round to specified significant figures
    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        return "0".to_string();
    }

    // Format with enough decimal places, then trim
    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    s.to_string()
}

/// Path coordinates are stored as `f32` by the `svg` crate. Rounding to
/// 1e-4 pt first keeps trig noise out of the output and clears `-0`.
fn snap(value: f64) -> f64 {
    (value * 1e4).round() / 1e4 + 0.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct StrokeStyle {
    width: f64,
    color: Rgba,
    dash: Option<(f64, f64)>,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: Rgba::new(0.0, 0.0, 0.0, 1.0),
            dash: None,
        }
    }
}

/// Vector surface that serializes to an SVG document sized in points.
#[derive(Debug)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    paths: Vec<Path>,
    data: Data,
    /// Commands pushed into `data` since the last stroke
    commands: usize,
    style: StrokeStyle,
    translation: DVec2,
    saved: Vec<(DVec2, StrokeStyle)>,
    /// Current point, translated
    cursor: Option<DVec2>,
    subpath_start: Option<DVec2>,
}

impl SvgCanvas {
    /// A surface of `width` x `height` points.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            paths: Vec::new(),
            data: Data::new(),
            commands: 0,
            style: StrokeStyle::default(),
            translation: DVec2::ZERO,
            saved: Vec::new(),
            cursor: None,
            subpath_start: None,
        }
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn into_document(self) -> Document {
        let mut document = Document::new()
            .set("width", format!("{}pt", fmt_num(self.width)))
            .set("height", format!("{}pt", fmt_num(self.height)))
            .set("viewBox", format!("0 0 {} {}", fmt_num(self.width), fmt_num(self.height)));
        for path in self.paths {
            document = document.add(path);
        }
        document
    }

    pub fn into_string(self) -> String {
        self.into_document().to_string()
    }

    fn push(&mut self, build: impl FnOnce(Data) -> Data) {
        let data = std::mem::replace(&mut self.data, Data::new());
        self.data = build(data);
        self.commands += 1;
    }

    fn push_move(&mut self, p: DVec2) {
        self.push(|data| data.move_to((snap(p.x), snap(p.y))));
        self.cursor = Some(p);
    }

    fn push_line(&mut self, p: DVec2) {
        self.push(|data| data.line_to((snap(p.x), snap(p.y))));
        self.cursor = Some(p);
    }

    fn push_arc(&mut self, radius: f64, start_angle: f64, end_angle: f64, sweep: Sweep, to: DVec2) {
        let (large, sweep_flag) = svg_arc_flags(start_angle, end_angle, sweep);
        let r = snap(radius);
        self.push(|data| {
            data.elliptical_arc_to((
                r,
                r,
                0,
                u8::from(large),
                u8::from(sweep_flag),
                snap(to.x),
                snap(to.y),
            ))
        });
        self.cursor = Some(to);
    }

    fn arc_with(&mut self, center: DVec2, radius: f64, start_angle: f64, end_angle: f64, sweep: Sweep) {
        let center = center + self.translation;
        let end_angle = normalize_end_angle(start_angle, end_angle, sweep);
        let at = |angle: f64| center + radius * dvec2(angle.cos(), angle.sin());
        let start = at(start_angle);

        match self.cursor {
            None => {
                self.push_move(start);
                self.subpath_start = Some(start);
            }
            Some(cursor) if cursor.distance(start) > 1e-9 => self.push_line(start),
            Some(_) => {}
        }
        if radius == 0.0 {
            return;
        }

        let swept = (end_angle - start_angle).abs();
        if swept >= TAU - 1e-9 {
            // An SVG arc cannot start and end on the same point; draw two halves.
            let mid = start_angle + (end_angle - start_angle) / 2.0;
            self.push_arc(radius, start_angle, mid, sweep, at(mid));
            self.push_arc(radius, mid, end_angle, sweep, at(end_angle));
        } else {
            self.push_arc(radius, start_angle, end_angle, sweep, at(end_angle));
        }
    }
}

impl Canvas for SvgCanvas {
    fn set_line_style(&mut self, width: f64, color: Rgba, dash: Option<(f64, f64)>) {
        self.style = StrokeStyle { width, color, dash };
    }

    fn move_to(&mut self, p: DVec2) {
        let p = p + self.translation;
        self.push_move(p);
        self.subpath_start = Some(p);
    }

    fn line_to(&mut self, p: DVec2) {
        if self.cursor.is_none() {
            self.move_to(p);
            return;
        }
        self.push_line(p + self.translation);
    }

    fn rel_line_to(&mut self, d: DVec2) {
        // Without a current point there is nothing to be relative to.
        if let Some(cursor) = self.cursor {
            self.push_line(cursor + d);
        }
    }

    fn arc(&mut self, center: DVec2, radius: f64, start_angle: f64, end_angle: f64) {
        self.arc_with(center, radius, start_angle, end_angle, Sweep::Positive);
    }

    fn arc_negative(&mut self, center: DVec2, radius: f64, start_angle: f64, end_angle: f64) {
        self.arc_with(center, radius, start_angle, end_angle, Sweep::Negative);
    }

    fn close_path(&mut self) {
        if self.commands == 0 {
            return;
        }
        self.push(Data::close);
        self.cursor = self.subpath_start;
    }

    fn stroke(&mut self) {
        let data = std::mem::replace(&mut self.data, Data::new());
        let commands = std::mem::take(&mut self.commands);
        self.cursor = None;
        self.subpath_start = None;
        if commands == 0 {
            return;
        }

        let style = self.style;
        let mut path = Path::new()
            .set("d", data)
            .set("fill", "none")
            .set("stroke", style.color.to_rgb_string())
            .set("stroke-width", fmt_num(style.width));
        if style.color.a < 1.0 {
            path = path.set("stroke-opacity", fmt_num(style.color.a));
        }
        if let Some((on, off)) = style.dash {
            path = path.set("stroke-dasharray", format!("{},{}", fmt_num(on), fmt_num(off)));
        }
        self.paths.push(path);
    }

    fn save(&mut self) {
        self.saved.push((self.translation, self.style));
    }

    fn restore(&mut self) {
        if let Some((translation, style)) = self.saved.pop() {
            self.translation = translation;
            self.style = style;
        }
    }

    fn translate(&mut self, d: DVec2) {
        self.translation += d;
    }
}
