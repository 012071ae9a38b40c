//! Dimension table, feature toggles and tesselation settings.
//!
//! A [`ChassisConfig`] is built once (usually from `Default`) and handed to
//! [`crate::render`] by reference. Nothing here is global; two configs can be
//! rendered side by side.

use crate::errors::ConfigError;
use crate::render::defaults;
use crate::render::types::{LineStyle, MountingHole};
use crate::types::{CanvasSpec, Length, Pt, pmm};

/// Overall chassis plate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChassisDims {
    pub width: Length,
    /// Breadth is `width * breadth_factor - breadth_reduction`
    pub breadth_factor: f64,
    pub breadth_reduction: Length,
    /// Material thickness of the plate stock
    pub thickness: Length,
    pub corner_radius: Length,
}

impl ChassisDims {
    pub fn breadth(&self) -> Length {
        self.width * self.breadth_factor - self.breadth_reduction
    }
}

impl Default for ChassisDims {
    fn default() -> Self {
        Self {
            width: Length::mm(69.0),
            breadth_factor: defaults::GOLDEN_RATIO,
            breadth_reduction: Length::mm(15.0),
            thickness: Length::inches(0.05),
            corner_radius: defaults::CORNER_ROUNDING_RADIUS,
        }
    }
}

/// Controller board footprint.
///
/// Hole positions are relative to the board corner with the barrel jack:
/// x runs toward the USB connector, y across the long side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardDims {
    pub width: Length,
    /// Distance to the angled notches (unconfirmed measurement)
    pub breadth_min: Length,
    pub breadth_max: Length,
    pub recessed_short_segment: Length,
    pub recessed_long_segment: Length,
    pub extended_segment: Length,
    /// Length of each 45° segment
    pub angled_segment: Length,
    pub mounting_holes: [Pt; 3],
    /// Fourth hole whose position has not been confirmed against a board
    pub unverified_mounting_hole: Pt,
    pub bottom_clearance: Length,
}

impl Default for BoardDims {
    fn default() -> Self {
        Self {
            width: Length::mm(53.3),
            breadth_min: Length::mm(66.3),
            breadth_max: Length::mm(68.6),
            recessed_short_segment: Length::mm(2.5),
            recessed_long_segment: Length::mm(12.404),
            extended_segment: Length::mm(33.5),
            angled_segment: Length::mm(3.25),
            mounting_holes: [pmm(2.25, 13.5), pmm(50.75, 14.5), pmm(7.25, 66.048)],
            unverified_mounting_hole: pmm(33.5, 66.048),
            bottom_clearance: Length::mm(2.0),
        }
    }
}

/// Caster wheel bracket and the extrusion that carries it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CasterDims {
    pub mounting_width: Length,
    pub mounting_breadth: Length,
    pub edge_distance: Length,
    pub extrusion: Length,
}

impl Default for CasterDims {
    fn default() -> Self {
        Self {
            mounting_width: Length::mm(30.0),
            mounting_breadth: Length::mm(24.3),
            edge_distance: Length::mm(3.0),
            extrusion: Length::mm(5.5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryDims {
    pub width: Length,
    pub hole_clearance: Length,
    /// Vertical distance between the two hole rows
    pub row_spacing: Length,
    /// Upward shift of the first row, as a fraction of chassis breadth
    pub align_factor: f64,
}

impl Default for BatteryDims {
    fn default() -> Self {
        Self {
            width: Length::mm(33.25),
            hole_clearance: Length::mm(2.0),
            row_spacing: Length::mm(20.0),
            align_factor: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorDims {
    pub mounting_width: Length,
    pub mounting_breadth: Length,
    pub edge_clearance: Length,
}

impl Default for MotorDims {
    fn default() -> Self {
        Self {
            mounting_width: Length::mm(10.0),
            mounting_breadth: Length::mm(12.0),
            edge_clearance: Length::mm(2.0),
        }
    }
}

/// Servo body, its mounting bumps and the holder that slots into them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServoDims {
    pub marker_width: Length,
    pub mount_hole_clearance: Length,
    /// Distance from chassis centre to the inner face of a bump, before the marker
    pub mount_center_base: Length,
    pub body_width: Length,
    pub shelf_width: Length,
    pub shelf_height: Length,
    pub shelf_depth: Length,
    /// Prong width of the holder inset
    pub inset_width_minor: Length,
    pub inset_clearance: Length,
    /// Gap between the chassis top edge and the holder inset
    pub holder_gap: Length,
    /// Gap between the chassis top edge and the lower retention slots
    pub slot_gap: Length,
}

impl Default for ServoDims {
    fn default() -> Self {
        Self {
            marker_width: Length::mm(8.7),
            mount_hole_clearance: Length::mm(1.0),
            mount_center_base: Length::mm(14.5),
            body_width: Length::mm(22.5),
            shelf_width: Length::mm(4.7),
            shelf_height: Length::mm(11.8),
            shelf_depth: Length::mm(2.5),
            inset_width_minor: Length::mm(6.0),
            inset_clearance: Length::mm(0.2),
            holder_gap: Length::mm(1.0),
            slot_gap: Length::mm(1.5),
        }
    }
}

impl ServoDims {
    pub fn mount_center_offset(&self) -> Length {
        self.mount_center_base + self.marker_width * 0.5
    }

    pub fn inset_width_major(&self) -> Length {
        self.body_width + self.inset_width_minor * 2.0
    }

    pub fn inset_height(&self, thickness: Length) -> Length {
        self.inset_width_minor + thickness + self.shelf_height
    }
}

/// Spacing of the two background grids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub major_pitch: Length,
    pub minor_pitch: Length,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            major_pitch: defaults::MAJOR_GRID_PITCH,
            minor_pitch: defaults::MINOR_GRID_PITCH,
        }
    }
}

/// Hole constants used by the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoleSet {
    pub m3: MountingHole,
    pub m2: MountingHole,
    pub battery: MountingHole,
    pub battery_connector: MountingHole,
}

impl Default for HoleSet {
    fn default() -> Self {
        Self {
            m3: defaults::M3_MOUNTING_HOLE,
            m2: defaults::M2_MOUNTING_HOLE,
            battery: defaults::BATTERY_MOUNTING_HOLE,
            battery_connector: defaults::BATTERY_CONNECTOR_HOLE,
        }
    }
}

impl HoleSet {
    pub fn iter(&self) -> impl Iterator<Item = &MountingHole> {
        [&self.m3, &self.m2, &self.battery, &self.battery_connector].into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSet {
    pub cut: LineStyle,
    pub guide: LineStyle,
    pub board_outline: LineStyle,
    pub major_grid: LineStyle,
    pub minor_grid: LineStyle,
}

impl Default for StyleSet {
    fn default() -> Self {
        Self {
            cut: defaults::CUT_STYLE,
            guide: defaults::GUIDE_STYLE,
            board_outline: defaults::BOARD_OUTLINE_STYLE,
            major_grid: defaults::MAJOR_GRID_STYLE,
            minor_grid: defaults::MINOR_GRID_STYLE,
        }
    }
}

/// Feature toggles, read on every render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// Screw guide circles and nut outlines around every hole
    pub guides: bool,
    pub board_outline: bool,
    pub major_grid: bool,
    pub minor_grid: bool,
    /// Board hole at the unconfirmed fourth position
    pub unverified_board_hole: bool,
    /// Large cable pass-through between the left motor rows
    pub battery_connector_hole: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            guides: true,
            board_outline: true,
            major_grid: true,
            minor_grid: true,
            unverified_board_hole: false,
            battery_connector_hole: false,
        }
    }
}

/// Repetition of one drawing across a larger sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TesselationSpec {
    pub count_h: usize,
    pub count_v: usize,
    pub offset_x: Length,
    pub offset_y: Length,
    /// Extent of the output document
    pub sheet: CanvasSpec,
}

impl TesselationSpec {
    /// A single cell on a sheet the size of `canvas`.
    pub fn disabled(canvas: CanvasSpec) -> Self {
        Self {
            count_h: 1,
            count_v: 1,
            offset_x: Length::ZERO,
            offset_y: Length::ZERO,
            sheet: canvas,
        }
    }

    /// Number of cells, saturating for counts that `validate` rejects.
    pub fn cells(&self) -> usize {
        self.count_h.saturating_mul(self.count_v)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count_h == 0 || self.count_v == 0 {
            return Err(ConfigError::InvalidTesselation {
                reason: format!("repeat counts must be at least 1, got {}x{}", self.count_h, self.count_v),
            });
        }
        match self.count_h.checked_mul(self.count_v) {
            Some(cells) if cells <= defaults::MAX_TESSELATION_CELLS => {}
            _ => {
                return Err(ConfigError::InvalidTesselation {
                    reason: format!(
                        "{}x{} cells exceeds the limit of {}",
                        self.count_h,
                        self.count_v,
                        defaults::MAX_TESSELATION_CELLS
                    ),
                });
            }
        }
        for (what, value) in [("offset_x", self.offset_x), ("offset_y", self.offset_y)] {
            if !value.is_finite() || value < Length::ZERO {
                return Err(ConfigError::InvalidTesselation {
                    reason: format!("{what} must be finite and non-negative, got {value}"),
                });
            }
        }
        for (what, value) in [("sheet width", self.sheet.width), ("sheet height", self.sheet.height)] {
            if !value.is_finite() || value <= Length::ZERO {
                return Err(ConfigError::InvalidTesselation {
                    reason: format!("{what} must be finite and positive, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// The complete, immutable input of a render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChassisConfig {
    pub canvas: CanvasSpec,
    pub chassis: ChassisDims,
    pub board: BoardDims,
    pub caster: CasterDims,
    pub battery: BatteryDims,
    pub motor: MotorDims,
    pub servo: ServoDims,
    pub grid: GridSpec,
    pub holes: HoleSet,
    pub styles: StyleSet,
    pub features: Features,
    pub tesselation: TesselationSpec,
}

impl Default for ChassisConfig {
    fn default() -> Self {
        let chassis = ChassisDims::default();
        let servo = ServoDims::default();
        let holes = HoleSet::default();
        let mut config = Self {
            canvas: CanvasSpec::new(Length::mm(70.0), Length::mm(180.0)),
            chassis,
            board: BoardDims::default(),
            caster: CasterDims::default(),
            battery: BatteryDims::default(),
            motor: MotorDims::default(),
            servo,
            grid: GridSpec::default(),
            holes,
            styles: StyleSet::default(),
            features: Features::default(),
            tesselation: TesselationSpec::disabled(CanvasSpec::new(Length::mm(70.0), Length::mm(180.0))),
        };
        config.tesselation = config.sheet_tesselation();
        config
    }
}

impl ChassisConfig {
    /// Cut-only output: no guides, grids or reference outline, hairline cut width.
    pub fn for_laser_cutter() -> Self {
        Self::default().with_laser_cutter()
    }

    pub fn with_laser_cutter(mut self) -> Self {
        self.features.guides = false;
        self.features.board_outline = false;
        self.features.major_grid = false;
        self.features.minor_grid = false;
        self.styles.cut = self.styles.cut.with_width(defaults::LASER_CUT_LINE_WIDTH);
        self
    }

    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    pub fn with_guides(mut self, guides: bool) -> Self {
        self.features.guides = guides;
        self
    }

    pub fn with_canvas(mut self, canvas: CanvasSpec) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn with_chassis(mut self, chassis: ChassisDims) -> Self {
        self.chassis = chassis;
        self
    }

    pub fn with_holes(mut self, holes: HoleSet) -> Self {
        self.holes = holes;
        self
    }

    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_tesselation(mut self, tesselation: TesselationSpec) -> Self {
        self.tesselation = tesselation;
        self
    }

    /// Render a single canvas instead of a sheet.
    pub fn without_tesselation(mut self) -> Self {
        self.tesselation = TesselationSpec::disabled(self.canvas);
        self
    }

    /// Depth of each servo-mount bump: the servo body plus a nut pocket on either side.
    pub fn servo_mount_breadth(&self) -> Length {
        let nut = self.holes.m3.nut_width.unwrap_or(self.holes.m3.hole_diameter);
        self.servo.body_width + 2.0 * (2.0 * self.servo.mount_hole_clearance + nut)
    }

    /// The 14in x 11in sheet holding 5 x 2 chassis.
    pub fn sheet_tesselation(&self) -> TesselationSpec {
        TesselationSpec {
            count_h: 5,
            count_v: 2,
            offset_x: self.chassis.width + Length::mm(2.0),
            offset_y: self.chassis.breadth() + self.servo_mount_breadth() + Length::mm(1.0),
            sheet: CanvasSpec::new(Length::inches(14.0), Length::inches(11.0)),
        }
    }

    /// Check everything that does not need geometry: hole constants, grid
    /// pitches, canvas and tesselation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for hole in self.holes.iter() {
            hole.validate()?;
        }
        for (what, value) in [("canvas width", self.canvas.width), ("canvas height", self.canvas.height)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteCoordinate {
                    what: what.to_string(),
                    value: value.raw(),
                });
            }
            if value <= Length::ZERO {
                return Err(ConfigError::NegativeCoordinate {
                    what: what.to_string(),
                    value: value.raw(),
                });
            }
        }
        let longest = self.canvas.width.max(self.canvas.height);
        for (what, pitch) in [
            ("major grid pitch", self.grid.major_pitch),
            ("minor grid pitch", self.grid.minor_pitch),
        ] {
            if !pitch.is_finite() || pitch <= Length::ZERO {
                return Err(ConfigError::InvalidPitch { what: what.to_string() });
            }
            let lines = longest.checked_div(pitch).unwrap_or(f64::INFINITY);
            if lines >= defaults::MAX_GRID_LINES as f64 {
                return Err(ConfigError::GridTooDense {
                    what: what.to_string(),
                    pitch: pitch.raw(),
                    lines: lines.floor(),
                    limit: defaults::MAX_GRID_LINES,
                });
            }
        }
        self.tesselation.validate()
    }
}
