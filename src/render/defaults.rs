//! Default stroke styles and hole constants (all in millimetres)

use crate::types::Length;

use super::types::{LineStyle, MountingHole, Rgba};

pub const GOLDEN_RATIO: f64 = 1.61803398875;
pub const CORNER_ROUNDING_RADIUS: Length = Length::mm(2.5);

pub const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);
pub const GREEN: Rgba = Rgba::new(0.0, 1.0, 0.0, 1.0);
pub const DARK_GRAY: Rgba = Rgba::new(0.25, 0.25, 0.25, 1.0);
pub const LIGHT_GRAY: Rgba = Rgba::new(0.9, 0.9, 0.9, 1.0);
pub const LIGHT_GRAY_FADED: Rgba = Rgba::new(0.9, 0.9, 0.9, 0.75);

pub const CUT_LINE_WIDTH: Length = Length::mm(0.1);
/// Hairline the laser cutter treats as "cut"
pub const LASER_CUT_LINE_WIDTH: Length = Length::mm(0.01);

pub const CUT_STYLE: LineStyle = LineStyle::solid(CUT_LINE_WIDTH, RED);
pub const GUIDE_STYLE: LineStyle = LineStyle::solid(Length::mm(0.1), GREEN);
pub const BOARD_OUTLINE_STYLE: LineStyle =
    LineStyle::dashed(Length::mm(0.1), DARK_GRAY, Length::mm(1.0), Length::mm(0.5));
pub const MAJOR_GRID_STYLE: LineStyle = LineStyle::solid(Length::mm(0.1), LIGHT_GRAY);
pub const MINOR_GRID_STYLE: LineStyle =
    LineStyle::dashed(Length::mm(0.05), LIGHT_GRAY_FADED, Length::mm(0.1), Length::mm(0.1));

pub const MAJOR_GRID_PITCH: Length = Length::mm(5.0);
pub const MINOR_GRID_PITCH: Length = Length::mm(1.0);
/// Upper bound on lines per grid axis
pub const MAX_GRID_LINES: usize = 10_000;
/// Upper bound on tesselation cells per sheet
pub const MAX_TESSELATION_CELLS: usize = 10_000;

pub const M3_MOUNTING_HOLE: MountingHole = MountingHole {
    name: "M3",
    screw_diameter: Length::mm(3.0),
    hole_diameter: Length::mm(3.125),
    nut_width: Some(Length::mm(5.5)),
    nut_height: Some(Length::mm(6.01)),
};

pub const M2_MOUNTING_HOLE: MountingHole = MountingHole {
    name: "M2",
    screw_diameter: Length::mm(2.0),
    hole_diameter: Length::mm(2.083),
    nut_width: Some(Length::mm(4.0)),
    nut_height: Some(Length::mm(4.32)),
};

/// Battery box screws are tapped into the box, so no nut pocket.
pub const BATTERY_MOUNTING_HOLE: MountingHole = M3_MOUNTING_HOLE.without_nut("battery");

pub const BATTERY_CONNECTOR_HOLE: MountingHole = MountingHole {
    name: "battery-connector",
    screw_diameter: Length::mm(15.0),
    hole_diameter: Length::mm(15.0),
    nut_width: None,
    nut_height: None,
};

pub const ALL_MOUNTING_HOLES: [MountingHole; 4] = [
    M3_MOUNTING_HOLE,
    M2_MOUNTING_HOLE,
    BATTERY_MOUNTING_HOLE,
    BATTERY_CONNECTOR_HOLE,
];
