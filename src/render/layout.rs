//! Layout engine: resolves every coordinate from the chassis anchor and
//! orchestrates one drawing pass.
//!
//! Positions are chained: the chassis box is centred on the canvas, the
//! servo-mount bumps hang off its top edge, slots are measured from the bump
//! faces, and so on. Changing one dimension moves everything that depends on it.

use crate::config::ChassisConfig;
use crate::errors::RenderError;
use crate::types::{BoxMm, Length, Point, Pt};

use super::path_builder::PathBuilder;
use super::shapes::{
    BoardSilhouette, ChassisOutline, GridLines, MountingHoleShape, RoundedRect, ServoHolderInset, ShapeEnum,
};
use super::types::{Drawing, Layer, MountingHole};

/// Nut width when there is one, else the hole itself.
fn nut_or_hole(hole: &MountingHole) -> Length {
    hole.nut_width.unwrap_or(hole.hole_diameter)
}

/// All anchor coordinates of one chassis, in canvas-local millimetres (y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChassisLayout {
    /// Main plate, excluding bumps and extrusion
    pub chassis_box: BoxMm,
    pub left_mount: BoxMm,
    pub right_mount: BoxMm,
    /// Caster-wheel extrusion below the bottom edge
    pub extrusion: BoxMm,
    pub servo_holder: BoxMm,
    /// Board footprint at its maximum breadth
    pub board: BoxMm,
}

impl ChassisLayout {
    pub fn derive(config: &ChassisConfig) -> Self {
        let canvas = &config.canvas;
        let width = config.chassis.width;
        let breadth = config.chassis.breadth();
        let caster = &config.caster;
        let servo = &config.servo;

        let top = (canvas.height - breadth - caster.extrusion) * 0.5;
        let left = (canvas.width - width) * 0.5;
        let chassis_box = BoxMm::from_edges(left, top, left + width, top + breadth);
        let hcenter = chassis_box.center().x;

        let mount_top = top - config.servo_mount_breadth();
        let offset = servo.mount_center_offset();
        let left_mount = BoxMm::from_edges(left, mount_top, hcenter - offset, top);
        let right_mount = BoxMm::from_edges(hcenter + offset, mount_top, chassis_box.right(), top);

        let extrusion_width = caster.mounting_width + caster.edge_distance * 2.0;
        let extrusion_left = left + (width - extrusion_width) * 0.5;
        let extrusion = BoxMm::from_edges(
            extrusion_left,
            chassis_box.bottom(),
            extrusion_left + extrusion_width,
            chassis_box.bottom() + caster.extrusion + caster.edge_distance,
        );

        let holder_bottom = top - servo.holder_gap;
        let holder_left = hcenter - servo.inset_width_major() * 0.5;
        let servo_holder = BoxMm::from_edges(
            holder_left,
            holder_bottom - servo.inset_height(config.chassis.thickness),
            holder_left + servo.inset_width_major(),
            holder_bottom,
        );

        let board_left = left + (width - config.board.width) * 0.5;
        let board_bottom = chassis_box.bottom() - config.board.bottom_clearance;
        let board = BoxMm::from_edges(
            board_left,
            board_bottom - config.board.breadth_max,
            board_left + config.board.width,
            board_bottom,
        );

        crate::log::debug!(
            left = chassis_box.left().raw(),
            top = chassis_box.top().raw(),
            right = chassis_box.right().raw(),
            bottom = chassis_box.bottom().raw(),
            "chassis box"
        );
        crate::log::debug!(
            mount_top = mount_top.raw(),
            left_mount_right = left_mount.right().raw(),
            right_mount_left = right_mount.left().raw(),
            "servo-mount bumps"
        );
        crate::log::debug!(
            left = extrusion.left().raw(),
            right = extrusion.right().raw(),
            bottom = extrusion.bottom().raw(),
            "caster extrusion"
        );

        Self {
            chassis_box,
            left_mount,
            right_mount,
            extrusion,
            servo_holder,
            board,
        }
    }

    pub fn hcenter(&self) -> Length {
        self.chassis_box.center().x
    }

    pub fn vcenter(&self) -> Length {
        self.chassis_box.center().y
    }

    pub fn outline(&self, config: &ChassisConfig) -> ChassisOutline {
        ChassisOutline {
            left: self.chassis_box.left(),
            right: self.chassis_box.right(),
            top: self.chassis_box.top(),
            bottom: self.chassis_box.bottom(),
            mount_top: self.left_mount.top(),
            left_mount_right: self.left_mount.right(),
            right_mount_left: self.right_mount.left(),
            extrusion_left: self.extrusion.left(),
            extrusion_right: self.extrusion.right(),
            extrusion_bottom: self.extrusion.bottom(),
            radius: config.chassis.corner_radius,
            style: config.styles.cut,
        }
    }

    pub fn servo_holder(&self, config: &ChassisConfig) -> ServoHolderInset {
        ServoHolderInset {
            left: self.servo_holder.left(),
            bottom: self.servo_holder.bottom(),
            width_major: self.servo_holder.width(),
            width_minor: config.servo.inset_width_minor,
            height: self.servo_holder.height(),
            radius: config.chassis.corner_radius,
            style: config.styles.cut,
        }
    }

    /// Every hole with its centre, in draw order.
    pub fn holes(&self, config: &ChassisConfig) -> Vec<(MountingHole, Pt)> {
        let holes = &config.holes;
        let features = &config.features;
        let chassis = self.chassis_box;
        let hcenter = self.hcenter();
        let mut placed = Vec::new();

        // Board
        let board_origin = Point::new(self.board.left(), self.board.top());
        for &offset in &config.board.mounting_holes {
            placed.push((holes.m3, Point::new(board_origin.x + offset.x, board_origin.y + offset.y)));
        }
        if features.unverified_board_hole {
            let offset = config.board.unverified_mounting_hole;
            crate::log::warn!(x = offset.x.raw(), y = offset.y.raw(), "placing unverified board mounting hole");
            placed.push((holes.m3, Point::new(board_origin.x + offset.x, board_origin.y + offset.y)));
        }

        // Caster wheel, a rectangle measured up from the extrusion's bottom edge
        let caster = &config.caster;
        let caster_bottom = self.extrusion.bottom() - caster.edge_distance;
        let caster_top = caster_bottom - caster.mounting_breadth;
        let caster_left = chassis.left() + (chassis.width() - caster.mounting_width) * 0.5;
        let caster_right = caster_left + caster.mounting_width;
        for (x, y) in [
            (caster_left, caster_top),
            (caster_right, caster_top),
            (caster_left, caster_bottom),
            (caster_right, caster_bottom),
        ] {
            placed.push((holes.m3, Point::new(x, y)));
        }

        // Battery, two rows above the centre line
        let battery = &config.battery;
        let battery_align = self.vcenter() - chassis.height() * battery.align_factor;
        let battery_span = battery.width + battery.hole_clearance * 2.0;
        let battery_left = hcenter - battery_span * 0.5;
        let battery_right = battery_left + battery_span;
        for (x, y) in [
            (battery_left, battery_align),
            (battery_right, battery_align),
            (battery_left, battery_align + battery.row_spacing),
            (battery_right, battery_align + battery.row_spacing),
        ] {
            placed.push((holes.battery, Point::new(x, y)));
        }

        // Motors, a 2x2 pattern inset from each side edge
        let motor = &config.motor;
        let motor_inset = motor.edge_clearance + holes.m3.hole_diameter * 0.5;
        let motor_top = chassis.top() + motor_inset;
        let motor_bottom = motor_top + motor.mounting_breadth;
        let left_motor_left = chassis.left() + motor_inset;
        let left_motor_right = left_motor_left + motor.mounting_width;
        for (x, y) in [
            (left_motor_left, motor_top),
            (left_motor_right, motor_top),
            (left_motor_left, motor_bottom),
            (left_motor_right, motor_bottom),
        ] {
            placed.push((holes.m3, Point::new(x, y)));
        }

        if features.battery_connector_hole {
            let y = (motor_top + motor_bottom) * 0.5;
            crate::log::warn!(x = hcenter.raw(), y = y.raw(), "placing battery connector hole");
            placed.push((holes.battery_connector, Point::new(hcenter, y)));
        }

        let right_motor_right = chassis.right() - motor_inset;
        let right_motor_left = right_motor_right - motor.mounting_width;
        for (x, y) in [
            (right_motor_left, motor_top),
            (right_motor_right, motor_top),
            (right_motor_left, motor_bottom),
            (right_motor_right, motor_bottom),
        ] {
            placed.push((holes.m3, Point::new(x, y)));
        }

        // Servo-mount retention, one pair per bump, a nut pocket in from each edge
        let retention_inset = config.servo.mount_hole_clearance + nut_or_hole(&holes.m3) * 0.5;
        for bump in [self.left_mount, self.right_mount] {
            let x = bump.center().x;
            placed.push((holes.m3, Point::new(x, bump.bottom() - retention_inset)));
            placed.push((holes.m3, Point::new(x, bump.top() + retention_inset)));
        }

        // Servo-holder shelf, centred on each prong's shelf
        let servo = &config.servo;
        let shelf_y = (self.left_mount.bottom()
            + servo.inset_width_minor
            + config.chassis.thickness
            + self.left_mount.top())
            * 0.5;
        let left_prong_right = self.servo_holder.left() + servo.inset_width_minor;
        let right_prong_left = self.servo_holder.right() - servo.inset_width_minor;
        placed.push((holes.m2, Point::new(left_prong_right - servo.shelf_width * 0.5, shelf_y)));
        placed.push((holes.m2, Point::new(right_prong_left + servo.shelf_width * 0.5, shelf_y)));

        placed
    }

    /// Retention slots for the servo holder: bottom and top slot in each
    /// bump, then the left top slot once more as its own outline.
    pub fn slots(&self, config: &ChassisConfig) -> [BoxMm; 5] {
        let servo = &config.servo;
        let slot_width = config.chassis.thickness + servo.inset_clearance;
        let slot_height = servo.inset_width_minor + servo.inset_clearance;

        let lower_bottom = self.chassis_box.top() - servo.slot_gap;
        let lower_top = lower_bottom - slot_height;
        let upper_top = lower_bottom - servo.inset_width_major();
        let upper_bottom = upper_top + slot_height;

        let right_left = self.right_mount.left() + servo.shelf_depth;
        let right_right = right_left + slot_width;
        let left_right = self.left_mount.right() - servo.shelf_depth;
        let left_left = left_right - slot_width;

        let upper_left = BoxMm::from_edges(left_left, upper_top, left_right, upper_bottom);
        [
            BoxMm::from_edges(right_left, lower_top, right_right, lower_bottom),
            BoxMm::from_edges(right_left, upper_top, right_right, upper_bottom),
            BoxMm::from_edges(left_left, lower_top, left_right, lower_bottom),
            upper_left,
            upper_left,
        ]
    }

    pub fn board_silhouette(&self, config: &ChassisConfig) -> BoardSilhouette {
        let board = &config.board;
        BoardSilhouette {
            left: self.board.left(),
            top: self.board.top(),
            width: board.width,
            breadth: board.breadth_min,
            recessed_long: board.recessed_long_segment,
            angled: board.angled_segment,
            extended: board.extended_segment,
            recessed_short: board.recessed_short_segment,
            style: config.styles.board_outline,
        }
    }

    /// Every shape of one pass, in draw order, with feature toggles applied.
    pub fn shapes(&self, config: &ChassisConfig) -> Vec<ShapeEnum> {
        let features = &config.features;
        let styles = &config.styles;
        let mut shapes: Vec<ShapeEnum> = Vec::new();

        if features.minor_grid {
            shapes.push(
                GridLines {
                    extent: config.canvas,
                    pitch: config.grid.minor_pitch,
                    layer: Layer::MinorGrid,
                    style: styles.minor_grid,
                }
                .into(),
            );
        }
        if features.major_grid {
            shapes.push(
                GridLines {
                    extent: config.canvas,
                    pitch: config.grid.major_pitch,
                    layer: Layer::MajorGrid,
                    style: styles.major_grid,
                }
                .into(),
            );
        }

        shapes.push(self.outline(config).into());
        shapes.push(self.servo_holder(config).into());

        for (hole, center) in self.holes(config) {
            shapes.push(
                MountingHoleShape {
                    hole,
                    center,
                    guides: features.guides,
                    guide_style: styles.guide,
                    cut_style: styles.cut,
                }
                .into(),
            );
        }

        for slot in self.slots(config) {
            shapes.push(RoundedRect::sharp(slot, Layer::Slots, styles.cut).into());
        }

        if features.board_outline {
            shapes.push(self.board_silhouette(config).into());
        }
        shapes
    }
}

/// Run one layout pass. Validates the configuration, then builds every shape.
pub fn render(config: &ChassisConfig) -> Result<Drawing, RenderError> {
    config.validate()?;
    let layout = ChassisLayout::derive(config);
    let mut path = PathBuilder::new(Layer::Outline);
    for shape in layout.shapes(config) {
        shape.draw(&mut path)?;
    }
    let drawing = Drawing {
        strokes: path.finish(),
    };
    crate::log::debug!(strokes = drawing.len(), "layout pass complete");
    Ok(drawing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Features;
    use crate::types::pmm;

    fn layout() -> (ChassisConfig, ChassisLayout) {
        let config = ChassisConfig::default();
        let layout = ChassisLayout::derive(&config);
        (config, layout)
    }

    #[test]
    fn chassis_box_matches_dimension_table() {
        let (_, layout) = layout();
        let bb = layout.chassis_box;
        assert!(bb.width().approx_eq(Length::mm(69.0), 1e-9));
        assert!(bb.height().approx_eq(Length::mm(1.61803398875 * 69.0 - 15.0), 1e-9));
        assert!(bb.left().approx_eq(Length::mm(0.5), 1e-9));
        // Centred vertically once the extrusion is reserved
        let expected_top = 0.5 * (180.0 - (1.61803398875 * 69.0 - 15.0) - 5.5);
        assert!(bb.top().approx_eq(Length::mm(expected_top), 1e-9));
    }

    #[test]
    fn bumps_are_symmetric_about_centre() {
        let (_, layout) = layout();
        let c = layout.hcenter();
        let left_gap = c - layout.left_mount.right();
        let right_gap = layout.right_mount.left() - c;
        assert!(left_gap.approx_eq(right_gap, 1e-12));
        assert!(left_gap.approx_eq(Length::mm(18.85), 1e-9));
        assert!(layout.left_mount.height().approx_eq(Length::mm(37.5), 1e-9));
    }

    #[test]
    fn extrusion_is_centred_below_bottom_edge() {
        let (_, layout) = layout();
        assert!(layout.extrusion.width().approx_eq(Length::mm(36.0), 1e-9));
        assert!(layout.extrusion.height().approx_eq(Length::mm(8.5), 1e-9));
        assert!(layout.extrusion.center().x.approx_eq(layout.hcenter(), 1e-9));
        assert_eq!(layout.extrusion.top(), layout.chassis_box.bottom());
    }

    #[test]
    fn default_hole_count_and_order() {
        let (config, layout) = layout();
        let holes = layout.holes(&config);
        assert_eq!(holes.len(), 3 + 4 + 4 + 8 + 4 + 2);
        assert_eq!(holes[0].0.name, "M3");
        assert_eq!(holes[7].0.name, "battery");
        assert_eq!(holes[23].0.name, "M2");
        assert_eq!(holes[24].0.name, "M2");
    }

    #[test]
    fn optional_holes_follow_their_neighbours() {
        let config = ChassisConfig::default().with_features(Features {
            unverified_board_hole: true,
            battery_connector_hole: true,
            ..Features::default()
        });
        let layout = ChassisLayout::derive(&config);
        let holes = layout.holes(&config);
        assert_eq!(holes.len(), 27);

        let board = layout.board;
        assert!(holes[3].1.approx_eq(pmm(board.left().raw() + 33.5, board.top().raw() + 66.048), 1e-9));
        // Connector sits after the four left motor holes
        assert_eq!(holes[16].0.name, "battery-connector");
        assert!(holes[16].1.x.approx_eq(layout.hcenter(), 1e-12));
    }

    #[test]
    fn motor_holes_are_mirrored() {
        let (config, layout) = layout();
        let holes = layout.holes(&config);
        let left_outer = holes[11].1;
        let right_outer = holes[16].1;
        let c = layout.hcenter();
        assert!((c - left_outer.x).approx_eq(right_outer.x - c, 1e-9));
        assert!(left_outer.y.approx_eq(right_outer.y, 1e-12));
    }

    #[test]
    fn fifth_slot_repeats_left_upper_slot() {
        let (config, layout) = layout();
        let slots = layout.slots(&config);
        assert_eq!(slots[3], slots[4]);
        let width = config.chassis.thickness + config.servo.inset_clearance;
        for slot in slots {
            assert!(slot.width().approx_eq(width, 1e-12));
            assert!(slot.height().approx_eq(Length::mm(6.2), 1e-9));
        }
        // Slots sit against the inner face of each bump.
        assert!(slots[0].left().approx_eq(layout.right_mount.left() + Length::mm(2.5), 1e-12));
        assert!(slots[2].right().approx_eq(layout.left_mount.right() - Length::mm(2.5), 1e-12));
    }

    #[test]
    fn servo_holder_hangs_above_top_edge() {
        let (_, layout) = layout();
        let holder = layout.servo_holder;
        assert!(holder.bottom().approx_eq(layout.chassis_box.top() - Length::mm(1.0), 1e-12));
        assert!(holder.width().approx_eq(Length::mm(34.5), 1e-9));
        assert!(holder.center().x.approx_eq(layout.hcenter(), 1e-12));
    }

    #[test]
    fn feature_toggles_control_reference_shapes() {
        let config = ChassisConfig::for_laser_cutter();
        let layout = ChassisLayout::derive(&config);
        let shapes = layout.shapes(&config);
        // outline + holder + 25 holes + 5 slots
        assert_eq!(shapes.len(), 32);
        assert!(!shapes.iter().any(|s| matches!(s, ShapeEnum::GridLines(_) | ShapeEnum::BoardSilhouette(_))));
    }

    #[test]
    fn render_rejects_invalid_hole() {
        let mut config = ChassisConfig::default();
        config.holes.m3.nut_height = None;
        assert!(matches!(render(&config), Err(RenderError::Config(_))));
    }

    #[test]
    fn render_rejects_oversized_corner_radius() {
        let mut config = ChassisConfig::default();
        config.chassis.corner_radius = Length::mm(5.0);
        assert!(matches!(render(&config), Err(RenderError::Shape(_))));
    }
}
