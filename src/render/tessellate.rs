//! Tesselation: one drawing repeated at a fixed pitch across a sheet.

use crate::config::{ChassisConfig, TesselationSpec};
use crate::errors::RenderError;
use crate::types::{OffsetMm, Scaler};

use super::canvas::{Canvas, CanvasOp, device_ops};
use super::layout::render;
use super::types::Drawing;

/// Translation of cell `(i, j)` in millimetres.
pub fn cell_offset(spec: &TesselationSpec, i: usize, j: usize) -> OffsetMm {
    OffsetMm::new(spec.offset_x * i as f64, spec.offset_y * j as f64)
}

/// Cells in emission order: row by row, left to right.
pub fn cells(spec: &TesselationSpec) -> impl Iterator<Item = (usize, usize)> {
    let count_h = spec.count_h;
    (0..spec.count_v).flat_map(move |j| (0..count_h).map(move |i| (i, j)))
}

/// Render every cell and emit it into `canvas` under its own translation.
///
/// Each cell is rendered and bounds-checked against the single canvas before
/// anything is emitted.
pub fn tessellate<C: Canvas + ?Sized>(
    config: &ChassisConfig,
    spec: &TesselationSpec,
    canvas: &mut C,
) -> Result<(), RenderError> {
    spec.validate()?;
    let scaler = Scaler::points();

    let mut prepared: Vec<(OffsetMm, Vec<CanvasOp>)> = Vec::with_capacity(spec.cells());
    for (i, j) in cells(spec) {
        let drawing = render(config)?;
        let ops = device_ops(&drawing, &scaler, &config.canvas)?;
        let offset = cell_offset(spec, i, j);
        crate::log::debug!(
            i,
            j,
            dx = offset.dx.raw(),
            dy = offset.dy.raw(),
            ops = ops.len(),
            "tesselation cell"
        );
        prepared.push((offset, ops));
    }

    for (offset, ops) in &prepared {
        canvas.save();
        canvas.translate(scaler.offset(*offset));
        for op in ops {
            op.apply(canvas);
        }
        canvas.restore();
    }
    crate::log::info!(cells = prepared.len(), "sheet emitted");
    Ok(())
}

/// The whole sheet as one drawing in sheet millimetres.
pub fn sheet_drawing(config: &ChassisConfig, spec: &TesselationSpec) -> Result<Drawing, RenderError> {
    spec.validate()?;
    let mut sheet = Drawing::new();
    for (i, j) in cells(spec) {
        let cell = render(config)?;
        sheet.extend(cell.translated(cell_offset(spec, i, j)).strokes);
    }
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;
    use crate::render::canvas::RecordingCanvas;
    use crate::types::Length;

    fn two_by_one() -> (ChassisConfig, TesselationSpec) {
        let config = ChassisConfig::for_laser_cutter();
        let mut spec = config.tesselation;
        spec.count_h = 2;
        spec.count_v = 1;
        spec.offset_x = Length::mm(71.0);
        (config, spec)
    }

    #[test]
    fn cells_run_row_by_row() {
        let spec = ChassisConfig::default().tesselation;
        let order: Vec<_> = cells(&spec).collect();
        assert_eq!(order.len(), 10);
        assert_eq!(order[0], (0, 0));
        assert_eq!(order[1], (1, 0));
        assert_eq!(order[5], (0, 1));
    }

    #[test]
    fn each_cell_is_wrapped_in_save_restore() {
        let (config, spec) = two_by_one();
        let mut sink = RecordingCanvas::new();
        tessellate(&config, &spec, &mut sink).unwrap();
        let cells = sink.cells();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].len(), cells[1].len());
        assert!(matches!(cells[1][0], CanvasOp::Translate(_)));
    }

    #[test]
    fn disabled_tesselation_is_one_untranslated_cell() {
        let config = ChassisConfig::for_laser_cutter();
        let spec = TesselationSpec::disabled(config.canvas);
        let sheet = sheet_drawing(&config, &spec).unwrap();
        assert_eq!(sheet, render(&config).unwrap());
    }

    #[test]
    fn invalid_spec_emits_nothing() {
        let (config, mut spec) = two_by_one();
        spec.count_h = 0;
        let mut sink = RecordingCanvas::new();
        assert!(tessellate(&config, &spec, &mut sink).is_err());
        assert!(sink.ops.is_empty());
    }

    #[test]
    fn overflowing_cell_count_errors_before_allocating() {
        let (config, mut spec) = two_by_one();
        spec.count_h = usize::MAX;
        spec.count_v = 2;
        let mut sink = RecordingCanvas::new();
        let err = tessellate(&config, &spec, &mut sink).unwrap_err();
        assert!(matches!(err, RenderError::Config(ConfigError::InvalidTesselation { .. })), "{err:?}");
        assert!(sink.ops.is_empty());
        assert!(sheet_drawing(&config, &spec).is_err());
    }
}
