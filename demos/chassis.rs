//! Writes the default chassis sheet to `chassis.svg`, or to the path given
//! as the first argument. Pass `--guides` for the single annotated drawing.
//!
//! Run with `RUST_LOG=chassis_layout=debug` and `--features tracing` to see
//! the layout anchors.

use chassis_layout::{ChassisConfig, render_svg, write_svg};
use tracing_subscriber::EnvFilter;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut path = "chassis.svg".to_string();
    let mut guides = false;
    for arg in std::env::args().skip(1) {
        if arg == "--guides" {
            guides = true;
        } else {
            path = arg;
        }
    }

    if guides {
        let svg = render_svg(&ChassisConfig::default())?;
        std::fs::write(&path, svg).map_err(chassis_layout::RenderError::from)?;
    } else {
        write_svg(&path, &ChassisConfig::for_laser_cutter())?;
    }
    tracing::info!(path = %path, "wrote chassis");
    Ok(())
}
