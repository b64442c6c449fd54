/// Example: Print a single frame as plain text
///
/// Usage: cargo run --example snapshot -- [OPTIONS]
/// Accepts the same options as the viewer, e.g. `--sphere-center 0,1,0`.

use anyhow::{Context, Result};
use wire3d_core::{FramePipeline, Palette};
use wire3d_terminal::{config, frame_settings, Canvas, Command};

const WIDTH: u16 = 100;
const HEIGHT: u16 = 36;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = match config::parse_args(std::env::args().skip(1)).context("invalid arguments")? {
        Command::Help => {
            println!("{}", config::USAGE);
            return Ok(());
        }
        Command::Run(config) => config,
    };

    let pipeline = FramePipeline::new(frame_settings(WIDTH, HEIGHT, config.fov_y, config.mode));
    let mut canvas = Canvas::new(WIDTH as usize, HEIGHT as usize);
    let (state, stats) = pipeline
        .frame(&mut config.scene, &Palette::default(), &mut canvas)
        .context("camera pose cannot be inverted")?;

    log::info!(
        "{} segments (grid {}, sphere {}, plane {}), collision: {}",
        stats.total(),
        stats.grid,
        stats.sphere,
        stats.plane,
        state.colliding
    );
    print!("{}", canvas.to_text());
    Ok(())
}
