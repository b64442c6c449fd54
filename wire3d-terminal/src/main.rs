/// wire3d terminal viewer - grid, sphere and plane in a wireframe
///
/// Controls:
///   - WASD / R,F: Move the camera
///   - Arrow Keys: Turn the camera
///   - IJKL / U,O: Move the sphere, +/- to resize it
///   - x,y,z / X,Y,Z: Tilt the plane normal, ,/. to move the plane
///   - [ / ]: Shrink or grow the edit step
///   - P: Toggle perspective/orthographic, Backspace: reset
///   - Q/ESC: Quit

use anyhow::{Context, Result};
use std::fs::File;
use wire3d_terminal::{config, Command, TerminalApp};

fn init_logging(config: &config::Config) -> Result<()> {
    let env = env_logger::Env::default();
    let mut builder = match &config.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            let mut builder = env_logger::Builder::from_env(env.default_filter_or("info"));
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        // stderr shares the screen with the canvas, keep it quiet by default
        None => env_logger::Builder::from_env(env.default_filter_or("error")),
    };
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let config = match config::parse_args(std::env::args().skip(1)).context("invalid arguments")? {
        Command::Help => {
            println!("{}", config::USAGE);
            return Ok(());
        }
        Command::Run(config) => config,
    };
    init_logging(&config)?;

    log::info!(
        "starting wire3d terminal: fov={} step={} mode={:?}",
        config.fov_y,
        config.step,
        config.mode
    );

    let mut app = TerminalApp::new(config).context("failed to query terminal size")?;
    app.run().context("terminal session failed")?;

    log::info!("graceful shutdown");
    Ok(())
}
