/// Command line configuration
use nom::{
    character::complete::{char, multispace0},
    combinator::all_consuming,
    number::complete::float,
    sequence::{delimited, tuple},
    IResult,
};
use std::path::PathBuf;
use thiserror::Error;
use wire3d_core::{ProjectionMode, Scene, Vector3};

pub const USAGE: &str = "\
Usage: wire3d-terminal [OPTIONS]

Options:
  --camera-translate X,Y,Z   Camera position (default 0,1.9,-6.49)
  --camera-rotate X,Y,Z      Camera Euler angles in radians (default 0.26,0,0)
  --sphere-center X,Y,Z      Sphere centre (default 0,0,0)
  --sphere-radius R          Sphere radius (default 0.6)
  --plane-normal X,Y,Z       Plane normal, normalized on use (default 0,1,0)
  --plane-distance D         Plane distance along the normal (default 1)
  --fov RADIANS              Vertical field of view (default 0.45)
  --step S                   Edit step per key press (default 0.01)
  --ortho                    Start with an orthographic projection
  --log-file PATH            Write logs to PATH (RUST_LOG sets the filter)
  -h, --help                 Print this help";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown option '{0}'")]
    UnknownFlag(String),
    #[error("option '{0}' needs a value")]
    MissingValue(String),
    #[error("option '{flag}' expects X,Y,Z but got '{value}'")]
    InvalidVector { flag: String, value: String },
    #[error("option '{flag}' expects a number but got '{value}'")]
    InvalidNumber { flag: String, value: String },
}

/// Startup parameters for the terminal viewer
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub scene: Scene,
    pub fov_y: f32,
    pub step: f32,
    pub mode: ProjectionMode,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scene: Scene::default(),
            fov_y: 0.45,
            step: 0.01,
            mode: ProjectionMode::Perspective,
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Config),
    Help,
}

fn separator(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0)(input)
}

fn parse_vector3(input: &str) -> IResult<&str, Vector3> {
    let (input, (x, _, y, _, z)) = delimited(
        multispace0,
        tuple((float, separator, float, separator, float)),
        multispace0,
    )(input)?;
    Ok((input, Vector3::new(x, y, z)))
}

/// Parse `x,y,z` (whitespace around commas allowed).
pub fn vector_arg(flag: &str, value: &str) -> Result<Vector3, ConfigError> {
    all_consuming(parse_vector3)(value)
        .ok()
        .map(|(_, v)| v)
        .filter(|v| v.iter().all(|c| c.is_finite()))
        .ok_or_else(|| ConfigError::InvalidVector {
            flag: flag.to_string(),
            value: value.to_string(),
        })
}

fn number_arg(flag: &str, value: &str) -> Result<f32, ConfigError> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidNumber {
            flag: flag.to_string(),
            value: value.to_string(),
        })
}

/// Parse arguments (without the program name).
///
/// Accepts both `--flag value` and `--flag=value`.
pub fn parse_args<I>(args: I) -> Result<Command, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let mut config = Config::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--ortho" => {
                config.mode = ProjectionMode::Orthographic;
                continue;
            }
            _ => {}
        }

        let value = match inline {
            Some(value) => value,
            None => match flag.as_str() {
                "--camera-translate" | "--camera-rotate" | "--sphere-center" | "--sphere-radius"
                | "--plane-normal" | "--plane-distance" | "--fov" | "--step" | "--log-file" => args
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue(flag.clone()))?,
                _ => return Err(ConfigError::UnknownFlag(flag)),
            },
        };

        match flag.as_str() {
            "--camera-translate" => config.scene.camera.translate = vector_arg(&flag, &value)?,
            "--camera-rotate" => config.scene.camera.rotate = vector_arg(&flag, &value)?,
            "--sphere-center" => config.scene.sphere.center = vector_arg(&flag, &value)?,
            "--sphere-radius" => config.scene.sphere.radius = number_arg(&flag, &value)?,
            "--plane-normal" => config.scene.plane.normal = vector_arg(&flag, &value)?,
            "--plane-distance" => config.scene.plane.distance = number_arg(&flag, &value)?,
            "--fov" => config.fov_y = number_arg(&flag, &value)?,
            "--step" => config.step = number_arg(&flag, &value)?,
            "--log-file" => config.log_file = Some(PathBuf::from(value)),
            _ => return Err(ConfigError::UnknownFlag(flag)),
        }
    }

    Ok(Command::Run(config))
}
