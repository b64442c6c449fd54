/// wire3d core library - vector/matrix math, collision and wireframe generation
///
/// Matrices follow the row-vector convention (`v' = v * M`). Hosts supply a
/// [`LineSink`] and a [`Scene`]; everything else here is stateless.

pub mod error;
pub mod geometry;
pub mod matrix;
pub mod projection;
pub mod scene;
pub mod transform;
pub mod vector;
pub mod wireframe;

/// Three-component `f32` vector used throughout the crate.
pub type Vector3 = nalgebra::Vector3<f32>;

// Re-export commonly used types
pub use error::{MathError, MathResult, DETERMINANT_EPSILON, EPSILON};
pub use geometry::{is_sphere_collision, is_sphere_to_plane_collision, Plane, Sphere};
pub use matrix::Matrix4x4;
pub use projection::{FrameSettings, ProjectionMode};
pub use scene::{CameraState, FrameState, Scene, SceneEdit};
pub use transform::transform;
pub use wireframe::{Color, FramePipeline, FrameStats, LineSink, Palette, Segment};
