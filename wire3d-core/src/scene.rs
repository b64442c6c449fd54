/// Per-frame scene state and the edits that drive it
use nalgebra::Vector3;

use crate::error::MathResult;
use crate::geometry::{is_sphere_to_plane_collision, Plane, Sphere};
use crate::matrix::Matrix4x4;
use crate::wireframe::{Color, Palette};

/// Pose of the free-flying debug camera (Euler angles in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub translate: Vector3<f32>,
    pub rotate: Vector3<f32>,
}

impl CameraState {
    pub fn new(translate: Vector3<f32>, rotate: Vector3<f32>) -> Self {
        Self { translate, rotate }
    }

    /// Camera-to-world transform with unit scale.
    pub fn world_matrix(&self) -> Matrix4x4 {
        Matrix4x4::make_affine(&Vector3::new(1.0, 1.0, 1.0), &self.rotate, &self.translate)
    }

    /// World-to-camera transform.
    pub fn view_matrix(&self) -> MathResult<Matrix4x4> {
        self.world_matrix().inverse()
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            translate: Vector3::new(0.0, 1.9, -6.49),
            rotate: Vector3::new(0.26, 0.0, 0.0),
        }
    }
}

/// One edit from the parameter surface, expressed as a delta
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEdit {
    CameraTranslate(Vector3<f32>),
    CameraRotate(Vector3<f32>),
    SphereCenter(Vector3<f32>),
    SphereRadius(f32),
    PlaneNormal(Vector3<f32>),
    PlaneDistance(f32),
}

/// Everything the renderer reads for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    pub camera: CameraState,
    pub sphere: Sphere,
    pub plane: Plane,
}

/// Values derived from the scene at the start of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    pub sphere_color: Color,
    pub colliding: bool,
    /// False when the plane normal could not be normalized this frame.
    pub plane_drawable: bool,
}

impl Scene {
    pub fn apply(&mut self, edit: SceneEdit) {
        match edit {
            SceneEdit::CameraTranslate(delta) => self.camera.translate += delta,
            SceneEdit::CameraRotate(delta) => self.camera.rotate += delta,
            SceneEdit::SphereCenter(delta) => self.sphere.center += delta,
            SceneEdit::SphereRadius(delta) => self.sphere.radius += delta,
            SceneEdit::PlaneNormal(delta) => self.plane.normal += delta,
            SceneEdit::PlaneDistance(delta) => self.plane.distance += delta,
        }
    }

    pub fn apply_all<I: IntoIterator<Item = SceneEdit>>(&mut self, edits: I) {
        for edit in edits {
            self.apply(edit);
        }
    }

    /// Renormalize the plane and pick the sphere colour.
    ///
    /// A plane normal that edits have shrunk to zero is left as it is; the
    /// plane is skipped for the frame and collision reports no hit.
    pub fn prepare_frame(&mut self, palette: &Palette) -> FrameState {
        let plane_drawable = match self.plane.normalized() {
            Ok(plane) => {
                self.plane = plane;
                true
            }
            Err(err) => {
                log::debug!("plane skipped this frame: {err}");
                false
            }
        };

        let colliding = plane_drawable && is_sphere_to_plane_collision(&self.sphere, &self.plane);
        let sphere_color = if colliding {
            palette.sphere_hit
        } else {
            palette.sphere
        };

        FrameState {
            sphere_color,
            colliding,
            plane_drawable,
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            camera: CameraState::default(),
            sphere: Sphere::new(Vector3::zeros(), 0.6),
            plane: Plane::new(Vector3::new(0.0, 1.0, 0.0), 1.0),
        }
    }
}
