/// Projection and viewport matrices
use crate::matrix::Matrix4x4;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

impl Matrix4x4 {
    /// Left-handed perspective projection mapping view-space depth to `[0, 1]`.
    pub fn make_perspective_fov(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Matrix4x4 {
        let cot = 1.0 / (fov_y / 2.0).tan();
        let depth = far - near;
        Matrix4x4::from_rows([
            [cot / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, cot, 0.0, 0.0],
            [0.0, 0.0, far / depth, 1.0],
            [0.0, 0.0, -near * far / depth, 0.0],
        ])
    }

    /// Maps x in `[left, right]` and y in `[bottom, top]` to `[-1, 1]`, z in
    /// `[near, far]` to `[0, 1]`.
    pub fn make_orthographic(
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        near: f32,
        far: f32,
    ) -> Matrix4x4 {
        Matrix4x4::from_rows([
            [2.0 / (right - left), 0.0, 0.0, 0.0],
            [0.0, 2.0 / (top - bottom), 0.0, 0.0],
            [0.0, 0.0, 1.0 / (far - near), 0.0],
            [
                (left + right) / (left - right),
                (top + bottom) / (bottom - top),
                near / (near - far),
                1.0,
            ],
        ])
    }

    /// NDC to screen pixels with the origin at the top-left corner.
    pub fn make_viewport(
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        min_depth: f32,
        max_depth: f32,
    ) -> Matrix4x4 {
        Matrix4x4::from_rows([
            [width / 2.0, 0.0, 0.0, 0.0],
            [0.0, -(height / 2.0), 0.0, 0.0],
            [0.0, 0.0, max_depth - min_depth, 0.0],
            [left + width / 2.0, top + height / 2.0, min_depth, 1.0],
        ])
    }
}

/// Fixed per-session projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSettings {
    pub width: f32,
    pub height: f32,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Width over height of one output pixel. Terminal cells are roughly
    /// twice as tall as they are wide.
    pub pixel_aspect: f32,
    /// Half-height of the orthographic view volume in world units.
    pub ortho_half_height: f32,
    pub mode: ProjectionMode,
}

impl FrameSettings {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            ..Self::default()
        }
    }

    pub fn aspect(&self) -> f32 {
        (self.width * self.pixel_aspect) / self.height
    }

    pub fn projection_matrix(&self) -> Matrix4x4 {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4x4::make_perspective_fov(self.fov_y, self.aspect(), self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let half_height = self.ortho_half_height;
                let half_width = half_height * self.aspect();
                Matrix4x4::make_orthographic(
                    -half_width,
                    half_height,
                    half_width,
                    -half_height,
                    self.near,
                    self.far,
                )
            }
        }
    }

    pub fn viewport_matrix(&self) -> Matrix4x4 {
        Matrix4x4::make_viewport(0.0, 0.0, self.width, self.height, 0.0, 1.0)
    }
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            fov_y: 0.45,
            near: 0.1,
            far: 100.0,
            pixel_aspect: 1.0,
            ortho_half_height: 3.0,
            mode: ProjectionMode::Perspective,
        }
    }
}
