/// Wireframe generation for the grid, sphere and plane
///
/// Every primitive is rebuilt from the scene each frame: local vertices go
/// through one world-view-projection-viewport matrix and the truncated screen
/// coordinates are handed to a [`LineSink`].
use nalgebra::Vector3;
use std::f32::consts::PI;

use crate::error::MathResult;
use crate::geometry::{Plane, Sphere};
use crate::matrix::Matrix4x4;
use crate::projection::FrameSettings;
use crate::scene::{FrameState, Scene};
use crate::transform::transform;
use crate::vector;

pub const GRID_HALF_WIDTH: f32 = 2.0;
pub const GRID_SUBDIVISION: u32 = 10;
/// Index of the grid line drawn in the axis colour.
pub const GRID_AXIS_INDEX: u32 = 5;
pub const SPHERE_SUBDIVISION: u32 = 12;
pub const PLANE_EXTENT: f32 = 2.0;

/// Opaque `0xRRGGBBAA` colour, passed through to the sink untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const BLACK: Color = Color(0x0000_00FF);
    pub const RED: Color = Color(0xFF00_00FF);

    pub fn rgb(self) -> (u8, u8, u8) {
        let [r, g, b, _] = self.0.to_be_bytes();
        (r, g, b)
    }
}

/// Colours used by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub grid_line: Color,
    pub grid_axis: Color,
    pub sphere: Color,
    pub sphere_hit: Color,
    pub plane: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid_line: Color::WHITE,
            grid_axis: Color::BLACK,
            sphere: Color::WHITE,
            sphere_hit: Color::RED,
            plane: Color::WHITE,
        }
    }
}

/// Anything that can draw a line between two integer screen points.
pub trait LineSink {
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color);
}

impl<S: LineSink + ?Sized> LineSink for &mut S {
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        (**self).draw_line(x0, y0, x1, y1, color);
    }
}

/// A recorded line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
    pub color: Color,
}

impl LineSink for Vec<Segment> {
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        self.push(Segment {
            x0,
            y0,
            x1,
            y1,
            color,
        });
    }
}

/// Segment counts emitted by one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub grid: usize,
    pub sphere: usize,
    pub plane: usize,
}

impl FrameStats {
    pub fn total(&self) -> usize {
        self.grid + self.sphere + self.plane
    }
}

/// `world * view_projection * viewport`
///
/// The divide happens once, after the viewport. For points with `w == 0`
/// (on the camera plane) the viewport offset is therefore not added, unlike
/// transforming to NDC first and mapping to the viewport afterwards.
fn screen_matrix(world: &Matrix4x4, view_projection: &Matrix4x4, viewport: &Matrix4x4) -> Matrix4x4 {
    world * &(view_projection * viewport)
}

fn emit<S: LineSink + ?Sized>(
    sink: &mut S,
    matrix: &Matrix4x4,
    a: &Vector3<f32>,
    b: &Vector3<f32>,
    color: Color,
) {
    let a = transform(a, matrix);
    let b = transform(b, matrix);
    sink.draw_line(a.x as i32, a.y as i32, b.x as i32, b.y as i32, color);
}

/// Ground grid on the y = 0 plane: 11 lines along z, then 11 along x.
pub fn draw_grid<S: LineSink + ?Sized>(
    view_projection: &Matrix4x4,
    viewport: &Matrix4x4,
    palette: &Palette,
    sink: &mut S,
) -> usize {
    let every = (GRID_HALF_WIDTH * 2.0) / GRID_SUBDIVISION as f32;
    let matrix = screen_matrix(&Matrix4x4::identity(), view_projection, viewport);
    let color = |index: u32| {
        if index == GRID_AXIS_INDEX {
            palette.grid_axis
        } else {
            palette.grid_line
        }
    };

    let mut count = 0;
    for index in 0..=GRID_SUBDIVISION {
        let offset = -GRID_HALF_WIDTH + every * index as f32;
        let start = Vector3::new(offset, 0.0, -GRID_HALF_WIDTH);
        let end = Vector3::new(offset, 0.0, GRID_HALF_WIDTH);
        emit(sink, &matrix, &start, &end, color(index));
        count += 1;
    }
    for index in 0..=GRID_SUBDIVISION {
        let offset = -GRID_HALF_WIDTH + every * index as f32;
        let start = Vector3::new(-GRID_HALF_WIDTH, 0.0, offset);
        let end = Vector3::new(GRID_HALF_WIDTH, 0.0, offset);
        emit(sink, &matrix, &start, &end, color(index));
        count += 1;
    }
    count
}

fn sphere_vertex(radius: f32, lat: f32, lon: f32) -> Vector3<f32> {
    Vector3::new(
        radius * lat.cos() * lon.cos(),
        radius * lat.sin(),
        radius * lat.cos() * lon.sin(),
    )
}

/// UV sphere; each cell emits the a-b and a-c edges of its triangle.
pub fn draw_sphere<S: LineSink + ?Sized>(
    sphere: &Sphere,
    view_projection: &Matrix4x4,
    viewport: &Matrix4x4,
    color: Color,
    sink: &mut S,
) -> usize {
    let lon_every = 2.0 * PI / SPHERE_SUBDIVISION as f32;
    let lat_every = PI / SPHERE_SUBDIVISION as f32;
    let world = Matrix4x4::make_translate(&sphere.center);
    let matrix = screen_matrix(&world, view_projection, viewport);

    let mut count = 0;
    for lat_index in 0..SPHERE_SUBDIVISION {
        let lat = PI / 2.0 + lat_every * lat_index as f32;
        for lon_index in 0..SPHERE_SUBDIVISION {
            let lon = lon_every * lon_index as f32;
            let a = sphere_vertex(sphere.radius, lat, lon);
            let b = sphere_vertex(sphere.radius, lat + lat_every, lon);
            let c = sphere_vertex(sphere.radius, lat, lon + lon_every);
            emit(sink, &matrix, &a, &b, color);
            emit(sink, &matrix, &a, &c, color);
            count += 2;
        }
    }
    count
}

/// World-space corners of the bounded quad drawn for `plane`.
pub fn plane_corners(plane: &Plane) -> MathResult<[Vector3<f32>; 4]> {
    let center = plane.center();
    let first = vector::normalize(&vector::perpendicular(&plane.normal))?;
    let second = vector::cross(&plane.normal, &first);
    let directions = [first, -first, second, -second];
    Ok(directions.map(|d| vector::add(&center, &vector::scale(PLANE_EXTENT, &d))))
}

/// Quad outline through the plane's centre point.
///
/// Fails when the normal has no usable perpendicular (zero normal).
pub fn draw_plane<S: LineSink + ?Sized>(
    plane: &Plane,
    view_projection: &Matrix4x4,
    viewport: &Matrix4x4,
    color: Color,
    sink: &mut S,
) -> MathResult<usize> {
    let corners = plane_corners(plane)?;
    // corners are already in world space
    let matrix = screen_matrix(&Matrix4x4::identity(), view_projection, viewport);
    const EDGES: [(usize, usize); 4] = [(1, 3), (1, 2), (2, 0), (3, 0)];
    for (a, b) in EDGES {
        emit(sink, &matrix, &corners[a], &corners[b], color);
    }
    Ok(EDGES.len())
}

/// Fixed projection and viewport for a session, applied to each frame
#[derive(Debug, Clone, Copy)]
pub struct FramePipeline {
    settings: FrameSettings,
    projection: Matrix4x4,
    viewport: Matrix4x4,
}

impl FramePipeline {
    pub fn new(settings: FrameSettings) -> Self {
        Self {
            settings,
            projection: settings.projection_matrix(),
            viewport: settings.viewport_matrix(),
        }
    }

    pub fn settings(&self) -> &FrameSettings {
        &self.settings
    }

    pub fn projection(&self) -> &Matrix4x4 {
        &self.projection
    }

    pub fn viewport(&self) -> &Matrix4x4 {
        &self.viewport
    }

    /// Draw grid, sphere and plane for an already prepared scene.
    ///
    /// A camera that cannot be inverted aborts the whole frame; a degenerate
    /// plane only drops the plane.
    pub fn render<S: LineSink + ?Sized>(
        &self,
        scene: &Scene,
        frame: &FrameState,
        palette: &Palette,
        sink: &mut S,
    ) -> MathResult<FrameStats> {
        let view = scene.camera.view_matrix()?;
        let view_projection = view * self.projection;

        let grid = draw_grid(&view_projection, &self.viewport, palette, sink);
        let sphere = draw_sphere(
            &scene.sphere,
            &view_projection,
            &self.viewport,
            frame.sphere_color,
            sink,
        );
        let plane = if frame.plane_drawable {
            draw_plane(&scene.plane, &view_projection, &self.viewport, palette.plane, sink)
                .unwrap_or_else(|err| {
                    log::debug!("plane skipped this frame: {err}");
                    0
                })
        } else {
            0
        };

        let stats = FrameStats {
            grid,
            sphere,
            plane,
        };
        log::trace!("frame emitted {} segments", stats.total());
        Ok(stats)
    }

    /// Prepare `scene` for the frame, then render it.
    pub fn frame<S: LineSink + ?Sized>(
        &self,
        scene: &mut Scene,
        palette: &Palette,
        sink: &mut S,
    ) -> MathResult<(FrameState, FrameStats)> {
        let state = scene.prepare_frame(palette);
        let stats = self.render(scene, &state, palette, sink)?;
        Ok((state, stats))
    }
}

impl Default for FramePipeline {
    fn default() -> Self {
        Self::new(FrameSettings::default())
    }
}
