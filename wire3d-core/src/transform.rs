/// Homogeneous point transformation
use nalgebra::{RowVector4, Vector3};

use crate::matrix::Matrix4x4;

/// Transform `v` as the row vector `(v, 1) * m`.
///
/// When the resulting `w` is non-zero, x/y/z are divided by it. A zero `w`
/// leaves the result undivided, which treats the point as a direction at
/// infinity.
pub fn transform(v: &Vector3<f32>, m: &Matrix4x4) -> Vector3<f32> {
    let h = RowVector4::new(v.x, v.y, v.z, 1.0) * m.as_matrix();
    let w = h[3];
    if w != 0.0 {
        Vector3::new(h[0] / w, h[1] / w, h[2] / w)
    } else {
        Vector3::new(h[0], h[1], h[2])
    }
}

pub fn transform_all(points: &[Vector3<f32>], m: &Matrix4x4) -> Vec<Vector3<f32>> {
    points.iter().map(|p| transform(p, m)).collect()
}
