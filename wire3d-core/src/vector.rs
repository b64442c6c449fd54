/// Three-component vector helpers
use nalgebra::Vector3;

use crate::error::{MathError, MathResult, EPSILON};

pub fn add(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    a + b
}

pub fn subtract(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    a - b
}

pub fn scale(k: f32, v: &Vector3<f32>) -> Vector3<f32> {
    v * k
}

pub fn dot(a: &Vector3<f32>, b: &Vector3<f32>) -> f32 {
    a.dot(b)
}

pub fn length(v: &Vector3<f32>) -> f32 {
    v.norm()
}

/// Scale `v` to unit length.
///
/// Vectors shorter than [`EPSILON`] have no direction, so they are rejected
/// instead of producing NaN components.
pub fn normalize(v: &Vector3<f32>) -> MathResult<Vector3<f32>> {
    let length = v.norm();
    if length < EPSILON || !length.is_finite() {
        return Err(MathError::DegenerateVector { length });
    }
    Ok(v / length)
}

/// Right-handed cross product.
pub fn cross(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    a.cross(b)
}

/// Pick one vector orthogonal to `v`.
///
/// The result is deterministic but not unit length. Vectors lying on the z
/// axis take the second branch; the zero vector maps to zero.
pub fn perpendicular(v: &Vector3<f32>) -> Vector3<f32> {
    if v.x != 0.0 || v.y != 0.0 {
        return Vector3::new(-v.y, v.x, 0.0);
    }
    Vector3::new(0.0, -v.z, v.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_componentwise_ops() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-4.0, 0.5, 2.0);
        assert_eq!(add(&a, &b), Vector3::new(-3.0, 2.5, 5.0));
        assert_eq!(subtract(&a, &b), Vector3::new(5.0, 1.5, 1.0));
        assert_eq!(scale(2.0, &a), Vector3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_normalize_unit_length() {
        for v in [
            Vector3::new(3.0, 4.0, 0.0),
            Vector3::new(-0.01, 0.02, 5.0),
            Vector3::new(1e-3, 0.0, 0.0),
        ] {
            let n = normalize(&v).unwrap();
            assert!((length(&n) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_normalize_zero_is_error() {
        let err = normalize(&Vector3::zeros()).unwrap_err();
        assert_eq!(err, MathError::DegenerateVector { length: 0.0 });
        assert!(normalize(&Vector3::new(1e-8, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_cross_right_handed() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(cross(&x, &y), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(cross(&y, &x), Vector3::new(0.0, 0.0, -1.0));

        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        let c = cross(&a, &b);
        assert_eq!(c, Vector3::new(-3.0, 6.0, -3.0));
        assert_eq!(dot(&c, &a), 0.0);
        assert_eq!(dot(&c, &b), 0.0);
    }

    #[test]
    fn test_perpendicular_general_branch_is_orthogonal() {
        let v = Vector3::new(0.3, -1.2, 2.0);
        let p = perpendicular(&v);
        assert_eq!(p, Vector3::new(1.2, 0.3, 0.0));
        assert!(dot(&p, &v).abs() < 1e-6);
    }

    #[test]
    fn test_perpendicular_z_axis_branch_is_orthogonal() {
        // (0, -z, y) only runs when x == y == 0, so it reduces to (0, -z, 0)
        let v = Vector3::new(0.0, 0.0, 2.5);
        let p = perpendicular(&v);
        assert_eq!(p, Vector3::new(0.0, -2.5, 0.0));
        assert_eq!(dot(&p, &v), 0.0);
    }

    #[test]
    fn test_perpendicular_of_zero_cannot_be_normalized() {
        let p = perpendicular(&Vector3::zeros());
        assert_eq!(p, Vector3::zeros());
        assert!(normalize(&p).is_err());
    }
}
