/// Scene primitives and collision tests
use nalgebra::Vector3;

use crate::error::MathResult;
use crate::vector;

/// A sphere; a negative radius is the caller's problem
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vector3<f32>,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vector3<f32>, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// The plane `dot(normal, p) = distance`.
///
/// `normal` is expected to be unit length; nothing here enforces it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f32>,
    pub distance: f32,
}

impl Plane {
    pub fn new(normal: Vector3<f32>, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Same plane description with a unit normal.
    pub fn normalized(&self) -> MathResult<Plane> {
        Ok(Plane {
            normal: vector::normalize(&self.normal)?,
            distance: self.distance,
        })
    }

    /// The point of the plane closest to the origin.
    pub fn center(&self) -> Vector3<f32> {
        vector::scale(self.distance, &self.normal)
    }

    pub fn signed_distance(&self, point: &Vector3<f32>) -> f32 {
        vector::dot(point, &self.normal) - self.distance
    }
}

/// Touching spheres count as colliding.
pub fn is_sphere_collision(a: &Sphere, b: &Sphere) -> bool {
    let distance = vector::length(&vector::subtract(&a.center, &b.center));
    a.radius + b.radius >= distance
}

/// Sphere against plane with a doubled distance threshold.
///
/// Collides when `radius >= |signed distance| * 2`, which is stricter than
/// the textbook `radius >= |d|`. The plane is used as given.
pub fn is_sphere_to_plane_collision(sphere: &Sphere, plane: &Plane) -> bool {
    let distance = plane.signed_distance(&sphere.center);
    sphere.radius >= distance.abs() * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(x: f32, y: f32, z: f32, radius: f32) -> Sphere {
        Sphere::new(Vector3::new(x, y, z), radius)
    }

    #[test]
    fn test_spheres_overlapping() {
        assert!(is_sphere_collision(&sphere(0.0, 0.0, 0.0, 1.0), &sphere(1.5, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_spheres_apart() {
        assert!(!is_sphere_collision(&sphere(0.0, 0.0, 0.0, 1.0), &sphere(3.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_spheres_touching_collide() {
        assert!(is_sphere_collision(&sphere(0.0, 0.0, 0.0, 1.0), &sphere(0.0, 2.0, 0.0, 1.0)));
    }

    #[test]
    fn test_sphere_below_plane_misses() {
        let s = sphere(0.0, 0.0, 0.0, 0.6);
        let p = Plane::new(Vector3::new(0.0, 1.0, 0.0), 1.0);
        assert_eq!(p.signed_distance(&s.center), -1.0);
        assert!(!is_sphere_to_plane_collision(&s, &p));
    }

    #[test]
    fn test_sphere_plane_threshold_is_doubled() {
        // A textbook test would report a hit at distance 0.5 with radius 0.6;
        // the doubled threshold needs |d| <= 0.3.
        let p = Plane::new(Vector3::new(0.0, 1.0, 0.0), 0.0);
        assert!(!is_sphere_to_plane_collision(&sphere(0.0, 0.5, 0.0, 0.6), &p));
        assert!(is_sphere_to_plane_collision(&sphere(0.0, 0.3, 0.0, 0.6), &p));
        assert!(is_sphere_to_plane_collision(&sphere(0.0, -0.25, 0.0, 0.6), &p));
    }

    #[test]
    fn test_plane_is_not_modified_or_normalized() {
        let p = Plane::new(Vector3::new(0.0, 2.0, 0.0), 0.0);
        let s = sphere(0.0, 0.2, 0.0, 0.6);
        // Non-unit normal doubles the signed distance to 0.4
        assert!(!is_sphere_to_plane_collision(&s, &p));
        assert_eq!(p.normal, Vector3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_plane_normalized_and_center() {
        let p = Plane::new(Vector3::new(0.0, 3.0, 4.0), 2.0).normalized().unwrap();
        assert!((p.normal - Vector3::new(0.0, 0.6, 0.8)).norm() < 1e-6);
        assert!((p.center() - Vector3::new(0.0, 1.2, 1.6)).norm() < 1e-6);
        assert!(Plane::new(Vector3::zeros(), 1.0).normalized().is_err());
    }
}
