/// 4x4 matrices in row-vector convention
///
/// Points are transformed as row vectors (`v' = v * M`), so translation lives
/// in row 3 and `a * b` applies `a` first, then `b`. Every constructor in this
/// crate follows that convention.
use nalgebra::{Matrix4, Vector3};
use std::ops::{Index, IndexMut, Mul};

use crate::error::{MathError, MathResult, DETERMINANT_EPSILON};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4x4(Matrix4<f32>);

impl Matrix4x4 {
    pub fn identity() -> Self {
        Self(Matrix4::identity())
    }

    pub fn zeros() -> Self {
        Self(Matrix4::zeros())
    }

    /// Build from `rows[row][col]`.
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self(Matrix4::from_fn(|i, j| rows[i][j]))
    }

    pub fn to_rows(&self) -> [[f32; 4]; 4] {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = self.0[(i, j)];
            }
        }
        rows
    }

    pub fn as_matrix(&self) -> &Matrix4<f32> {
        &self.0
    }

    /// `C[i][j] = sum_k A[i][k] * B[k][j]`
    pub fn multiply(&self, other: &Matrix4x4) -> Matrix4x4 {
        Self(self.0 * other.0)
    }

    pub fn transpose(&self) -> Matrix4x4 {
        Self(self.0.transpose())
    }

    /// Determinant by cofactor expansion along row 0.
    pub fn determinant(&self) -> f32 {
        (0..4).map(|col| self.0[(0, col)] * self.cofactor(0, col)).sum()
    }

    /// Signed minor of the element at `row`, `col`.
    fn cofactor(&self, row: usize, col: usize) -> f32 {
        let minor = self.0.remove_row(row).remove_column(col).determinant();
        if (row + col) % 2 == 0 {
            minor
        } else {
            -minor
        }
    }

    /// Adjugate divided by the determinant.
    ///
    /// Returns [`MathError::SingularMatrix`] when `|det| < DETERMINANT_EPSILON`,
    /// when the determinant is not finite, or when the adjugate overflows.
    pub fn inverse(&self) -> MathResult<Matrix4x4> {
        let determinant = self.determinant();
        if determinant.abs() < DETERMINANT_EPSILON || !determinant.is_finite() {
            return Err(MathError::SingularMatrix { determinant });
        }
        let inv_det = 1.0 / determinant;
        // adj(M)[i][j] = cofactor(j, i)
        let inverse = Self(Matrix4::from_fn(|i, j| self.cofactor(j, i) * inv_det));
        if !inverse.is_finite() {
            return Err(MathError::SingularMatrix { determinant });
        }
        Ok(inverse)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Element-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Matrix4x4, tolerance: f32) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// `diag(s.x, s.y, s.z, 1)`
    pub fn make_scale(scale: &Vector3<f32>) -> Matrix4x4 {
        let mut m = Self::identity();
        m[(0, 0)] = scale.x;
        m[(1, 1)] = scale.y;
        m[(2, 2)] = scale.z;
        m
    }

    pub fn make_rotate_x(radian: f32) -> Matrix4x4 {
        let (sin, cos) = radian.sin_cos();
        let mut m = Self::identity();
        m[(1, 1)] = cos;
        m[(1, 2)] = sin;
        m[(2, 1)] = -sin;
        m[(2, 2)] = cos;
        m
    }

    pub fn make_rotate_y(radian: f32) -> Matrix4x4 {
        let (sin, cos) = radian.sin_cos();
        let mut m = Self::identity();
        m[(0, 0)] = cos;
        m[(0, 2)] = -sin;
        m[(2, 0)] = sin;
        m[(2, 2)] = cos;
        m
    }

    pub fn make_rotate_z(radian: f32) -> Matrix4x4 {
        let (sin, cos) = radian.sin_cos();
        let mut m = Self::identity();
        m[(0, 0)] = cos;
        m[(0, 1)] = sin;
        m[(1, 0)] = -sin;
        m[(1, 1)] = cos;
        m
    }

    /// Euler rotation applied X first, then Y, then Z.
    pub fn make_rotate(rotate: &Vector3<f32>) -> Matrix4x4 {
        let x = Self::make_rotate_x(rotate.x);
        let y = Self::make_rotate_y(rotate.y);
        let z = Self::make_rotate_z(rotate.z);
        x * (y * z)
    }

    pub fn make_translate(translate: &Vector3<f32>) -> Matrix4x4 {
        let mut m = Self::identity();
        m[(3, 0)] = translate.x;
        m[(3, 1)] = translate.y;
        m[(3, 2)] = translate.z;
        m
    }

    /// Scale, then rotate, then translate.
    pub fn make_affine(
        scale: &Vector3<f32>,
        rotate: &Vector3<f32>,
        translate: &Vector3<f32>,
    ) -> Matrix4x4 {
        let s = Self::make_scale(scale);
        let r = Self::make_rotate(rotate);
        let t = Self::make_translate(translate);
        s * (r * t)
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Matrix4<f32>> for Matrix4x4 {
    fn from(m: Matrix4<f32>) -> Self {
        Self(m)
    }
}

impl Index<(usize, usize)> for Matrix4x4 {
    type Output = f32;

    fn index(&self, index: (usize, usize)) -> &f32 {
        &self.0[index]
    }
}

impl IndexMut<(usize, usize)> for Matrix4x4 {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f32 {
        &mut self.0[index]
    }
}

impl Mul for Matrix4x4 {
    type Output = Matrix4x4;

    fn mul(self, rhs: Matrix4x4) -> Matrix4x4 {
        self.multiply(&rhs)
    }
}

impl Mul<&Matrix4x4> for &Matrix4x4 {
    type Output = Matrix4x4;

    fn mul(self, rhs: &Matrix4x4) -> Matrix4x4 {
        self.multiply(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn sample_a() -> Matrix4x4 {
        Matrix4x4::from_rows([
            [3.2, 0.7, 9.6, 4.4],
            [5.5, 1.3, 7.8, 2.1],
            [6.9, 8.0, 2.6, 1.0],
            [0.5, 7.2, 5.1, 3.3],
        ])
    }

    fn sample_b() -> Matrix4x4 {
        Matrix4x4::from_rows([
            [4.1, 6.5, 3.3, 2.2],
            [8.8, 0.6, 9.9, 7.7],
            [1.1, 5.5, 6.6, 0.0],
            [3.3, 9.9, 8.8, 2.2],
        ])
    }

    #[test]
    fn test_identity_determinant() {
        assert_eq!(Matrix4x4::identity().determinant(), 1.0);
    }

    #[test]
    fn test_multiply_matches_definition() {
        let a = sample_a();
        let b = sample_b();
        let c = a * b;
        for i in 0..4 {
            for j in 0..4 {
                let expected: f32 = (0..4).map(|k| a[(i, k)] * b[(k, j)]).sum();
                assert!((c[(i, j)] - expected).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_multiply_identity() {
        let a = sample_a();
        assert!((a * Matrix4x4::identity()).approx_eq(&a, 1e-6));
        assert!((Matrix4x4::identity() * a).approx_eq(&a, 1e-6));
    }

    #[test]
    fn test_multiply_associative() {
        let m = sample_a();
        let n = sample_b();
        let p = Matrix4x4::make_affine(
            &Vector3::new(1.2, 0.8, 2.0),
            &Vector3::new(0.3, -0.4, 1.1),
            &Vector3::new(-2.0, 4.0, 0.5),
        );
        let left = (m * n) * p;
        let right = m * (n * p);
        assert!(left.approx_eq(&right, 1e-2));
    }

    #[test]
    fn test_multiply_not_commutative() {
        assert!(!(sample_a() * sample_b()).approx_eq(&(sample_b() * sample_a()), 1e-3));
    }

    #[test]
    fn test_determinant_matches_nalgebra() {
        for m in [sample_a(), sample_b()] {
            let expected = m.as_matrix().determinant();
            assert!((m.determinant() - expected).abs() <= expected.abs() * 1e-4);
        }
    }

    #[test]
    fn test_determinant_of_scale() {
        let m = Matrix4x4::make_scale(&Vector3::new(2.0, 3.0, 4.0));
        assert!((m.determinant() - 24.0).abs() < 1e-5);
    }

    #[test]
    fn test_inverse_times_original_is_identity() {
        for m in [sample_a(), sample_b()] {
            let inv = m.inverse().unwrap();
            assert!((m * inv).approx_eq(&Matrix4x4::identity(), 1e-3));
            assert!((inv * m).approx_eq(&Matrix4x4::identity(), 1e-3));
        }
    }

    #[test]
    fn test_inverse_of_singular_is_error() {
        let m = Matrix4x4::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        assert_eq!(m.determinant(), 0.0);
        assert!(matches!(m.inverse(), Err(MathError::SingularMatrix { .. })));
        assert_eq!(
            Matrix4x4::zeros().inverse(),
            Err(MathError::SingularMatrix { determinant: 0.0 })
        );
    }

    #[test]
    fn test_inverse_of_small_scale_affine() {
        let m = Matrix4x4::make_affine(
            &Vector3::new(0.009, 0.009, 0.009),
            &Vector3::new(0.3, 0.2, 0.1),
            &Vector3::new(1.0, 2.0, 3.0),
        );
        // 0.009^3, well below the length epsilon
        assert!(m.determinant().abs() < 1e-6);
        let inv = m.inverse().unwrap();
        assert!((m * inv).approx_eq(&Matrix4x4::identity(), 1e-2));
        let expected = m.as_matrix().try_inverse().unwrap();
        assert!((inv.as_matrix() - expected).amax() < 0.5);
    }

    #[test]
    fn test_inverse_of_translate() {
        let t = Vector3::new(1.0, -2.0, 3.0);
        let inv = Matrix4x4::make_translate(&t).inverse().unwrap();
        assert!(inv.approx_eq(&Matrix4x4::make_translate(&-t), 1e-6));
    }

    #[test]
    fn test_translate_in_row_three() {
        let m = Matrix4x4::make_translate(&Vector3::new(4.1, 2.6, 0.8));
        let rows = m.to_rows();
        assert_eq!(rows[3], [4.1, 2.6, 0.8, 1.0]);
        assert_eq!(rows[0], [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rotate_axes_row_layout() {
        let x = Matrix4x4::make_rotate_x(FRAC_PI_2);
        assert!((x[(1, 2)] - 1.0).abs() < 1e-6);
        assert!((x[(2, 1)] + 1.0).abs() < 1e-6);

        let y = Matrix4x4::make_rotate_y(FRAC_PI_2);
        assert!((y[(0, 2)] + 1.0).abs() < 1e-6);
        assert!((y[(2, 0)] - 1.0).abs() < 1e-6);

        let z = Matrix4x4::make_rotate_z(FRAC_PI_2);
        assert!((z[(0, 1)] - 1.0).abs() < 1e-6);
        assert!((z[(1, 0)] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_composes_x_then_y_then_z() {
        let r = Vector3::new(0.4, 1.3, 2.6);
        let expected = Matrix4x4::make_rotate_x(r.x)
            * (Matrix4x4::make_rotate_y(r.y) * Matrix4x4::make_rotate_z(r.z));
        assert!(Matrix4x4::make_rotate(&r).approx_eq(&expected, 1e-6));
        let reversed = Matrix4x4::make_rotate_z(r.z)
            * Matrix4x4::make_rotate_y(r.y)
            * Matrix4x4::make_rotate_x(r.x);
        assert!(!Matrix4x4::make_rotate(&r).approx_eq(&reversed, 1e-3));
    }

    #[test]
    fn test_affine_matches_known_values() {
        let m = Matrix4x4::make_affine(
            &Vector3::new(1.2, 0.79, -2.1),
            &Vector3::new(0.4, 1.43, -0.8),
            &Vector3::new(2.7, -4.15, 1.57),
        );
        let expected = Matrix4x4::from_rows([
            [0.1173, -0.1208, -1.1881, 0.0],
            [0.7342, 0.2884, 0.0432, 0.0],
            [-0.7476, 1.9436, -0.2714, 0.0],
            [2.7, -4.15, 1.57, 1.0],
        ]);
        assert!(m.approx_eq(&expected, 1e-3));
    }

    #[test]
    fn test_rotation_is_orthonormal() {
        let r = Matrix4x4::make_rotate(&Vector3::new(0.26, -1.0, 0.5));
        assert!((r * r.transpose()).approx_eq(&Matrix4x4::identity(), 1e-5));
        assert!((r.determinant() - 1.0).abs() < 1e-5);
    }
}
