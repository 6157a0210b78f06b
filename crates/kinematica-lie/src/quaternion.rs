use kinematica_linalg::{
    ops::{cross3, dot3, norm3},
    Matrix,
};
use serde::{Deserialize, Serialize};

use crate::error::{check_shape, LieError};

/// A quaternion stored as `[w, x, y, z]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WxyzQuaternion(pub [f64; 4]);

/// A quaternion stored as a scalar part and a 3-vector part.
///
/// This is the layout every quaternion product is computed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarVectorQuaternion {
    /// The scalar (real) part.
    pub scalar: f64,
    /// The vector (imaginary) part.
    pub vector: [f64; 3],
}

impl WxyzQuaternion {
    /// The identity rotation.
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0]);

    /// Create a quaternion from its components.
    #[inline]
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self([w, x, y, z])
    }

    /// The scalar component.
    #[inline]
    pub fn w(&self) -> f64 {
        self.0[0]
    }

    /// The x component.
    #[inline]
    pub fn x(&self) -> f64 {
        self.0[1]
    }

    /// The y component.
    #[inline]
    pub fn y(&self) -> f64 {
        self.0[2]
    }

    /// The z component.
    #[inline]
    pub fn z(&self) -> f64 {
        self.0[3]
    }

    /// The components as `[w, x, y, z]`.
    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        self.0
    }

    /// The Euclidean norm of the four components.
    pub fn norm(&self) -> f64 {
        self.0.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Scale to unit norm. A zero quaternion yields non-finite components.
    pub fn normalized(&self) -> Self {
        let n = self.norm();
        Self(self.0.map(|v| v / n))
    }

    /// The same rotation with a non-negative scalar part.
    pub fn canonical(&self) -> Self {
        if self.w() < 0.0 {
            Self(self.0.map(|v| -v))
        } else {
            *self
        }
    }
}

impl ScalarVectorQuaternion {
    /// The identity rotation.
    pub const IDENTITY: Self = Self {
        scalar: 1.0,
        vector: [0.0; 3],
    };

    /// Create a quaternion from its scalar and vector parts.
    #[inline]
    pub fn new(scalar: f64, vector: [f64; 3]) -> Self {
        Self { scalar, vector }
    }

    /// A pure quaternion `[0, p]` carrying a 3D point.
    #[inline]
    pub fn pure(p: &[f64; 3]) -> Self {
        Self::new(0.0, *p)
    }
}

impl From<ScalarVectorQuaternion> for WxyzQuaternion {
    #[inline]
    fn from(q: ScalarVectorQuaternion) -> Self {
        Self([q.scalar, q.vector[0], q.vector[1], q.vector[2]])
    }
}

impl From<WxyzQuaternion> for ScalarVectorQuaternion {
    #[inline]
    fn from(q: WxyzQuaternion) -> Self {
        Self {
            scalar: q.0[0],
            vector: [q.0[1], q.0[2], q.0[3]],
        }
    }
}

impl From<WxyzQuaternion> for glam::DQuat {
    #[inline]
    fn from(q: WxyzQuaternion) -> Self {
        glam::DQuat::from_xyzw(q.x(), q.y(), q.z(), q.w())
    }
}

impl From<glam::DQuat> for WxyzQuaternion {
    #[inline]
    fn from(q: glam::DQuat) -> Self {
        Self([q.w, q.x, q.y, q.z])
    }
}

impl std::ops::Mul for ScalarVectorQuaternion {
    type Output = ScalarVectorQuaternion;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        mul_scalar_vector_quaternions(&self, &rhs)
    }
}

impl std::ops::Mul for WxyzQuaternion {
    type Output = WxyzQuaternion;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        mul_wxyz_quaternions(&self, &rhs)
    }
}

/// The Hamilton product of two quaternions in scalar-vector layout.
///
/// `w = w1 * w2 - v1 . v2` and `v = w2 * v1 + w1 * v2 + v1 x v2`.
pub fn mul_scalar_vector_quaternions(
    q1: &ScalarVectorQuaternion,
    q2: &ScalarVectorQuaternion,
) -> ScalarVectorQuaternion {
    let (w1, v1) = (q1.scalar, &q1.vector);
    let (w2, v2) = (q2.scalar, &q2.vector);
    let c = cross3(v1, v2);
    ScalarVectorQuaternion {
        scalar: w1 * w2 - dot3(v1, v2),
        vector: [
            w2 * v1[0] + w1 * v2[0] + c[0],
            w2 * v1[1] + w1 * v2[1] + c[1],
            w2 * v1[2] + w1 * v2[2] + c[2],
        ],
    }
}

/// The Hamilton product of two quaternions in wxyz layout.
///
/// Computed through [`mul_scalar_vector_quaternions`] so both layouts always agree.
pub fn mul_wxyz_quaternions(q1: &WxyzQuaternion, q2: &WxyzQuaternion) -> WxyzQuaternion {
    mul_scalar_vector_quaternions(&(*q1).into(), &(*q2).into()).into()
}

/// Add two quaternions componentwise.
pub fn add_wxyz_quaternions(q1: &WxyzQuaternion, q2: &WxyzQuaternion) -> WxyzQuaternion {
    WxyzQuaternion(std::array::from_fn(|i| q1.0[i] + q2.0[i]))
}

/// The conjugate of a wxyz quaternion, negating the vector part.
pub fn conj_wxyz(q: &WxyzQuaternion) -> WxyzQuaternion {
    WxyzQuaternion([q.w(), -q.x(), -q.y(), -q.z()])
}

/// The conjugate of a scalar-vector quaternion, negating the vector part.
pub fn conj_scalar_vector(q: &ScalarVectorQuaternion) -> ScalarVectorQuaternion {
    ScalarVectorQuaternion::new(q.scalar, q.vector.map(|v| -v))
}

/// Rotate a point with the sandwich product `q * [0, p] * conj(q)`.
///
/// # Arguments
///
/// * `q` - A unit quaternion.
/// * `p` - The point to rotate.
///
/// # Returns
///
/// The vector part of the product.
pub fn sandwich_product(q: &WxyzQuaternion, p: &[f64; 3]) -> [f64; 3] {
    let q: ScalarVectorQuaternion = (*q).into();
    let qp = mul_scalar_vector_quaternions(&q, &ScalarVectorQuaternion::pure(p));
    mul_scalar_vector_quaternions(&qp, &conj_scalar_vector(&q)).vector
}

/// A unit quaternion rotating by `angle` around `axis`.
///
/// # Errors
///
/// Returns [`LieError::ZeroAxis`] if the axis has (nearly) zero length.
pub fn axis_angle_wxyz_quaternion(axis: &[f64; 3], angle: f64) -> Result<WxyzQuaternion, LieError> {
    let n = norm3(axis);
    if n < 1e-10 {
        return Err(LieError::ZeroAxis);
    }
    let (s, c) = (angle / 2.0).sin_cos();
    Ok(WxyzQuaternion([
        c,
        s * axis[0] / n,
        s * axis[1] / n,
        s * axis[2] / n,
    ]))
}

/// The rotation matrix of a unit quaternion.
pub fn wxyz_quaternion_to_so3(q: &WxyzQuaternion) -> Matrix {
    let [w, x, y, z] = q.0;
    Matrix::from_array(&[
        [
            1.0 - 2.0 * (y * y + z * z),
            2.0 * (x * y - w * z),
            2.0 * (x * z + w * y),
        ],
        [
            2.0 * (x * y + w * z),
            1.0 - 2.0 * (x * x + z * z),
            2.0 * (y * z - w * x),
        ],
        [
            2.0 * (x * z - w * y),
            2.0 * (y * z + w * x),
            1.0 - 2.0 * (x * x + y * y),
        ],
    ])
}

/// The unit quaternion of a rotation matrix, with a non-negative scalar part.
///
/// Uses Shepperd's method, picking the largest of the four diagonal combinations
/// to divide by.
///
/// # Errors
///
/// Returns [`LieError::InvalidShape`] if the matrix is not 3x3.
pub fn so3_to_wxyz_quaternion(r: &Matrix) -> Result<WxyzQuaternion, LieError> {
    check_shape(r, (3, 3))?;
    let m = |i: usize, j: usize| r[(i, j)];
    let trace = m(0, 0) + m(1, 1) + m(2, 2);

    let q = if trace > m(0, 0).max(m(1, 1)).max(m(2, 2)) {
        let s = (1.0 + trace).sqrt() * 2.0;
        [
            0.25 * s,
            (m(2, 1) - m(1, 2)) / s,
            (m(0, 2) - m(2, 0)) / s,
            (m(1, 0) - m(0, 1)) / s,
        ]
    } else if m(0, 0) >= m(1, 1) && m(0, 0) >= m(2, 2) {
        let s = (1.0 + m(0, 0) - m(1, 1) - m(2, 2)).sqrt() * 2.0;
        [
            (m(2, 1) - m(1, 2)) / s,
            0.25 * s,
            (m(0, 1) + m(1, 0)) / s,
            (m(0, 2) + m(2, 0)) / s,
        ]
    } else if m(1, 1) >= m(2, 2) {
        let s = (1.0 + m(1, 1) - m(0, 0) - m(2, 2)).sqrt() * 2.0;
        [
            (m(0, 2) - m(2, 0)) / s,
            (m(0, 1) + m(1, 0)) / s,
            0.25 * s,
            (m(1, 2) + m(2, 1)) / s,
        ]
    } else {
        let s = (1.0 + m(2, 2) - m(0, 0) - m(1, 1)).sqrt() * 2.0;
        [
            (m(1, 0) - m(0, 1)) / s,
            (m(0, 2) + m(2, 0)) / s,
            (m(1, 2) + m(2, 1)) / s,
            0.25 * s,
        ]
    };

    Ok(WxyzQuaternion(q).canonical())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::Rng;

    fn random_quaternion(rng: &mut impl Rng) -> WxyzQuaternion {
        WxyzQuaternion(std::array::from_fn(|_| rng.random_range(-1.0..1.0)))
    }

    #[test]
    fn test_layout_conversion_is_lossless() {
        let q = WxyzQuaternion::new(0.1, -0.2, 0.3, -0.4);
        let sv: ScalarVectorQuaternion = q.into();
        assert_eq!(sv.scalar, 0.1);
        assert_eq!(sv.vector, [-0.2, 0.3, -0.4]);
        assert_eq!(WxyzQuaternion::from(sv), q);
    }

    #[test]
    fn test_basis_products() {
        let i = WxyzQuaternion::new(0.0, 1.0, 0.0, 0.0);
        let j = WxyzQuaternion::new(0.0, 0.0, 1.0, 0.0);
        let k = WxyzQuaternion::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(i * j, k);
        assert_eq!(j * k, i);
        assert_eq!(k * i, j);
        // non commutative
        assert_eq!(j * i, WxyzQuaternion::new(0.0, 0.0, 0.0, -1.0));
        assert_eq!(i * i, WxyzQuaternion::new(-1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_layouts_agree_on_products() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let q1 = random_quaternion(&mut rng);
            let q2 = random_quaternion(&mut rng);
            let a = mul_wxyz_quaternions(&q1, &q2);
            let b: WxyzQuaternion =
                mul_scalar_vector_quaternions(&q1.into(), &q2.into()).into();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_products_match_glam() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let q1 = random_quaternion(&mut rng);
            let q2 = random_quaternion(&mut rng);
            let ours = mul_wxyz_quaternions(&q1, &q2);
            let theirs = WxyzQuaternion::from(glam::DQuat::from(q1) * glam::DQuat::from(q2));
            for i in 0..4 {
                assert_relative_eq!(ours.0[i], theirs.0[i], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_conj_and_add() {
        let q = WxyzQuaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(conj_wxyz(&q), WxyzQuaternion::new(1.0, -2.0, -3.0, -4.0));
        assert_eq!(
            conj_scalar_vector(&q.into()),
            ScalarVectorQuaternion::new(1.0, [-2.0, -3.0, -4.0])
        );
        let sum = add_wxyz_quaternions(&q, &conj_wxyz(&q));
        assert_eq!(sum, WxyzQuaternion::new(2.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_q_times_conj_is_squared_norm() {
        let q = WxyzQuaternion::new(1.0, 2.0, 3.0, 4.0);
        let p = q * conj_wxyz(&q);
        assert_eq!(p, WxyzQuaternion::new(30.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_sandwich_product_quarter_turn() -> Result<(), LieError> {
        let q = axis_angle_wxyz_quaternion(&[0.0, 0.0, 1.0], std::f64::consts::FRAC_PI_2)?;
        let p = sandwich_product(&q, &[1.0, 0.0, 0.0]);
        assert_relative_eq!(p[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(p[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(p[2], 0.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_sandwich_product_matches_so3() -> Result<(), LieError> {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let q = random_quaternion(&mut rng).normalized();
            let p: [f64; 3] = std::array::from_fn(|_| rng.random_range(-5.0..5.0));
            let by_quaternion = sandwich_product(&q, &p);
            let by_matrix = kinematica_linalg::ops::mul_matrix_matrix(
                &wxyz_quaternion_to_so3(&q),
                &Matrix::column(&p),
            )?;
            for i in 0..3 {
                assert!((by_quaternion[i] - by_matrix[(i, 0)]).abs() < 1e-9);
            }
        }
        Ok(())
    }

    #[test]
    fn test_so3_roundtrip_through_quaternion() -> Result<(), LieError> {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let q = random_quaternion(&mut rng).normalized().canonical();
            let back = so3_to_wxyz_quaternion(&wxyz_quaternion_to_so3(&q))?;
            for i in 0..4 {
                assert_relative_eq!(back.0[i], q.0[i], epsilon = 1e-9);
            }
        }
        Ok(())
    }

    #[test]
    fn test_so3_to_quaternion_half_turns() -> Result<(), LieError> {
        // trace = -1, exercises the diagonal branches
        for axis in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] {
            let q = axis_angle_wxyz_quaternion(&axis, std::f64::consts::PI)?;
            let r = wxyz_quaternion_to_so3(&q);
            let back = so3_to_wxyz_quaternion(&r)?;
            assert!(wxyz_quaternion_to_so3(&back).max_abs_diff(&r) < 1e-12);
        }
        assert!(so3_to_wxyz_quaternion(&Matrix::identity(4)).is_err());
        Ok(())
    }

    #[test]
    fn test_zero_axis() {
        assert_eq!(
            axis_angle_wxyz_quaternion(&[0.0, 0.0, 0.0], 1.0),
            Err(LieError::ZeroAxis)
        );
    }

    #[test]
    fn test_normalized_zero_is_not_finite() {
        let q = WxyzQuaternion::new(0.0, 0.0, 0.0, 0.0).normalized();
        assert!(q.0.iter().all(|v| v.is_nan()));
    }
}
