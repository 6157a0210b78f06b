use std::str::FromStr;

use kinematica_linalg::{ops, Matrix};
use serde::{Deserialize, Serialize};

use crate::{
    error::{check_shape, LieError},
    quaternion::{axis_angle_wxyz_quaternion, WxyzQuaternion},
};

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// The x axis.
    X,
    /// The y axis.
    Y,
    /// The z axis.
    Z,
}

impl Axis {
    /// The unit vector along the axis.
    pub fn unit(&self) -> [f64; 3] {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        }
    }
}

impl FromStr for Axis {
    type Err = LieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(LieError::UnknownAxis(s.to_string())),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        write!(f, "{label}")
    }
}

/// The twelve Euler angle orders.
///
/// The first six are Tait-Bryan orders with three distinct axes, the last six are proper
/// Euler orders repeating the first axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum EulerOrder {
    XYZ,
    XZY,
    YXZ,
    YZX,
    ZXY,
    ZYX,
    XYX,
    XZX,
    YXY,
    YZY,
    ZXZ,
    ZYZ,
}

impl EulerOrder {
    /// Every Euler order.
    pub const ALL: [EulerOrder; 12] = [
        EulerOrder::XYZ,
        EulerOrder::XZY,
        EulerOrder::YXZ,
        EulerOrder::YZX,
        EulerOrder::ZXY,
        EulerOrder::ZYX,
        EulerOrder::XYX,
        EulerOrder::XZX,
        EulerOrder::YXY,
        EulerOrder::YZY,
        EulerOrder::ZXZ,
        EulerOrder::ZYZ,
    ];

    /// The three axes, in composition order.
    pub fn axes(&self) -> [Axis; 3] {
        use Axis::{X, Y, Z};
        match self {
            EulerOrder::XYZ => [X, Y, Z],
            EulerOrder::XZY => [X, Z, Y],
            EulerOrder::YXZ => [Y, X, Z],
            EulerOrder::YZX => [Y, Z, X],
            EulerOrder::ZXY => [Z, X, Y],
            EulerOrder::ZYX => [Z, Y, X],
            EulerOrder::XYX => [X, Y, X],
            EulerOrder::XZX => [X, Z, X],
            EulerOrder::YXY => [Y, X, Y],
            EulerOrder::YZY => [Y, Z, Y],
            EulerOrder::ZXZ => [Z, X, Z],
            EulerOrder::ZYZ => [Z, Y, Z],
        }
    }
}

impl FromStr for EulerOrder {
    type Err = LieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let axes = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| Axis::from_str(&c.to_string()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| LieError::UnknownEulerOrder(s.to_string()))?;

        EulerOrder::ALL
            .into_iter()
            .find(|order| order.axes().as_slice() == axes.as_slice())
            .ok_or_else(|| LieError::UnknownEulerOrder(s.to_string()))
    }
}

/// Rotation by `theta` around the x axis.
pub fn get_x_rotation_so3_matrix(theta: f64) -> Matrix {
    let (s, c) = theta.sin_cos();
    Matrix::from_array(&[[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
}

/// Rotation by `theta` around the y axis.
pub fn get_y_rotation_so3_matrix(theta: f64) -> Matrix {
    let (s, c) = theta.sin_cos();
    Matrix::from_array(&[[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
}

/// Rotation by `theta` around the z axis.
pub fn get_z_rotation_so3_matrix(theta: f64) -> Matrix {
    let (s, c) = theta.sin_cos();
    Matrix::from_array(&[[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
}

/// Rotation by `theta` around one of the coordinate axes.
pub fn get_rotation_so3_matrix(axis: Axis, theta: f64) -> Matrix {
    match axis {
        Axis::X => get_x_rotation_so3_matrix(theta),
        Axis::Y => get_y_rotation_so3_matrix(theta),
        Axis::Z => get_z_rotation_so3_matrix(theta),
    }
}

/// Compose three elemental rotations as `R1 * R2 * R3`.
///
/// # Arguments
///
/// * `axes` - The axis of each elemental rotation, left to right.
/// * `angles` - The angle of each elemental rotation.
///
/// Example:
///
/// ```
/// use kinematica_lie::so3::{euler_so3_matrix, get_x_rotation_so3_matrix, Axis};
///
/// let r = euler_so3_matrix([Axis::X, Axis::Y, Axis::Z], [0.3, 0.0, 0.0]);
/// assert!(r.max_abs_diff(&get_x_rotation_so3_matrix(0.3)) < 1e-12);
/// ```
pub fn euler_so3_matrix(axes: [Axis; 3], angles: [f64; 3]) -> Matrix {
    axes.iter()
        .zip(angles.iter())
        .map(|(axis, theta)| get_rotation_so3_matrix(*axis, *theta))
        .fold(Matrix::identity(3), |acc, r| mul3(&acc, &r))
}

/// Compose three elemental rotations in one of the standard Euler orders.
pub fn euler_order_so3_matrix(order: EulerOrder, angles: [f64; 3]) -> Matrix {
    euler_so3_matrix(order.axes(), angles)
}

/// Rotation by `angle` around an arbitrary axis (Rodrigues' formula).
///
/// # Errors
///
/// Returns [`LieError::ZeroAxis`] if the axis has (nearly) zero length.
pub fn axis_angle_so3_matrix(axis: &[f64; 3], angle: f64) -> Result<Matrix, LieError> {
    let magnitude = ops::norm3(axis);
    if magnitude < 1e-10 {
        return Err(LieError::ZeroAxis);
    }
    let k = axis.map(|v| v / magnitude);
    let (s, c) = angle.sin_cos();

    // column j is the image of the basis vector e_j
    let rotate_basis = |j: usize| -> [f64; 3] {
        let mut e = [0.0; 3];
        e[j] = 1.0;
        let k_cross_e = ops::cross3(&k, &e);
        let k_dot_e = ops::dot3(&k, &e);
        std::array::from_fn(|i| c * e[i] + s * k_cross_e[i] + (1.0 - c) * k_dot_e * k[i])
    };
    let columns = [rotate_basis(0), rotate_basis(1), rotate_basis(2)];

    Ok(Matrix::from_fn(3, 3, |i, j| columns[j][i]))
}

/// The rotation matrix of roll, pitch and yaw angles.
///
/// Roll about x, then pitch about y, then yaw about z, all about the fixed frame
/// axes: `R = Rz(yaw) * Ry(pitch) * Rx(roll)`.
pub fn get_rpy_so3_matrix(rpy: [f64; 3]) -> Matrix {
    let [roll, pitch, yaw] = rpy;
    euler_so3_matrix([Axis::Z, Axis::Y, Axis::X], [yaw, pitch, roll])
}

/// The unit quaternion of roll, pitch and yaw angles.
///
/// Built from half-angle quaternions, `q = qz(yaw) * qy(pitch) * qx(roll)`, the same
/// rotation as [`get_rpy_so3_matrix`].
pub fn get_rpy_wxyz_quaternion(rpy: [f64; 3]) -> WxyzQuaternion {
    let [roll, pitch, yaw] = rpy;
    let half = |theta: f64, axis: usize| {
        let (s, c) = (theta / 2.0).sin_cos();
        let mut q = [c, 0.0, 0.0, 0.0];
        q[axis + 1] = s;
        WxyzQuaternion(q)
    };
    half(yaw, 2) * half(pitch, 1) * half(roll, 0)
}

/// The roll, pitch and yaw angles of a rotation matrix.
///
/// Inverse of [`get_rpy_so3_matrix`] with pitch in `[-pi/2, pi/2]`. At the gimbal lock
/// (`|pitch| = pi/2`) the roll is set to zero.
///
/// # Errors
///
/// Returns [`LieError::InvalidShape`] if the matrix is not 3x3.
pub fn so3_to_rpy(r: &Matrix) -> Result<[f64; 3], LieError> {
    check_shape(r, (3, 3))?;
    let sin_pitch = (-r[(2, 0)]).clamp(-1.0, 1.0);
    let pitch = sin_pitch.asin();
    if sin_pitch.abs() > 1.0 - 1e-12 {
        let yaw = (-r[(0, 1)]).atan2(r[(1, 1)]);
        return Ok([0.0, pitch, yaw]);
    }
    let roll = r[(2, 1)].atan2(r[(2, 2)]);
    let yaw = r[(1, 0)].atan2(r[(0, 0)]);
    Ok([roll, pitch, yaw])
}

/// The quaternion rotating by `angle` around a coordinate axis.
pub fn axis_wxyz_quaternion(axis: Axis, angle: f64) -> WxyzQuaternion {
    // a coordinate axis is never zero
    axis_angle_wxyz_quaternion(&axis.unit(), angle).unwrap_or(WxyzQuaternion::IDENTITY)
}

/// Rotate a point by a 3x3 rotation matrix.
///
/// # Errors
///
/// Returns [`LieError::InvalidShape`] if the matrix is not 3x3.
pub fn rotate_point(r: &Matrix, p: &[f64; 3]) -> Result<[f64; 3], LieError> {
    check_shape(r, (3, 3))?;
    let out = ops::mul_matrix_matrix(r, &Matrix::column(p))?;
    Ok([out[(0, 0)], out[(1, 0)], out[(2, 0)]])
}

/// Whether a matrix is a rotation: orthonormal with determinant +1 within `tol`.
pub fn is_so3(r: &Matrix, tol: f64) -> bool {
    if r.shape() != (3, 3) {
        return false;
    }
    let rtr = mul3(&ops::transpose(r), r);
    let det = ops::determinant_3x3(r).unwrap_or(0.0);
    rtr.max_abs_diff(&Matrix::identity(3)) < tol && (det - 1.0).abs() < tol
}

// both operands are 3x3 by construction
fn mul3(a: &Matrix, b: &Matrix) -> Matrix {
    Matrix::from_fn(3, 3, |i, j| (0..3).map(|k| a[(i, k)] * b[(k, j)]).sum())
}
