use kinematica_linalg::{ops, Matrix};

use crate::{
    error::{check_shape, LieError},
    quaternion::{wxyz_quaternion_to_so3, WxyzQuaternion},
    so3::get_rpy_so3_matrix,
};

// rotation is 3x3 by construction
fn homogeneous(rotation: &Matrix, position: &[f64; 3]) -> Matrix {
    Matrix::from_fn(4, 4, |i, j| match (i, j) {
        (3, 3) => 1.0,
        (3, _) => 0.0,
        (_, 3) => position[i],
        _ => rotation[(i, j)],
    })
}

/// Assemble a 4x4 homogeneous transform from a rotation matrix and a translation.
///
/// # Errors
///
/// Returns [`LieError::InvalidShape`] if the rotation is not 3x3.
pub fn se3_from_so3_and_position(rotation: &Matrix, position: &[f64; 3]) -> Result<Matrix, LieError> {
    check_shape(rotation, (3, 3))?;
    Ok(homogeneous(rotation, position))
}

/// The homogeneous transform of a translation and roll, pitch, yaw angles.
///
/// Example:
///
/// ```
/// use kinematica_lie::se3::get_xyz_rpy_se3_matrix;
///
/// let t = get_xyz_rpy_se3_matrix([1.0, 2.0, 3.0], [0.0, 0.0, 0.0]);
/// assert_eq!(t[(0, 3)], 1.0);
/// assert_eq!(t[(3, 3)], 1.0);
/// ```
pub fn get_xyz_rpy_se3_matrix(xyz: [f64; 3], rpy: [f64; 3]) -> Matrix {
    homogeneous(&get_rpy_so3_matrix(rpy), &xyz)
}

/// The homogeneous transform of a translation and a unit quaternion.
pub fn se3_from_wxyz_and_position(q: &WxyzQuaternion, position: &[f64; 3]) -> Matrix {
    homogeneous(&wxyz_quaternion_to_so3(q), position)
}

/// The homogeneous transform of a pure translation.
pub fn se3_translation_matrix(xyz: [f64; 3]) -> Matrix {
    get_xyz_rpy_se3_matrix(xyz, [0.0; 3])
}

/// The rotation block of a homogeneous transform.
///
/// # Errors
///
/// Returns [`LieError::InvalidShape`] if the matrix is not 4x4.
pub fn se3_rotation(t: &Matrix) -> Result<Matrix, LieError> {
    check_shape(t, (4, 4))?;
    Ok(t.block(0, 0, 3, 3)?)
}

/// The translation column of a homogeneous transform.
///
/// # Errors
///
/// Returns [`LieError::InvalidShape`] if the matrix is not 4x4.
pub fn se3_translation(t: &Matrix) -> Result<[f64; 3], LieError> {
    check_shape(t, (4, 4))?;
    Ok([t[(0, 3)], t[(1, 3)], t[(2, 3)]])
}

/// Compose two homogeneous transforms, `a * b`.
///
/// # Errors
///
/// Returns [`LieError::InvalidShape`] if either matrix is not 4x4.
pub fn se3_compose(a: &Matrix, b: &Matrix) -> Result<Matrix, LieError> {
    check_shape(a, (4, 4))?;
    check_shape(b, (4, 4))?;
    Ok(ops::mul_matrix_matrix(a, b)?)
}

/// Invert a rigid transform using `R^T` and `-R^T t`.
///
/// # Errors
///
/// Returns [`LieError::InvalidShape`] if the matrix is not 4x4.
pub fn se3_inverse(t: &Matrix) -> Result<Matrix, LieError> {
    let rotation_t = ops::transpose(&se3_rotation(t)?);
    let position = se3_translation(t)?;
    let rotated = ops::mul_matrix_matrix(&rotation_t, &Matrix::column(&position))?;
    let inv_position = [-rotated[(0, 0)], -rotated[(1, 0)], -rotated[(2, 0)]];
    se3_from_so3_and_position(&rotation_t, &inv_position)
}

/// Apply a homogeneous transform to a 3D point.
///
/// # Errors
///
/// Returns [`LieError::InvalidShape`] if the matrix is not 4x4.
pub fn se3_transform_point(t: &Matrix, p: &[f64; 3]) -> Result<[f64; 3], LieError> {
    check_shape(t, (4, 4))?;
    let out = ops::mul_matrix_matrix(t, &Matrix::column(&[p[0], p[1], p[2], 1.0]))?;
    Ok([out[(0, 0)], out[(1, 0)], out[(2, 0)]])
}
