use kinematica_linalg::Matrix;

use crate::{
    error::{check_shape, LieError},
    so2::so2_matrix,
};

/// The 3x3 homogeneous transform of a 2D position and heading.
pub fn se2_matrix(x: f64, y: f64, theta: f64) -> Matrix {
    let r = so2_matrix(theta);
    Matrix::from_array(&[
        [r[(0, 0)], r[(0, 1)], x],
        [r[(1, 0)], r[(1, 1)], y],
        [0.0, 0.0, 1.0],
    ])
}

/// Assemble a 3x3 homogeneous transform from a 2x2 rotation and a 2D position.
///
/// # Errors
///
/// Returns [`LieError::InvalidShape`] if the rotation is not 2x2.
pub fn se2_from_so2_and_position(rotation: &Matrix, position: &[f64; 2]) -> Result<Matrix, LieError> {
    check_shape(rotation, (2, 2))?;
    Ok(Matrix::from_array(&[
        [rotation[(0, 0)], rotation[(0, 1)], position[0]],
        [rotation[(1, 0)], rotation[(1, 1)], position[1]],
        [0.0, 0.0, 1.0],
    ]))
}

/// Lift a planar transform into 3D, placing the plane at height `z_offset`.
///
/// The rotation becomes a rotation about z.
///
/// # Errors
///
/// Returns [`LieError::InvalidShape`] if the transform is not 3x3.
///
/// Example:
///
/// ```
/// use kinematica_lie::se2::{embed_se2_in_se3, se2_matrix};
///
/// let t = embed_se2_in_se3(&se2_matrix(1.0, 2.0, 0.0), 0.01).unwrap();
/// assert_eq!(t[(0, 3)], 1.0);
/// assert_eq!(t[(2, 3)], 0.01);
/// ```
pub fn embed_se2_in_se3(se2: &Matrix, z_offset: f64) -> Result<Matrix, LieError> {
    check_shape(se2, (3, 3))?;
    Ok(Matrix::from_array(&[
        [se2[(0, 0)], se2[(0, 1)], 0.0, se2[(0, 2)]],
        [se2[(1, 0)], se2[(1, 1)], 0.0, se2[(1, 2)]],
        [0.0, 0.0, 1.0, z_offset],
        [0.0, 0.0, 0.0, 1.0],
    ]))
}
