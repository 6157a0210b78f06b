use kinematica_linalg::Matrix;

use crate::error::{check_shape, LieError};

/// The 2x2 rotation matrix of an angle.
pub fn so2_matrix(theta: f64) -> Matrix {
    let (s, c) = theta.sin_cos();
    Matrix::from_array(&[[c, -s], [s, c]])
}

/// The angle of a 2x2 rotation matrix, in `(-pi, pi]`.
///
/// # Errors
///
/// Returns [`LieError::InvalidShape`] if the matrix is not 2x2.
pub fn so2_angle(r: &Matrix) -> Result<f64, LieError> {
    check_shape(r, (2, 2))?;
    Ok(r[(1, 0)].atan2(r[(0, 0)]))
}

/// The angle of a complex number `re + i * im`.
pub fn u1_angle(re: f64, im: f64) -> f64 {
    im.atan2(re)
}

/// The 2x2 rotation matrix of a unit complex number.
///
/// The angle is recovered with `atan2(im, re)`, so the magnitude of the complex number
/// does not matter.
pub fn u1_to_so2(re: f64, im: f64) -> Matrix {
    so2_matrix(u1_angle(re, im))
}

/// The unit complex number `(re, im)` of an angle.
pub fn so2_to_u1(theta: f64) -> (f64, f64) {
    (theta.cos(), theta.sin())
}
