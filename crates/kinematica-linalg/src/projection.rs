use crate::{
    error::LinalgError,
    matrix::{IntoMatrixOperand, Matrix},
    ops,
};

/// Lower bound on the squared length of the projection direction.
const MIN_DENOMINATOR: f64 = 1e-9;

/// Scalar projection of `v` onto `u`, as a fraction of `u`.
///
/// Computes `(v . u) / (u . u)` with the denominator floored at `1e-9`.
///
/// # Arguments
///
/// * `v` - The vector to project.
/// * `u` - The direction to project onto.
/// * `clamp` - Clamp the result to `[0, 1]`, which projects onto the segment `[0, u]`
///   instead of the infinite line.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if the vectors have different lengths.
pub fn proj_scalar<A, B>(v: &A, u: &B, clamp: bool) -> Result<f64, LinalgError>
where
    A: IntoMatrixOperand + ?Sized,
    B: IntoMatrixOperand + ?Sized,
{
    let n = ops::dot_product(v, u)?;
    let d = ops::dot_product(u, u)?.max(MIN_DENOMINATOR);
    let p = n / d;
    Ok(if clamp { p.clamp(0.0, 1.0) } else { p })
}

/// Project a point onto the line through `a` and `b`.
///
/// With `clamp` set the projection stays on the segment `[a, b]`.
///
/// # Returns
///
/// The projected point as a column vector.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if the points have different dimensions.
///
/// Example:
///
/// ```
/// use kinematica_linalg::projection::proj_pt_onto_line;
///
/// let p = proj_pt_onto_line(&[1.0, 1.0], &[0.0, 0.0], &[2.0, 0.0], false).unwrap();
/// assert_eq!(p.unroll(), vec![1.0, 0.0]);
/// ```
pub fn proj_pt_onto_line<P, A, B>(pt: &P, a: &A, b: &B, clamp: bool) -> Result<Matrix, LinalgError>
where
    P: IntoMatrixOperand + ?Sized,
    A: IntoMatrixOperand + ?Sized,
    B: IntoMatrixOperand + ?Sized,
{
    let a = a.to_operand();
    let u = ops::sub(b, &a)?;
    let v = ops::sub(pt, &a)?;
    let p = proj_scalar(&v, &u, clamp)?;
    ops::add(&a, &ops::mul_scalar(&u, p))
}

/// Euclidean distance from a point to the line through `a` and `b`.
///
/// With `clamp` set this is the distance to the segment `[a, b]`.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if the points have different dimensions.
pub fn pt_dis_to_line<P, A, B>(pt: &P, a: &A, b: &B, clamp: bool) -> Result<f64, LinalgError>
where
    P: IntoMatrixOperand + ?Sized,
    A: IntoMatrixOperand + ?Sized,
    B: IntoMatrixOperand + ?Sized,
{
    let projected = proj_pt_onto_line(pt, a, b, clamp)?;
    let diff = ops::sub(pt, &projected)?;
    Ok(ops::frobenius_norm(&diff))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_proj_scalar() -> Result<(), LinalgError> {
        assert_relative_eq!(proj_scalar(&[2.0, 1.0], &[4.0, 0.0], false)?, 0.5);
        assert_relative_eq!(proj_scalar(&[8.0, 1.0], &[4.0, 0.0], false)?, 2.0);
        assert_relative_eq!(proj_scalar(&[8.0, 1.0], &[4.0, 0.0], true)?, 1.0);
        assert_relative_eq!(proj_scalar(&[-8.0, 1.0], &[4.0, 0.0], true)?, 0.0);
        Ok(())
    }

    #[test]
    fn test_proj_scalar_zero_direction_is_finite() -> Result<(), LinalgError> {
        // the floored denominator keeps a zero direction from producing NaN
        let p = proj_scalar(&[1.0, 1.0], &[0.0, 0.0], false)?;
        assert_eq!(p, 0.0);
        Ok(())
    }

    #[test]
    fn test_proj_scalar_mismatch() {
        assert!(proj_scalar(&[1.0, 1.0, 1.0], &[1.0, 0.0], false).is_err());
    }

    #[test]
    fn test_proj_pt_onto_line() -> Result<(), LinalgError> {
        let p = proj_pt_onto_line(&[3.0, 2.0, 5.0], &[0.0, 0.0, 0.0], &[1.0, 0.0, 0.0], false)?;
        assert_eq!(p.unroll(), vec![3.0, 0.0, 0.0]);

        let clamped =
            proj_pt_onto_line(&[3.0, 2.0, 5.0], &[0.0, 0.0, 0.0], &[1.0, 0.0, 0.0], true)?;
        assert_eq!(clamped.unroll(), vec![1.0, 0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_pt_dis_to_line() -> Result<(), LinalgError> {
        let d = pt_dis_to_line(&[1.0, 3.0], &[0.0, 0.0], &[2.0, 0.0], false)?;
        assert_relative_eq!(d, 3.0);

        // beyond the segment end the clamped distance is to the endpoint
        let d = pt_dis_to_line(&[5.0, 4.0], &[0.0, 0.0], &[2.0, 0.0], true)?;
        assert_relative_eq!(d, 5.0);
        Ok(())
    }
}
