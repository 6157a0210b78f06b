use kinematica_linalg::LinalgError;

/// An error type for the rotation and transform builders.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LieError {
    /// Error coming from the matrix algebra.
    #[error(transparent)]
    Linalg(#[from] LinalgError),

    /// An axis label other than x, y or z.
    #[error("Unknown rotation axis: {0}. Expected one of x, y, z")]
    UnknownAxis(String),

    /// An Euler order label that is not one of the twelve standard orders.
    #[error("Unknown Euler order: {0}")]
    UnknownEulerOrder(String),

    /// An axis-angle rotation was requested around a zero vector.
    #[error("Cannot compute a rotation from a zero axis")]
    ZeroAxis,

    /// A matrix with the wrong shape for the requested group.
    #[error("Expected a {expected:?} matrix, got {actual:?}")]
    InvalidShape {
        /// The expected shape.
        expected: (usize, usize),
        /// The shape that was given.
        actual: (usize, usize),
    },
}

pub(crate) fn check_shape(
    m: &kinematica_linalg::Matrix,
    expected: (usize, usize),
) -> Result<(), LieError> {
    if m.shape() != expected {
        return Err(LieError::InvalidShape {
            expected,
            actual: m.shape(),
        });
    }
    Ok(())
}
