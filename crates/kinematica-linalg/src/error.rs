/// An error type for the linear algebra operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// The operands of a binary operation have incompatible shapes.
    #[error("Dimension mismatch in {op}: lhs is {lhs:?}, rhs is {rhs:?}")]
    DimensionMismatch {
        /// Name of the operation that failed.
        op: &'static str,
        /// Shape (rows, cols) of the left operand.
        lhs: (usize, usize),
        /// Shape (rows, cols) of the right operand.
        rhs: (usize, usize),
    },

    /// The data length does not match the requested shape.
    #[error("Invalid shape. Cannot build a {0}x{1} matrix from {2} elements")]
    InvalidShape(usize, usize, usize),

    /// A matrix that is neither a row nor a column vector was used as a vector.
    #[error("Expected a row or column vector, got a {0}x{1} matrix")]
    NotAVector(usize, usize),
}
