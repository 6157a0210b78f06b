use crate::{
    error::LinalgError,
    matrix::{IntoMatrixOperand, Matrix},
};

fn elementwise<A, B>(
    op: &'static str,
    a: &A,
    b: &B,
    f: impl Fn(f64, f64) -> f64,
) -> Result<Matrix, LinalgError>
where
    A: IntoMatrixOperand + ?Sized,
    B: IntoMatrixOperand + ?Sized,
{
    let a = a.to_operand();
    let b = b.to_operand();
    if a.shape() != b.shape() {
        return Err(LinalgError::DimensionMismatch {
            op,
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }
    let data = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(&x, &y)| f(x, y))
        .collect();
    Matrix::from_row_major(a.rows(), a.cols(), data)
}

/// Add two matrices elementwise.
///
/// Flat sequences are treated as column vectors.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if the shapes differ.
///
/// Example:
///
/// ```
/// use kinematica_linalg::ops::add;
///
/// let c = add(&[1.0, 2.0], &[3.0, 4.0]).unwrap();
/// assert_eq!(c.unroll(), vec![4.0, 6.0]);
/// ```
pub fn add<A, B>(a: &A, b: &B) -> Result<Matrix, LinalgError>
where
    A: IntoMatrixOperand + ?Sized,
    B: IntoMatrixOperand + ?Sized,
{
    elementwise("add", a, b, |x, y| x + y)
}

/// Subtract `b` from `a` elementwise.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if the shapes differ.
pub fn sub<A, B>(a: &A, b: &B) -> Result<Matrix, LinalgError>
where
    A: IntoMatrixOperand + ?Sized,
    B: IntoMatrixOperand + ?Sized,
{
    elementwise("sub", a, b, |x, y| x - y)
}

/// Multiply two matrices.
///
/// Both operands must already be proper matrices, no reshaping is done here.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if `a.cols() != b.rows()`.
pub fn mul_matrix_matrix(a: &Matrix, b: &Matrix) -> Result<Matrix, LinalgError> {
    if a.cols() != b.rows() {
        return Err(LinalgError::DimensionMismatch {
            op: "mul_matrix_matrix",
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }

    let mut out = Matrix::zeros(a.rows(), b.cols());
    for i in 0..a.rows() {
        for j in 0..b.cols() {
            let mut acc = 0.0;
            for k in 0..a.cols() {
                acc += a[(i, k)] * b[(k, j)];
            }
            out[(i, j)] = acc;
        }
    }
    Ok(out)
}

/// Multiply every entry by a scalar.
pub fn mul_scalar<A: IntoMatrixOperand + ?Sized>(a: &A, s: f64) -> Matrix {
    let mut out = a.to_operand();
    out.as_mut_slice().iter_mut().for_each(|v| *v *= s);
    out
}

/// Divide every entry by a scalar.
///
/// A zero divisor is not checked and yields non-finite entries.
pub fn div_scalar<A: IntoMatrixOperand + ?Sized>(a: &A, s: f64) -> Matrix {
    let mut out = a.to_operand();
    out.as_mut_slice().iter_mut().for_each(|v| *v /= s);
    out
}

/// The Frobenius norm, the square root of the sum of the squared entries.
pub fn frobenius_norm<A: IntoMatrixOperand + ?Sized>(a: &A) -> f64 {
    a.to_operand()
        .as_slice()
        .iter()
        .map(|v| v * v)
        .sum::<f64>()
        .sqrt()
}

/// Divide the matrix by its Frobenius norm.
///
/// A zero matrix yields non-finite entries.
pub fn normalized<A: IntoMatrixOperand + ?Sized>(a: &A) -> Matrix {
    let a = a.to_operand();
    let norm = frobenius_norm(&a);
    div_scalar(&a, norm)
}

/// The `n x n` identity matrix.
pub fn identity(n: usize) -> Matrix {
    Matrix::identity(n)
}

/// Swap rows and columns.
pub fn transpose<A: IntoMatrixOperand + ?Sized>(a: &A) -> Matrix {
    let a = a.to_operand();
    Matrix::from_fn(a.cols(), a.rows(), |i, j| a[(j, i)])
}

fn as_flat_vector<A: IntoMatrixOperand + ?Sized>(a: &A) -> Result<Vec<f64>, LinalgError> {
    Ok(a.to_operand().to_column_vector()?.unroll())
}

/// The dot product of two vectors of equal length.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if the lengths differ, or
/// [`LinalgError::NotAVector`] if an operand is not a vector.
///
/// Example:
///
/// ```
/// use kinematica_linalg::ops::dot_product;
///
/// assert_eq!(dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap(), 32.0);
/// ```
pub fn dot_product<A, B>(a: &A, b: &B) -> Result<f64, LinalgError>
where
    A: IntoMatrixOperand + ?Sized,
    B: IntoMatrixOperand + ?Sized,
{
    let a = as_flat_vector(a)?;
    let b = as_flat_vector(b)?;
    if a.len() != b.len() {
        return Err(LinalgError::DimensionMismatch {
            op: "dot_product",
            lhs: (a.len(), 1),
            rhs: (b.len(), 1),
        });
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// The cross product of two 3-vectors, as a `3 x 1` column vector.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if an operand does not have three entries.
pub fn cross_product<A, B>(a: &A, b: &B) -> Result<Matrix, LinalgError>
where
    A: IntoMatrixOperand + ?Sized,
    B: IntoMatrixOperand + ?Sized,
{
    let a = as_flat_vector(a)?;
    let b = as_flat_vector(b)?;
    match (<[f64; 3]>::try_from(a.as_slice()), <[f64; 3]>::try_from(b.as_slice())) {
        (Ok(a), Ok(b)) => Ok(Matrix::column(&cross3(&a, &b))),
        _ => Err(LinalgError::DimensionMismatch {
            op: "cross_product",
            lhs: (a.len(), 1),
            rhs: (b.len(), 1),
        }),
    }
}

/// Dot product of two 3-vectors.
#[inline]
pub fn dot3(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Cross product of two 3-vectors.
#[inline]
pub fn cross3(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Euclidean norm of a 3-vector.
#[inline]
pub fn norm3(a: &[f64; 3]) -> f64 {
    dot3(a, a).sqrt()
}

fn check_3x3(op: &'static str, a: &Matrix) -> Result<(), LinalgError> {
    if a.shape() != (3, 3) {
        return Err(LinalgError::DimensionMismatch {
            op,
            lhs: a.shape(),
            rhs: (3, 3),
        });
    }
    Ok(())
}

/// The determinant of a 3x3 matrix.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if the matrix is not 3x3.
pub fn determinant_3x3(a: &Matrix) -> Result<f64, LinalgError> {
    check_3x3("determinant_3x3", a)?;
    Ok(a[(0, 0)] * (a[(1, 1)] * a[(2, 2)] - a[(1, 2)] * a[(2, 1)])
        - a[(0, 1)] * (a[(1, 0)] * a[(2, 2)] - a[(1, 2)] * a[(2, 0)])
        + a[(0, 2)] * (a[(1, 0)] * a[(2, 1)] - a[(1, 1)] * a[(2, 0)]))
}

/// Invert a 3x3 matrix with the closed form adjugate.
///
/// # Returns
///
/// `Ok(None)` when the determinant is exactly zero. There is no tolerance, a nearly
/// singular matrix is inverted.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if the matrix is not 3x3.
///
/// Example:
///
/// ```
/// use kinematica_linalg::{ops::matrix_inverse_3x3, Matrix};
///
/// let singular = Matrix::from_array(&[[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]]);
/// assert_eq!(matrix_inverse_3x3(&singular).unwrap(), None);
/// ```
pub fn matrix_inverse_3x3(a: &Matrix) -> Result<Option<Matrix>, LinalgError> {
    let det = determinant_3x3(a)?;
    if det == 0.0 {
        return Ok(None);
    }

    // cofactor(i, j) uses the 2x2 minor obtained by removing row i and column j
    let m = |i: usize, j: usize| a[(i, j)];
    let cofactors = [
        [
            m(1, 1) * m(2, 2) - m(1, 2) * m(2, 1),
            -(m(1, 0) * m(2, 2) - m(1, 2) * m(2, 0)),
            m(1, 0) * m(2, 1) - m(1, 1) * m(2, 0),
        ],
        [
            -(m(0, 1) * m(2, 2) - m(0, 2) * m(2, 1)),
            m(0, 0) * m(2, 2) - m(0, 2) * m(2, 0),
            -(m(0, 0) * m(2, 1) - m(0, 1) * m(2, 0)),
        ],
        [
            m(0, 1) * m(1, 2) - m(0, 2) * m(1, 1),
            -(m(0, 0) * m(1, 2) - m(0, 2) * m(1, 0)),
            m(0, 0) * m(1, 1) - m(0, 1) * m(1, 0),
        ],
    ];

    // inverse = adjugate / det, the adjugate being the transposed cofactor matrix
    Ok(Some(Matrix::from_fn(3, 3, |i, j| cofactors[j][i] / det)))
}
