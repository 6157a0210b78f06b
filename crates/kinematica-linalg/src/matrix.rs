use serde::{Deserialize, Serialize};

use crate::error::LinalgError;

/// A dense matrix of `f64` stored in row-major order.
///
/// Vectors are represented as `N x 1` (column) or `1 x N` (row) matrices. Use
/// [`Matrix::column`] and [`Matrix::unroll`] to move between the flat and the matrix form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a matrix from row-major data.
    ///
    /// # Arguments
    ///
    /// * `rows` - The number of rows.
    /// * `cols` - The number of columns.
    /// * `data` - The entries, row after row.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::InvalidShape`] if `data.len() != rows * cols`.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, LinalgError> {
        if data.len() != rows * cols {
            return Err(LinalgError::InvalidShape(rows, cols, data.len()));
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::InvalidShape`] if the rows have different lengths.
    ///
    /// Example:
    ///
    /// ```
    /// use kinematica_linalg::Matrix;
    ///
    /// let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m.shape(), (2, 2));
    /// assert_eq!(m[(1, 0)], 3.0);
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, LinalgError> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(num_rows * num_cols);
        for row in rows {
            data.extend_from_slice(row.as_ref());
        }
        Self::from_row_major(num_rows, num_cols, data)
    }

    /// Create a matrix by evaluating `f(row, col)` for every entry.
    pub fn from_fn(rows: usize, cols: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Create a fixed size matrix from nested arrays.
    pub fn from_array<const R: usize, const C: usize>(array: &[[f64; C]; R]) -> Self {
        Self::from_fn(R, C, |i, j| array[i][j])
    }

    /// Create an `N x 1` column vector from a flat sequence.
    pub fn column(values: &[f64]) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
        }
    }

    /// Create a `1 x N` row vector from a flat sequence.
    pub fn row(values: &[f64]) -> Self {
        Self {
            rows: 1,
            cols: values.len(),
            data: values.to_vec(),
        }
    }

    /// Create a matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// The number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The shape as `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The entries in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// The mutable entries in row-major order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Get the entry at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Whether the matrix is a row or a column vector.
    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }

    /// Flatten the matrix into a row-major sequence.
    pub fn unroll(&self) -> Vec<f64> {
        self.data.clone()
    }

    /// Reshape a row or column vector into an `N x 1` column vector.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::NotAVector`] if the matrix has more than one row and column.
    pub fn to_column_vector(&self) -> Result<Self, LinalgError> {
        if !self.is_vector() {
            return Err(LinalgError::NotAVector(self.rows, self.cols));
        }
        Ok(Self::column(&self.data))
    }

    /// Reshape a row or column vector into a `1 x N` row vector.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::NotAVector`] if the matrix has more than one row and column.
    pub fn to_row_vector(&self) -> Result<Self, LinalgError> {
        if !self.is_vector() {
            return Err(LinalgError::NotAVector(self.rows, self.cols));
        }
        Ok(Self::row(&self.data))
    }

    /// Copy the matrix into a nested fixed size array.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::InvalidShape`] if the shape is not `R x C`.
    pub fn to_array<const R: usize, const C: usize>(&self) -> Result<[[f64; C]; R], LinalgError> {
        if self.shape() != (R, C) {
            return Err(LinalgError::InvalidShape(R, C, self.data.len()));
        }
        let mut out = [[0.0; C]; R];
        for (i, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.data[i * C..(i + 1) * C]);
        }
        Ok(out)
    }

    /// Copy a block of the matrix starting at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::InvalidShape`] if the block does not fit in the matrix.
    pub fn block(
        &self,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> Result<Self, LinalgError> {
        if row + rows > self.rows || col + cols > self.cols {
            return Err(LinalgError::InvalidShape(rows, cols, self.data.len()));
        }
        Ok(Self::from_fn(rows, cols, |i, j| self[(row + i, col + j)]))
    }

    /// The largest absolute entrywise difference between two matrices of the same shape.
    ///
    /// Returns `f64::INFINITY` when the shapes differ.
    pub fn max_abs_diff(&self, other: &Matrix) -> f64 {
        if self.shape() != other.shape() {
            return f64::INFINITY;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

impl std::ops::Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        &self.data[row * self.cols + col]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        &mut self.data[row * self.cols + col]
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.rows {
            let row = &self.data[i * self.cols..(i + 1) * self.cols];
            let cells = row
                .iter()
                .map(|v| format!("{v:>10.4}"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "[{cells}]")?;
        }
        Ok(())
    }
}

/// Anything that can take part in a matrix operation.
///
/// Matrices are used as they are. Flat sequences become `N x 1` column vectors.
pub trait IntoMatrixOperand {
    /// Lift the operand into matrix form.
    fn to_operand(&self) -> Matrix;
}

impl IntoMatrixOperand for Matrix {
    fn to_operand(&self) -> Matrix {
        self.clone()
    }
}

impl IntoMatrixOperand for [f64] {
    fn to_operand(&self) -> Matrix {
        Matrix::column(self)
    }
}

impl<const N: usize> IntoMatrixOperand for [f64; N] {
    fn to_operand(&self) -> Matrix {
        Matrix::column(self)
    }
}

impl IntoMatrixOperand for Vec<f64> {
    fn to_operand(&self) -> Matrix {
        Matrix::column(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row_major_invalid_shape() {
        let res = Matrix::from_row_major(2, 2, vec![1.0, 2.0, 3.0]);
        assert_eq!(res, Err(LinalgError::InvalidShape(2, 2, 3)));
    }

    #[test]
    fn test_from_rows_ragged() {
        let res = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(res.is_err());
    }

    #[test]
    fn test_column_and_row() {
        let c = Matrix::column(&[1.0, 2.0, 3.0]);
        assert_eq!(c.shape(), (3, 1));
        let r = c.to_row_vector().unwrap();
        assert_eq!(r.shape(), (1, 3));
        assert_eq!(r.to_column_vector().unwrap(), c);
        assert_eq!(r.unroll(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_to_column_vector_rejects_matrix() {
        let m = Matrix::identity(2);
        assert_eq!(m.to_column_vector(), Err(LinalgError::NotAVector(2, 2)));
    }

    #[test]
    fn test_flat_operand_is_column() {
        let v = [4.0, 5.0];
        assert_eq!(v.to_operand().shape(), (2, 1));
        assert_eq!(vec![1.0].to_operand().shape(), (1, 1));
        assert_eq!(v[..].to_operand(), Matrix::column(&[4.0, 5.0]));
    }

    #[test]
    fn test_to_array_and_block() -> Result<(), LinalgError> {
        let m = Matrix::from_array(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(m.to_array::<2, 3>()?, [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert!(m.to_array::<3, 2>().is_err());
        let b = m.block(0, 1, 2, 2)?;
        assert_eq!(b.to_array::<2, 2>()?, [[2.0, 3.0], [5.0, 6.0]]);
        assert!(m.block(1, 1, 2, 2).is_err());
        Ok(())
    }

    #[test]
    fn test_get_and_index() {
        let mut m = Matrix::zeros(2, 3);
        m[(1, 2)] = 7.0;
        assert_eq!(m.get(1, 2), Some(7.0));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.as_slice()[5], 7.0);
    }

    #[test]
    fn test_max_abs_diff() {
        let a = Matrix::identity(2);
        let mut b = Matrix::identity(2);
        b[(0, 1)] = -0.5;
        assert_eq!(a.max_abs_diff(&b), 0.5);
        assert!(a.max_abs_diff(&Matrix::identity(3)).is_infinite());
    }
}
