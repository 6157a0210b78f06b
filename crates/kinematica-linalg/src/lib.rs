#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kinematica Linear Algebra
//!
//! A small row-major matrix type and the operations needed to build rotation and rigid
//! body transforms on top of it.
//!
//! Vectors come in two explicit forms: flat slices (`&[f64]`, `[f64; N]`, `Vec<f64>`) and
//! column/row matrices. Operations that accept "either" take an [`IntoMatrixOperand`]
//! and lift flat slices into `N x 1` column matrices before doing any arithmetic.
//!
//! ## Example
//!
//! ```rust
//! use kinematica_linalg::{ops, Matrix};
//!
//! let a = Matrix::identity(3);
//! let b = Matrix::column(&[1.0, 2.0, 3.0]);
//! let c = ops::mul_matrix_matrix(&a, &b).unwrap();
//! assert_eq!(c, b);
//! ```

/// Error types for the linear algebra module.
pub mod error;

/// The row-major matrix type and its conversions.
pub mod matrix;

/// Matrix and vector operations.
pub mod ops;

/// Point to line projections.
pub mod projection;

pub use crate::error::LinalgError;
pub use crate::matrix::{IntoMatrixOperand, Matrix};
