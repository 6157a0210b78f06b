#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kinematica Lie Groups
//!
//! Rotation and rigid body transform builders on top of [`kinematica_linalg::Matrix`].
//!
//! ## Supported representations
//!
//! - **SO(2)** / **U(1)**: 2D rotations as 2x2 matrices or unit complex numbers
//! - **SE(2)**: 2D rigid transforms as 3x3 homogeneous matrices
//! - **SO(3)**: 3D rotations as 3x3 matrices, Euler angles and quaternions
//! - **SE(3)**: 3D rigid transforms as 4x4 homogeneous matrices
//!
//! ## Example
//!
//! ```rust
//! use kinematica_lie::{quaternion, so3};
//!
//! let rpy = [0.1, -0.4, 1.2];
//! let rotation = so3::get_rpy_so3_matrix(rpy);
//! let q = so3::get_rpy_wxyz_quaternion(rpy);
//!
//! // both rotate a point the same way
//! let p = [1.0, 2.0, 3.0];
//! let by_quaternion = quaternion::sandwich_product(&q, &p);
//! let by_matrix = so3::rotate_point(&rotation, &p).unwrap();
//! for i in 0..3 {
//!     assert!((by_quaternion[i] - by_matrix[i]).abs() < 1e-9);
//! }
//! ```

/// Error types for the lie module.
pub mod error;

/// Pose representations and their conversion to position and orientation.
pub mod pose;

/// Quaternion algebra in the wxyz and scalar-vector layouts.
pub mod quaternion;

/// Special Euclidean group SE(2) and its SE(3) embedding.
pub mod se2;

/// Special Euclidean group SE(3) for 3D rigid transformations.
pub mod se3;

/// Special Orthogonal group SO(2) and unit complex numbers.
pub mod so2;

/// Special Orthogonal group SO(3) builders and Euler angles.
pub mod so3;

pub use crate::error::LieError;
pub use crate::pose::{Pose, PoseRepr};
pub use crate::quaternion::{ScalarVectorQuaternion, WxyzQuaternion};
pub use crate::so3::{Axis, EulerOrder};
