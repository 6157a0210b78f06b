use kinematica_linalg::Matrix;
use serde::{Deserialize, Serialize};

use crate::{
    error::{check_shape, LieError},
    quaternion::{so3_to_wxyz_quaternion, ScalarVectorQuaternion, WxyzQuaternion},
    se2::{embed_se2_in_se3, se2_from_so2_and_position},
    se3::{se3_rotation, se3_translation},
    so2::u1_to_so2,
};

/// A position and orientation, the form a scene object is posed with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// The position in world coordinates.
    pub position: [f64; 3],
    /// The orientation as a unit quaternion.
    pub orientation: WxyzQuaternion,
}

impl Pose {
    /// The pose at the origin with no rotation.
    pub const IDENTITY: Self = Self {
        position: [0.0; 3],
        orientation: WxyzQuaternion::IDENTITY,
    };
}

/// The rotation representations an object can be posed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PoseRepr {
    /// A 4x4 homogeneous transform.
    Se3(Matrix),
    /// A 3x3 rotation matrix and a position.
    So3Position {
        /// The rotation matrix.
        rotation: Matrix,
        /// The position.
        position: [f64; 3],
    },
    /// A wxyz quaternion and a position.
    WxyzPosition {
        /// The orientation.
        quaternion: WxyzQuaternion,
        /// The position.
        position: [f64; 3],
    },
    /// A scalar-vector quaternion and a position.
    ScalarVectorPosition {
        /// The orientation.
        quaternion: ScalarVectorQuaternion,
        /// The position.
        position: [f64; 3],
    },
    /// A 3x3 planar homogeneous transform.
    Se2(Matrix),
    /// A 2x2 rotation matrix and a planar position.
    So2Position {
        /// The rotation matrix.
        rotation: Matrix,
        /// The position in the plane.
        position: [f64; 2],
    },
    /// A unit complex number `re + i * im` and a planar position.
    U1Position {
        /// The real part.
        re: f64,
        /// The imaginary part.
        im: f64,
        /// The position in the plane.
        position: [f64; 2],
    },
}

impl PoseRepr {
    /// Convert to a position and a unit quaternion.
    ///
    /// # Arguments
    ///
    /// * `z_offset` - Height given to planar representations when they are lifted to 3D.
    ///
    /// # Errors
    ///
    /// Returns [`LieError::InvalidShape`] if a matrix has the wrong shape for its variant.
    pub fn to_pose(&self, z_offset: f64) -> Result<Pose, LieError> {
        match self {
            PoseRepr::Se3(t) => Ok(Pose {
                position: se3_translation(t)?,
                orientation: so3_to_wxyz_quaternion(&se3_rotation(t)?)?,
            }),
            PoseRepr::So3Position { rotation, position } => Ok(Pose {
                position: *position,
                orientation: so3_to_wxyz_quaternion(rotation)?,
            }),
            PoseRepr::WxyzPosition {
                quaternion,
                position,
            } => Ok(Pose {
                position: *position,
                orientation: *quaternion,
            }),
            PoseRepr::ScalarVectorPosition {
                quaternion,
                position,
            } => Ok(Pose {
                position: *position,
                orientation: (*quaternion).into(),
            }),
            PoseRepr::Se2(t) => {
                check_shape(t, (3, 3))?;
                PoseRepr::Se3(embed_se2_in_se3(t, z_offset)?).to_pose(z_offset)
            }
            PoseRepr::So2Position { rotation, position } => {
                PoseRepr::Se2(se2_from_so2_and_position(rotation, position)?).to_pose(z_offset)
            }
            PoseRepr::U1Position { re, im, position } => PoseRepr::So2Position {
                rotation: u1_to_so2(*re, *im),
                position: *position,
            }
            .to_pose(z_offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        quaternion::wxyz_quaternion_to_so3,
        se2::se2_matrix,
        se3::get_xyz_rpy_se3_matrix,
        so3::{get_rpy_so3_matrix, get_rpy_wxyz_quaternion, get_z_rotation_so3_matrix},
    };

    fn assert_same_rotation(a: &WxyzQuaternion, r: &Matrix) {
        assert!(wxyz_quaternion_to_so3(a).max_abs_diff(r) < 1e-9);
    }

    #[test]
    fn test_se3_and_so3_position() -> Result<(), LieError> {
        let rpy = [0.4, -0.3, 2.2];
        let pose = PoseRepr::Se3(get_xyz_rpy_se3_matrix([1.0, 2.0, 3.0], rpy)).to_pose(0.0)?;
        assert_eq!(pose.position, [1.0, 2.0, 3.0]);
        assert_same_rotation(&pose.orientation, &get_rpy_so3_matrix(rpy));

        let pose = PoseRepr::So3Position {
            rotation: get_rpy_so3_matrix(rpy),
            position: [0.0, 0.0, 1.0],
        }
        .to_pose(0.0)?;
        assert_eq!(pose.position, [0.0, 0.0, 1.0]);
        assert_same_rotation(&pose.orientation, &get_rpy_so3_matrix(rpy));
        Ok(())
    }

    #[test]
    fn test_quaternion_layouts() -> Result<(), LieError> {
        let q = get_rpy_wxyz_quaternion([0.1, 0.2, 0.3]);
        let a = PoseRepr::WxyzPosition {
            quaternion: q,
            position: [1.0, 0.0, 0.0],
        }
        .to_pose(0.0)?;
        let b = PoseRepr::ScalarVectorPosition {
            quaternion: q.into(),
            position: [1.0, 0.0, 0.0],
        }
        .to_pose(0.0)?;
        assert_eq!(a, b);
        assert_eq!(a.orientation, q);
        Ok(())
    }

    #[test]
    fn test_planar_representations_use_offset() -> Result<(), LieError> {
        let theta = 0.9_f64;
        let offset = 0.01;
        let expected_rotation = get_z_rotation_so3_matrix(theta);

        let poses = [
            PoseRepr::Se2(se2_matrix(1.0, 2.0, theta)),
            PoseRepr::So2Position {
                rotation: crate::so2::so2_matrix(theta),
                position: [1.0, 2.0],
            },
            PoseRepr::U1Position {
                re: 2.0 * theta.cos(),
                im: 2.0 * theta.sin(),
                position: [1.0, 2.0],
            },
        ];

        for repr in poses.iter() {
            let pose = repr.to_pose(offset)?;
            assert_eq!(pose.position[2], offset);
            assert!((pose.position[0] - 1.0).abs() < 1e-12);
            assert!((pose.position[1] - 2.0).abs() < 1e-12);
            assert_same_rotation(&pose.orientation, &expected_rotation);
        }
        Ok(())
    }

    #[test]
    fn test_wrong_shape() {
        assert!(PoseRepr::Se3(Matrix::identity(3)).to_pose(0.0).is_err());
        assert!(PoseRepr::Se2(Matrix::identity(4)).to_pose(0.0).is_err());
    }
}
