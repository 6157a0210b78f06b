use kinematica_lie::{
    se3::{get_xyz_rpy_se3_matrix, se3_from_so3_and_position, se3_translation_matrix},
    so3::{axis_angle_so3_matrix, get_rpy_so3_matrix, get_rpy_wxyz_quaternion},
    WxyzQuaternion,
};
use kinematica_linalg::{ops, Matrix};
use serde::{Deserialize, Serialize};

use crate::error::RobotError;

/// The type tag of a joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JointType {
    /// 0 DOF rigid attachment.
    Fixed,
    /// 1 DOF rotation about an axis.
    Revolute,
    /// 1 DOF translation along an axis.
    Prismatic,
    /// 6 DOF free motion, 3 translations and 3 rotations.
    Floating,
}

impl std::fmt::Display for JointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            JointType::Fixed => "fixed",
            JointType::Revolute => "revolute",
            JointType::Prismatic => "prismatic",
            JointType::Floating => "floating",
        };
        write!(f, "{label}")
    }
}

/// The motion a joint allows, with the data specific to each kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JointVariant {
    /// Rigid attachment.
    Fixed,
    /// Rotation about `axis`, bounded by `[lower, upper]` radians.
    Revolute {
        /// Index of the joint value in the robot state.
        dof_index: usize,
        /// Rotation axis in the joint frame.
        axis: [f64; 3],
        /// Lower bound in radians.
        lower: f64,
        /// Upper bound in radians.
        upper: f64,
    },
    /// Translation along `axis`, bounded by `[lower, upper]` meters.
    Prismatic {
        /// Index of the joint value in the robot state.
        dof_index: usize,
        /// Translation axis in the joint frame.
        axis: [f64; 3],
        /// Lower bound in meters.
        lower: f64,
        /// Upper bound in meters.
        upper: f64,
    },
    /// Free motion: three translations followed by three rotations.
    Floating {
        /// Indices of the six values in the robot state.
        dof_indices: [usize; 6],
        /// The translation axes followed by the rotation axes, which are applied in
        /// order so the last one is outermost.
        axes: [[f64; 3]; 6],
    },
}

impl JointVariant {
    /// The axes of a floating joint.
    pub const FLOATING_AXES: [[f64; 3]; 6] = [
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ];

    /// A floating joint whose values start at `first_dof`.
    pub fn floating(first_dof: usize) -> Self {
        JointVariant::Floating {
            dof_indices: std::array::from_fn(|i| first_dof + i),
            axes: Self::FLOATING_AXES,
        }
    }

    /// The type tag.
    pub fn joint_type(&self) -> JointType {
        match self {
            JointVariant::Fixed => JointType::Fixed,
            JointVariant::Revolute { .. } => JointType::Revolute,
            JointVariant::Prismatic { .. } => JointType::Prismatic,
            JointVariant::Floating { .. } => JointType::Floating,
        }
    }

    /// The number of degrees of freedom.
    pub fn num_dofs(&self) -> usize {
        match self {
            JointVariant::Fixed => 0,
            JointVariant::Revolute { .. } | JointVariant::Prismatic { .. } => 1,
            JointVariant::Floating { .. } => 6,
        }
    }

    /// The indices of the joint values in the robot state.
    pub fn dof_indices(&self) -> Vec<usize> {
        match self {
            JointVariant::Fixed => vec![],
            JointVariant::Revolute { dof_index, .. } | JointVariant::Prismatic { dof_index, .. } => {
                vec![*dof_index]
            }
            JointVariant::Floating { dof_indices, .. } => dof_indices.to_vec(),
        }
    }

    /// The `[lower, upper]` bounds of a single valued joint.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self {
            JointVariant::Revolute { lower, upper, .. }
            | JointVariant::Prismatic { lower, upper, .. } => Some((*lower, *upper)),
            JointVariant::Fixed | JointVariant::Floating { .. } => None,
        }
    }
}

/// A joint of the kinematic tree.
///
/// The offset from the parent link frame to the joint frame is fixed, and its rotation
/// matrix, quaternion and homogeneous transform are computed once in [`Joint::new`].
/// Deserializing a joint goes through [`Joint::new`] as well, so the cached transforms
/// always match `xyz` and `rpy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "JointRecord", into = "JointRecord")]
pub struct Joint {
    /// The joint name.
    pub name: String,
    /// Index of the joint in the robot.
    pub index: usize,
    /// Index of the parent link.
    pub parent_link: usize,
    /// Index of the child link.
    pub child_link: usize,
    xyz: [f64; 3],
    rpy: [f64; 3],
    variant: JointVariant,
    static_rotation: Matrix,
    static_quaternion: WxyzQuaternion,
    static_se3: Matrix,
}

/// The serialized form of a [`Joint`], without the cached transforms.
#[derive(Serialize, Deserialize)]
struct JointRecord {
    name: String,
    index: usize,
    parent_link: usize,
    child_link: usize,
    xyz: [f64; 3],
    rpy: [f64; 3],
    variant: JointVariant,
}

impl From<JointRecord> for Joint {
    fn from(record: JointRecord) -> Self {
        Joint::new(
            record.name,
            record.index,
            record.parent_link,
            record.child_link,
            record.xyz,
            record.rpy,
            record.variant,
        )
    }
}

impl From<Joint> for JointRecord {
    fn from(joint: Joint) -> Self {
        JointRecord {
            name: joint.name,
            index: joint.index,
            parent_link: joint.parent_link,
            child_link: joint.child_link,
            xyz: joint.xyz,
            rpy: joint.rpy,
            variant: joint.variant,
        }
    }
}

impl Joint {
    /// Create a joint and cache its static offset transforms.
    pub fn new(
        name: impl Into<String>,
        index: usize,
        parent_link: usize,
        child_link: usize,
        xyz: [f64; 3],
        rpy: [f64; 3],
        variant: JointVariant,
    ) -> Self {
        Self {
            name: name.into(),
            index,
            parent_link,
            child_link,
            xyz,
            rpy,
            variant,
            static_rotation: get_rpy_so3_matrix(rpy),
            static_quaternion: get_rpy_wxyz_quaternion(rpy),
            static_se3: get_xyz_rpy_se3_matrix(xyz, rpy),
        }
    }

    /// Translation from the parent link frame.
    #[inline]
    pub fn xyz(&self) -> [f64; 3] {
        self.xyz
    }

    /// Roll, pitch, yaw from the parent link frame.
    #[inline]
    pub fn rpy(&self) -> [f64; 3] {
        self.rpy
    }

    /// The kind of motion.
    #[inline]
    pub fn variant(&self) -> &JointVariant {
        &self.variant
    }

    /// The type tag.
    #[inline]
    pub fn joint_type(&self) -> JointType {
        self.variant.joint_type()
    }

    /// The number of degrees of freedom.
    #[inline]
    pub fn num_dofs(&self) -> usize {
        self.variant.num_dofs()
    }

    /// The 3x3 rotation of the static offset.
    #[inline]
    pub fn static_rotation(&self) -> &Matrix {
        &self.static_rotation
    }

    /// The unit quaternion of the static offset.
    #[inline]
    pub fn static_quaternion(&self) -> &WxyzQuaternion {
        &self.static_quaternion
    }

    /// The 4x4 homogeneous transform of the static offset.
    #[inline]
    pub fn static_se3(&self) -> &Matrix {
        &self.static_se3
    }

    /// Clamp a value into the joint bounds. Unbounded joints return it unchanged.
    pub fn clamp(&self, value: f64) -> f64 {
        match self.variant.bounds() {
            Some((lower, upper)) => value.clamp(lower, upper),
            None => value,
        }
    }

    /// The 4x4 motion transform of the joint for the given values.
    ///
    /// Applied after the static offset: a revolute joint rotates about its axis, a
    /// prismatic joint translates along it. A floating joint translates by the first three
    /// values along its first three axes and then rotates by the last three values about
    /// its last three axes, in order. With [`JointVariant::FLOATING_AXES`] this is a
    /// translation followed by roll, pitch, yaw.
    ///
    /// # Errors
    ///
    /// Returns [`RobotError::InvalidJointState`] if `values.len()` differs from the number
    /// of degrees of freedom.
    pub fn motion_se3(&self, values: &[f64]) -> Result<Matrix, RobotError> {
        if values.len() != self.num_dofs() {
            return Err(RobotError::InvalidJointState {
                expected: self.num_dofs(),
                actual: values.len(),
            });
        }

        let t = match &self.variant {
            JointVariant::Fixed => Matrix::identity(4),
            JointVariant::Revolute { axis, .. } => {
                let rotation = axis_angle_so3_matrix(axis, values[0])?;
                se3_from_so3_and_position(&rotation, &[0.0; 3])?
            }
            JointVariant::Prismatic { axis, .. } => {
                se3_translation_matrix(axis.map(|a| a * values[0]))
            }
            JointVariant::Floating { axes, .. } => {
                let position: [f64; 3] =
                    std::array::from_fn(|i| (0..3).map(|k| axes[k][i] * values[k]).sum());
                // the fourth axis rotates first, the sixth last
                let mut rotation = Matrix::identity(3);
                for (axis, &angle) in axes[3..].iter().zip(&values[3..]) {
                    let r = axis_angle_so3_matrix(axis, angle)?;
                    rotation = ops::mul_matrix_matrix(&r, &rotation)?;
                }
                se3_from_so3_and_position(&rotation, &position)?
            }
        };
        Ok(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinematica_lie::so3::get_z_rotation_so3_matrix;
    use rand::Rng;
    use std::f64::consts::FRAC_PI_2;

    fn revolute_z(dof_index: usize) -> JointVariant {
        JointVariant::Revolute {
            dof_index,
            axis: [0.0, 0.0, 1.0],
            lower: -1.0,
            upper: 1.0,
        }
    }

    #[test]
    fn test_type_and_dofs_follow_variant() {
        let cases = [
            (JointVariant::Fixed, JointType::Fixed, 0),
            (revolute_z(0), JointType::Revolute, 1),
            (
                JointVariant::Prismatic {
                    dof_index: 0,
                    axis: [0.0, 1.0, 0.0],
                    lower: 0.0,
                    upper: 0.04,
                },
                JointType::Prismatic,
                1,
            ),
            (JointVariant::floating(0), JointType::Floating, 6),
        ];
        for (variant, joint_type, dofs) in cases {
            assert_eq!(variant.joint_type(), joint_type);
            assert_eq!(variant.num_dofs(), dofs);
            assert_eq!(variant.dof_indices().len(), dofs);
        }
    }

    #[test]
    fn test_floating_dof_indices() {
        let v = JointVariant::floating(3);
        assert_eq!(v.dof_indices(), vec![3, 4, 5, 6, 7, 8]);
        assert_eq!(v.bounds(), None);
    }

    #[test]
    fn test_static_transforms_are_cached() {
        let j = Joint::new("j", 0, 0, 1, [0.1, 0.2, 0.3], [0.0, 0.0, FRAC_PI_2], revolute_z(0));
        assert!(j.static_rotation().max_abs_diff(&get_z_rotation_so3_matrix(FRAC_PI_2)) < 1e-12);
        assert_eq!(j.static_se3()[(0, 3)], 0.1);
        assert_eq!(j.static_se3()[(2, 3)], 0.3);
        assert!(
            kinematica_lie::quaternion::wxyz_quaternion_to_so3(j.static_quaternion())
                .max_abs_diff(j.static_rotation())
                < 1e-12
        );
    }

    #[test]
    fn test_floating_motion_follows_axes() -> Result<(), RobotError> {
        let mut rng = rand::rng();
        let f = Joint::new("f", 0, 0, 1, [0.0; 3], [0.0; 3], JointVariant::floating(0));
        for _ in 0..10 {
            let v: [f64; 6] = std::array::from_fn(|_| rng.random_range(-1.5..1.5));
            let t = f.motion_se3(&v)?;
            let expected = get_xyz_rpy_se3_matrix([v[0], v[1], v[2]], [v[3], v[4], v[5]]);
            assert!(t.max_abs_diff(&expected) < 1e-12);
        }

        // swap x and y, and rotate about z only through the first rotation value
        let swapped = JointVariant::Floating {
            dof_indices: [0, 1, 2, 3, 4, 5],
            axes: [
                [0.0, 1.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
                [0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0],
                [1.0, 0.0, 0.0],
            ],
        };
        let g = Joint::new("g", 0, 0, 1, [0.0; 3], [0.0; 3], swapped);
        let t = g.motion_se3(&[1.0, 2.0, 3.0, FRAC_PI_2, 0.0, 0.0])?;
        assert_eq!([t[(0, 3)], t[(1, 3)], t[(2, 3)]], [2.0, 1.0, 3.0]);
        let rotation = t.block(0, 0, 3, 3)?;
        assert!(rotation.max_abs_diff(&get_z_rotation_so3_matrix(FRAC_PI_2)) < 1e-12);
        Ok(())
    }

    #[test]
    fn test_deserialize_recomputes_static_offset() -> Result<(), serde_json::Error> {
        let j = Joint::new("j", 0, 0, 1, [0.1, 0.2, 0.3], [0.0; 3], revolute_z(0));
        let mut value = serde_json::to_value(&j)?;
        assert!(value.get("static_se3").is_none());
        value["xyz"] = serde_json::json!([1.0, 2.0, 3.0]);
        value["rpy"] = serde_json::json!([0.0, 0.0, FRAC_PI_2]);

        let k: Joint = serde_json::from_value(value)?;
        assert_eq!(k.xyz(), [1.0, 2.0, 3.0]);
        assert_eq!(k.static_se3()[(0, 3)], 1.0);
        assert_eq!(k.static_se3()[(2, 3)], 3.0);
        assert!(k.static_rotation().max_abs_diff(&get_z_rotation_so3_matrix(FRAC_PI_2)) < 1e-12);
        assert_eq!(k.variant(), j.variant());
        Ok(())
    }

    #[test]
    fn test_clamp() {
        let j = Joint::new("j", 0, 0, 1, [0.0; 3], [0.0; 3], revolute_z(0));
        assert_eq!(j.clamp(2.0), 1.0);
        assert_eq!(j.clamp(-0.5), -0.5);
        let f = Joint::new("f", 0, 0, 1, [0.0; 3], [0.0; 3], JointVariant::Fixed);
        assert_eq!(f.clamp(5.0), 5.0);
    }

    #[test]
    fn test_motion_se3() -> Result<(), RobotError> {
        let j = Joint::new("j", 0, 0, 1, [0.0; 3], [0.0; 3], revolute_z(0));
        let t = j.motion_se3(&[FRAC_PI_2])?;
        assert!((t[(1, 0)] - 1.0).abs() < 1e-12);

        let p = Joint::new(
            "p",
            0,
            0,
            1,
            [0.0; 3],
            [0.0; 3],
            JointVariant::Prismatic {
                dof_index: 0,
                axis: [0.0, 1.0, 0.0],
                lower: 0.0,
                upper: 0.04,
            },
        );
        let t = p.motion_se3(&[0.02])?;
        assert_eq!(t[(1, 3)], 0.02);

        let f = Joint::new("f", 0, 0, 1, [0.0; 3], [0.0; 3], JointVariant::floating(0));
        let t = f.motion_se3(&[1.0, 2.0, 3.0, 0.0, 0.0, 0.0])?;
        assert_eq!(t[(2, 3)], 3.0);

        assert_eq!(
            j.motion_se3(&[]),
            Err(RobotError::InvalidJointState {
                expected: 1,
                actual: 0
            })
        );
        Ok(())
    }
}
