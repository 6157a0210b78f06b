//! Plain tables a [`crate::Robot`] is built from. Links are referred to by name.

use serde::{Deserialize, Serialize};

/// A link row: a name and an optional mesh file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSpec {
    /// The link name.
    pub name: String,
    /// The mesh file name, relative to the robot mesh directory.
    pub mesh: Option<String>,
}

impl LinkSpec {
    /// Create a link row.
    pub fn new(name: impl Into<String>, mesh: Option<&str>) -> Self {
        Self {
            name: name.into(),
            mesh: mesh.map(str::to_string),
        }
    }
}

/// The motion of a joint row. DOF indices are assigned when the robot is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionSpec {
    /// Rigid attachment.
    Fixed,
    /// Rotation about an axis.
    Revolute {
        /// The axis.
        axis: [f64; 3],
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },
    /// Translation along an axis.
    Prismatic {
        /// The axis.
        axis: [f64; 3],
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },
    /// Free 6 DOF motion.
    Floating,
}

impl MotionSpec {
    /// A revolute motion.
    pub fn revolute(axis: [f64; 3], lower: f64, upper: f64) -> Self {
        MotionSpec::Revolute { axis, lower, upper }
    }

    /// A prismatic motion.
    pub fn prismatic(axis: [f64; 3], lower: f64, upper: f64) -> Self {
        MotionSpec::Prismatic { axis, lower, upper }
    }
}

/// A joint row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointSpec {
    /// The joint name.
    pub name: String,
    /// The parent link name.
    pub parent: String,
    /// The child link name.
    pub child: String,
    /// Translation from the parent link frame.
    pub xyz: [f64; 3],
    /// Roll, pitch, yaw from the parent link frame.
    pub rpy: [f64; 3],
    /// The kind of motion.
    pub motion: MotionSpec,
}

impl JointSpec {
    /// Create a joint row.
    pub fn new(
        name: impl Into<String>,
        parent: impl Into<String>,
        child: impl Into<String>,
        xyz: [f64; 3],
        rpy: [f64; 3],
        motion: MotionSpec,
    ) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
            child: child.into(),
            xyz,
            rpy,
            motion,
        }
    }
}

/// Everything needed to build a robot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RobotTables {
    /// The links, in index order.
    pub links: Vec<LinkSpec>,
    /// The joints, in index order. DOF indices follow this order.
    pub joints: Vec<JointSpec>,
    /// The hierarchy layers, root first.
    pub layers: Vec<Vec<String>>,
}

impl RobotTables {
    /// Append another set of tables, attaching its root below `parent` with `mount`.
    ///
    /// The layers of `other` are merged into this robot's layers starting at `first_layer`,
    /// which must be deeper than the layer of `parent`.
    pub fn attach(&mut self, other: RobotTables, mount: JointSpec, first_layer: usize) {
        self.links.extend(other.links);
        self.joints.push(mount);
        self.joints.extend(other.joints);
        for (i, layer) in other.layers.into_iter().enumerate() {
            let depth = first_layer + i;
            if depth >= self.layers.len() {
                self.layers.resize_with(depth + 1, Vec::new);
            }
            self.layers[depth].extend(layer);
        }
    }
}

/// Build a vector of owned layer names.
pub(crate) fn layer(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
