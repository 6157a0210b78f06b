use std::collections::HashMap;

use kinematica_lie::se3::se3_compose;
use kinematica_linalg::Matrix;
use serde::{Deserialize, Serialize};

use crate::{
    error::RobotError,
    joint::{Joint, JointVariant},
    link::Link,
    robots::tables::{MotionSpec, RobotTables},
};

/// An articulated robot: joints, links and the kinematic hierarchy.
///
/// Built once from reference tables and immutable afterwards. Joints and links refer to
/// each other by index. A deserialized robot is checked with [`Robot::validate`] and has
/// its hierarchy order recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RobotRecord", into = "RobotRecord")]
pub struct Robot {
    name: String,
    mesh_directory: String,
    joints: Vec<Joint>,
    links: Vec<Link>,
    hierarchy: Vec<Vec<usize>>,
    hierarchy_order: Vec<usize>,
}

/// The serialized form of a [`Robot`], without the derived hierarchy order.
#[derive(Serialize, Deserialize)]
struct RobotRecord {
    name: String,
    mesh_directory: String,
    joints: Vec<Joint>,
    links: Vec<Link>,
    hierarchy: Vec<Vec<usize>>,
}

impl TryFrom<RobotRecord> for Robot {
    type Error = RobotError;

    fn try_from(record: RobotRecord) -> Result<Self, Self::Error> {
        let hierarchy_order = compute_hierarchy_order(record.links.len(), &record.hierarchy)?;
        let robot = Self {
            name: record.name,
            mesh_directory: record.mesh_directory,
            joints: record.joints,
            links: record.links,
            hierarchy: record.hierarchy,
            hierarchy_order,
        };
        robot.validate()?;
        Ok(robot)
    }
}

impl From<Robot> for RobotRecord {
    fn from(robot: Robot) -> Self {
        RobotRecord {
            name: robot.name,
            mesh_directory: robot.mesh_directory,
            joints: robot.joints,
            links: robot.links,
            hierarchy: robot.hierarchy,
        }
    }
}

impl Robot {
    /// Build a robot from its tables.
    ///
    /// # Arguments
    ///
    /// * `name` - The robot name.
    /// * `mesh_directory` - Directory holding the link meshes.
    /// * `tables` - Links, joints and the hierarchy layers, all referring to links by name.
    ///
    /// # Errors
    ///
    /// Returns [`RobotError::InvalidTopology`] if the tables do not describe a tree whose
    /// layering puts every parent before its children.
    pub fn from_tables(
        name: impl Into<String>,
        mesh_directory: impl Into<String>,
        tables: &RobotTables,
    ) -> Result<Self, RobotError> {
        let name = name.into();

        let mut link_index = HashMap::new();
        let mut links = Vec::with_capacity(tables.links.len());
        for (i, row) in tables.links.iter().enumerate() {
            if link_index.insert(row.name.clone(), i).is_some() {
                return Err(RobotError::InvalidTopology(format!(
                    "duplicate link name {}",
                    row.name
                )));
            }
            links.push(Link::new(row.name.clone(), i, row.mesh.clone()));
        }

        let lookup = |link: &str| {
            link_index.get(link).copied().ok_or_else(|| {
                RobotError::InvalidTopology(format!("unknown link name {link}"))
            })
        };

        let mut joints = Vec::with_capacity(tables.joints.len());
        let mut next_dof = 0;
        for (i, row) in tables.joints.iter().enumerate() {
            let parent = lookup(&row.parent)?;
            let child = lookup(&row.child)?;

            let variant = match row.motion {
                MotionSpec::Fixed => JointVariant::Fixed,
                MotionSpec::Revolute { axis, lower, upper } => JointVariant::Revolute {
                    dof_index: next_dof,
                    axis,
                    lower,
                    upper,
                },
                MotionSpec::Prismatic { axis, lower, upper } => JointVariant::Prismatic {
                    dof_index: next_dof,
                    axis,
                    lower,
                    upper,
                },
                MotionSpec::Floating => JointVariant::floating(next_dof),
            };
            next_dof += variant.num_dofs();

            if links[child].parent_joint.is_some() {
                return Err(RobotError::InvalidTopology(format!(
                    "link {} has more than one parent joint",
                    row.child
                )));
            }
            links[child].parent_joint = Some(i);
            links[child].parent_link = Some(parent);
            links[parent].child_joints.push(i);
            links[parent].child_links.push(child);

            joints.push(Joint::new(
                row.name.clone(),
                i,
                parent,
                child,
                row.xyz,
                row.rpy,
                variant,
            ));
        }

        let hierarchy = tables
            .layers
            .iter()
            .map(|layer| layer.iter().map(|link| lookup(link)).collect())
            .collect::<Result<Vec<Vec<usize>>, RobotError>>()?;

        let hierarchy_order = compute_hierarchy_order(links.len(), &hierarchy)?;

        let robot = Self {
            name,
            mesh_directory: mesh_directory.into(),
            joints,
            links,
            hierarchy,
            hierarchy_order,
        };
        robot.validate()?;

        log::debug!(
            "built robot {}: {} links, {} joints, {} dofs",
            robot.name,
            robot.num_links(),
            robot.num_joints(),
            robot.num_dofs()
        );

        Ok(robot)
    }

    /// Check that the robot is a consistent tree.
    ///
    /// Verifies the link relations against the joint table, that there is a single root in
    /// the first layer, and that every joint's child comes after its parent both in the
    /// layering and in the hierarchy order. Joint and link indices must match their table
    /// positions, and the joint values must cover the state vector exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`RobotError::InvalidTopology`] describing the first violation found.
    pub fn validate(&self) -> Result<(), RobotError> {
        let invalid = |msg: String| Err(RobotError::InvalidTopology(msg));

        if let Some((_, link)) = self.links.iter().enumerate().find(|(i, l)| l.index != *i) {
            return invalid(format!("link {} is not at index {}", link.name, link.index));
        }
        if let Some((_, joint)) = self.joints.iter().enumerate().find(|(i, j)| j.index != *i) {
            return invalid(format!("joint {} is not at index {}", joint.name, joint.index));
        }

        let roots = self.links.iter().filter(|l| l.is_root()).count();
        if roots != 1 {
            return invalid(format!("expected a single root link, found {roots}"));
        }
        if self.joints.len() + 1 != self.links.len() {
            return invalid(format!(
                "{} joints cannot connect {} links",
                self.joints.len(),
                self.links.len()
            ));
        }
        let root_first = match self.hierarchy.first() {
            Some(first) => first.len() == 1 && self.links.get(first[0]).is_some_and(Link::is_root),
            None => false,
        };
        if !root_first {
            return invalid("the first layer must hold only the root link".to_string());
        }
        if self.hierarchy_order.len() != self.links.len() {
            return invalid("the hierarchy order does not cover every link".to_string());
        }

        let mut layer_of = vec![None; self.links.len()];
        for (depth, layer) in self.hierarchy.iter().enumerate() {
            for &link in layer {
                if link >= self.links.len() {
                    return invalid(format!("link index {link} out of range"));
                }
                if layer_of[link].is_some() {
                    return invalid(format!(
                        "link {} appears twice in the hierarchy",
                        self.links[link].name
                    ));
                }
                layer_of[link] = Some(depth);
            }
        }
        if let Some(missing) = layer_of.iter().position(Option::is_none) {
            return invalid(format!(
                "link {} is missing from the hierarchy",
                self.links[missing].name
            ));
        }

        for joint in &self.joints {
            let (parent, child) = (joint.parent_link, joint.child_link);
            if parent >= self.links.len() || child >= self.links.len() || parent == child {
                return invalid(format!("joint {} has invalid link indices", joint.name));
            }
            let child_link = &self.links[child];
            if child_link.parent_joint != Some(joint.index)
                || child_link.parent_link != Some(parent)
            {
                return invalid(format!(
                    "link {} does not record joint {} as its parent",
                    child_link.name, joint.name
                ));
            }
            if layer_of[child] <= layer_of[parent] {
                return invalid(format!(
                    "link {} is not in a later layer than its parent {}",
                    child_link.name, self.links[parent].name
                ));
            }
            if self.hierarchy_order[child] <= self.hierarchy_order[parent] {
                return invalid(format!(
                    "link {} is ranked before its parent {}",
                    child_link.name, self.links[parent].name
                ));
            }
        }

        for link in &self.links {
            let children_match = link.child_joints.len() == link.child_links.len()
                && link.child_joints.iter().zip(&link.child_links).all(|(&j, &c)| {
                    self.joints.get(j).is_some_and(|joint| {
                        joint.parent_link == link.index && joint.child_link == c
                    })
                });
            if !children_match {
                return invalid(format!(
                    "the children of link {} disagree with the joints",
                    link.name
                ));
            }
        }

        let mut dofs: Vec<usize> = self
            .joints
            .iter()
            .flat_map(|j| j.variant().dof_indices())
            .collect();
        dofs.sort_unstable();
        if dofs.iter().enumerate().any(|(i, &dof)| i != dof) {
            return invalid("the joint values do not cover the state exactly once".to_string());
        }

        Ok(())
    }

    /// The robot name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory holding the link meshes.
    #[inline]
    pub fn mesh_directory(&self) -> &str {
        &self.mesh_directory
    }

    /// All joints, in table order.
    #[inline]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// All links, in table order.
    #[inline]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// The hierarchy layers, each a list of link indices.
    #[inline]
    pub fn hierarchy(&self) -> &[Vec<usize>] {
        &self.hierarchy
    }

    /// The number of links.
    #[inline]
    pub fn num_links(&self) -> usize {
        self.links.len()
    }

    /// The number of joints.
    #[inline]
    pub fn num_joints(&self) -> usize {
        self.joints.len()
    }

    /// The total number of degrees of freedom over all joints.
    pub fn num_dofs(&self) -> usize {
        self.joints.iter().map(Joint::num_dofs).sum()
    }

    /// The global rank of a link in the hierarchy.
    ///
    /// # Panics
    ///
    /// Panics if `link` is out of range.
    #[inline]
    pub fn hierarchy_order(&self, link: usize) -> usize {
        self.hierarchy_order[link]
    }

    /// Link indices sorted by hierarchy rank, parents first.
    pub fn links_in_hierarchy_order(&self) -> Vec<usize> {
        self.hierarchy.iter().flatten().copied().collect()
    }

    /// The root link.
    pub fn root_link(&self) -> Option<&Link> {
        self.links.iter().find(|l| l.is_root())
    }

    /// Find a link by name.
    pub fn link_by_name(&self, name: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.name == name)
    }

    /// Find a joint by name.
    pub fn joint_by_name(&self, name: &str) -> Option<&Joint> {
        self.joints.iter().find(|j| j.name == name)
    }

    /// The mesh path of a link, `<mesh_directory>/<mesh file>`.
    pub fn mesh_path(&self, link: usize) -> Option<String> {
        let mesh = self.links.get(link)?.mesh.as_ref()?;
        Some(format!("{}/{}", self.mesh_directory, mesh))
    }

    /// A state vector with every value at zero.
    pub fn zero_state(&self) -> Vec<f64> {
        vec![0.0; self.num_dofs()]
    }

    /// Check the length of a state vector.
    ///
    /// # Errors
    ///
    /// Returns [`RobotError::InvalidJointState`] if `state.len() != num_dofs()`.
    pub fn check_state(&self, state: &[f64]) -> Result<(), RobotError> {
        if state.len() != self.num_dofs() {
            return Err(RobotError::InvalidJointState {
                expected: self.num_dofs(),
                actual: state.len(),
            });
        }
        Ok(())
    }

    /// The values of one joint, picked from a full state vector.
    ///
    /// # Errors
    ///
    /// Returns [`RobotError::InvalidJointState`] if the state has the wrong length.
    pub fn joint_values(&self, joint: &Joint, state: &[f64]) -> Result<Vec<f64>, RobotError> {
        self.check_state(state)?;
        Ok(joint.variant().dof_indices().iter().map(|&i| state[i]).collect())
    }

    /// The full transform of a joint for a state: static offset times motion.
    ///
    /// # Errors
    ///
    /// Returns [`RobotError::InvalidJointState`] if the state has the wrong length.
    pub fn joint_se3(&self, joint: &Joint, state: &[f64]) -> Result<Matrix, RobotError> {
        let motion = joint.motion_se3(&self.joint_values(joint, state)?)?;
        Ok(se3_compose(joint.static_se3(), &motion)?)
    }
}

/// Rank links by walking the layers in order, and each layer in its given order.
fn compute_hierarchy_order(
    num_links: usize,
    hierarchy: &[Vec<usize>],
) -> Result<Vec<usize>, RobotError> {
    let mut order = vec![usize::MAX; num_links];
    for (rank, &link) in hierarchy.iter().flatten().enumerate() {
        let slot = order.get_mut(link).ok_or_else(|| {
            RobotError::InvalidTopology(format!("link index {link} out of range"))
        })?;
        *slot = rank;
    }
    Ok(order)
}
