use serde::{Deserialize, Serialize};

/// A rigid body of the kinematic tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// The link name.
    pub name: String,
    /// Index of the link in the robot.
    pub index: usize,
    /// The joint attaching this link to its parent, `None` for the root.
    pub parent_joint: Option<usize>,
    /// The joints attaching children to this link, in table order.
    pub child_joints: Vec<usize>,
    /// The parent link, `None` for the root.
    pub parent_link: Option<usize>,
    /// The child links, in the same order as `child_joints`.
    pub child_links: Vec<usize>,
    /// File name of the visual mesh, if the link has one.
    pub mesh: Option<String>,
}

impl Link {
    /// Create a link without any relations.
    pub fn new(name: impl Into<String>, index: usize, mesh: Option<String>) -> Self {
        Self {
            name: name.into(),
            index,
            parent_joint: None,
            child_joints: vec![],
            parent_link: None,
            child_links: vec![],
            // an empty file name means no geometry
            mesh: mesh.filter(|m| !m.is_empty()),
        }
    }

    /// Whether this is the root of the tree.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent_link.is_none()
    }

    /// Whether the link has visual geometry.
    #[inline]
    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }
}
