#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kinematica Robots
//!
//! A robot is an immutable tree of links connected by joints, together with a layering of
//! the links such that every parent sits in an earlier layer than its children.
//!
//! ```rust
//! use kinematica_robot::RobotKind;
//!
//! let panda = RobotKind::PandaArm.build().unwrap();
//! assert_eq!(panda.num_dofs(), 8);
//!
//! // parents always come before their children
//! for joint in panda.joints() {
//!     assert!(panda.hierarchy_order(joint.child_link) > panda.hierarchy_order(joint.parent_link));
//! }
//! ```

/// Error types for the robot module.
pub mod error;

/// Joint variants and their static transforms.
pub mod joint;

/// Rigid bodies of the kinematic tree.
pub mod link;

/// Whole robot topologies.
pub mod robot;

/// Reference tables of the supported robots.
pub mod robots;

pub use crate::error::RobotError;
pub use crate::joint::{Joint, JointType, JointVariant};
pub use crate::link::Link;
pub use crate::robot::Robot;
pub use crate::robots::RobotKind;
