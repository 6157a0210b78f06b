#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kinematica Scene
//!
//! The boundary to a rendering engine. The engine implements [`SceneBackend`]; this crate
//! turns rotation representations and robot joint states into the engine's position and
//! quaternion updates, and loads each robot's meshes once.

/// The rendering backend trait.
pub mod backend;

/// Scene and frame drawing settings.
pub mod config;

/// Error types for the scene module.
pub mod error;

/// Forward kinematics over the link hierarchy.
pub mod frames;

/// Pose setters.
pub mod pose;

/// One-time mesh loading.
pub mod spawn;

pub use crate::backend::{MeshHandle, SceneBackend};
pub use crate::config::{Color, FrameDrawConfig, SceneConfig};
pub use crate::error::SceneError;
pub use crate::frames::{compute_link_frames, update_robot_pose};
pub use crate::pose::{set_object_pose, update_transformed_vertices};
pub use crate::spawn::{RobotSpawner, SpawnState, SpawnedRobot};
