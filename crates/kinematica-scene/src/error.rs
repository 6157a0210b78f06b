use std::path::PathBuf;

use kinematica_lie::LieError;
use kinematica_robot::RobotError;

/// An error type for the scene module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Error coming from the robot description.
    #[error(transparent)]
    Robot(#[from] RobotError),

    /// Error coming from the transform builders.
    #[error(transparent)]
    Lie(#[from] LieError),

    /// The rendering backend rejected an operation.
    #[error("Backend error: {0}")]
    Backend(String),

    /// A mesh could not be loaded.
    #[error("Failed to load mesh {}: {reason}", path.display())]
    MeshLoad {
        /// The mesh path.
        path: PathBuf,
        /// Why the backend failed.
        reason: String,
    },

    /// Poses were updated for a robot whose meshes are not loaded.
    #[error("Robot {0} is not spawned")]
    NotSpawned(String),
}
