use kinematica_lie::{se3::se3_transform_point, Pose, PoseRepr};
use kinematica_linalg::Matrix;

use crate::{
    backend::{MeshHandle, SceneBackend},
    config::SceneConfig,
    error::SceneError,
};

/// Pose an object with any supported rotation representation.
///
/// # Arguments
///
/// * `backend` - The rendering backend.
/// * `handle` - The object to pose.
/// * `repr` - The pose. Planar representations are lifted to `config.se2_z_offset`.
/// * `config` - The scene settings.
///
/// # Errors
///
/// Returns an error if a matrix has the wrong shape or the backend fails.
///
/// Example:
///
/// ```ignore
/// let repr = PoseRepr::Se2(se2_matrix(1.0, 2.0, 0.5));
/// set_object_pose(&backend, handle, &repr, &SceneConfig::default())?;
/// ```
pub fn set_object_pose<B: SceneBackend>(
    backend: &B,
    handle: MeshHandle,
    repr: &PoseRepr,
    config: &SceneConfig,
) -> Result<(), SceneError> {
    let pose = repr.to_pose(config.se2_z_offset)?;
    apply_pose(backend, handle, &pose)
}

/// Push a position and orientation to the backend.
pub(crate) fn apply_pose<B: SceneBackend>(
    backend: &B,
    handle: MeshHandle,
    pose: &Pose,
) -> Result<(), SceneError> {
    let [x, y, z] = pose.position;
    backend.set_object_position(handle, x, y, z)?;
    let [qw, qx, qy, qz] = pose.orientation.to_array();
    backend.set_object_rotation_from_quaternion(handle, qw, qx, qy, qz)
}

/// Move the vertices of an object to `transform * point`.
///
/// # Errors
///
/// Returns an error if `transform` is not 4x4 or the backend fails.
pub fn update_transformed_vertices<B: SceneBackend>(
    backend: &B,
    handle: MeshHandle,
    points: &[[f64; 3]],
    transform: &Matrix,
) -> Result<(), SceneError> {
    let moved = points
        .iter()
        .map(|p| se3_transform_point(transform, p))
        .collect::<Result<Vec<_>, _>>()?;
    backend.update_vertex_positions(handle, &moved)
}
