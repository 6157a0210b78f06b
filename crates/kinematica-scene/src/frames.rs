use kinematica_lie::{
    quaternion::so3_to_wxyz_quaternion,
    se3::{se3_compose, se3_rotation, se3_transform_point, se3_translation},
    Pose,
};
use kinematica_linalg::Matrix;
use kinematica_robot::Robot;

use crate::{
    backend::SceneBackend,
    config::{Color, FrameDrawConfig},
    error::SceneError,
    pose::apply_pose,
    spawn::SpawnedRobot,
};

/// The world frame of every link for a joint state.
///
/// Links are visited in hierarchy order, so each parent frame is known before its children
/// use it. A child frame is the parent frame times the joint static offset times the joint
/// motion. The root link sits at the identity.
///
/// # Arguments
///
/// * `robot` - The robot.
/// * `state` - One value per degree of freedom.
///
/// # Returns
///
/// A 4x4 transform per link, indexed by link.
///
/// # Errors
///
/// Returns an error if the state length differs from the number of degrees of freedom.
pub fn compute_link_frames(robot: &Robot, state: &[f64]) -> Result<Vec<Matrix>, SceneError> {
    robot.check_state(state)?;

    let mut frames = vec![Matrix::identity(4); robot.num_links()];
    for link in robot.links_in_hierarchy_order() {
        let Some(j) = robot.links()[link].parent_joint else {
            continue;
        };
        let joint = &robot.joints()[j];
        let local = robot.joint_se3(joint, state)?;
        frames[link] = se3_compose(&frames[joint.parent_link], &local)?;
    }
    Ok(frames)
}

/// Pose every loaded mesh of a robot for a joint state and draw the link frames.
///
/// # Errors
///
/// Returns [`SceneError::NotSpawned`] if `spawned` belongs to another robot, or any error
/// of the frame computation and the backend.
pub fn update_robot_pose<B: SceneBackend>(
    backend: &B,
    spawned: &SpawnedRobot,
    robot: &Robot,
    state: &[f64],
    draw: &FrameDrawConfig,
) -> Result<Vec<Matrix>, SceneError> {
    if spawned.robot_name() != robot.name() || spawned.num_links() != robot.num_links() {
        return Err(SceneError::NotSpawned(robot.name().to_string()));
    }

    let frames = compute_link_frames(robot, state)?;
    for link in robot.links_in_hierarchy_order() {
        let frame = &frames[link];
        let handles = spawned.handles(link);
        if !handles.is_empty() {
            let pose = Pose {
                position: se3_translation(frame)?,
                orientation: so3_to_wxyz_quaternion(&se3_rotation(frame)?)?,
            };
            for &handle in handles {
                apply_pose(backend, handle, &pose)?;
            }
        }
        draw_link_frame(backend, frame, draw)?;
    }
    Ok(frames)
}

fn draw_link_frame<B: SceneBackend>(
    backend: &B,
    frame: &Matrix,
    draw: &FrameDrawConfig,
) -> Result<(), SceneError> {
    let origin = se3_translation(frame)?;
    if draw.draw_axes {
        let axes = [
            ([draw.axis_length, 0.0, 0.0], Color::RED),
            ([0.0, draw.axis_length, 0.0], Color::GREEN),
            ([0.0, 0.0, draw.axis_length], Color::BLUE),
        ];
        for (tip, color) in axes {
            let end = se3_transform_point(frame, &tip)?;
            backend.draw_debug_vector(origin, end, draw.axis_width, color)?;
        }
    }
    if draw.draw_link_spheres {
        backend.draw_debug_sphere(origin, draw.sphere_radius, draw.sphere_color)?;
    }
    Ok(())
}
