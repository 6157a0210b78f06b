use approx::assert_relative_eq;
use kinematica::{
    lie::{
        se3::{se3_rotation, se3_transform_point},
        so3::get_rpy_so3_matrix,
    },
    robot::{RobotError, RobotKind},
    scene::{compute_link_frames, SceneError},
};

#[test]
fn test_z1_arm_reach_in_go1_frame() -> Result<(), SceneError> {
    let robot = RobotKind::Go1Z1.build()?;
    let frames = compute_link_frames(&robot, &robot.zero_state())?;

    // at rest the arm links stack along the trunk x and z axes
    let index = |name: &str| {
        robot
            .link_by_name(name)
            .map(|l| l.index)
            .ok_or_else(|| RobotError::InvalidTopology(format!("missing {name}")))
    };
    let base = se3_transform_point(&frames[index("link00")?], &[0.0; 3])?;
    assert_relative_eq!(base[0], 0.1, epsilon = 1e-12);
    assert_relative_eq!(base[2], 0.06, epsilon = 1e-12);

    let link02 = se3_transform_point(&frames[index("link02")?], &[0.0; 3])?;
    assert_relative_eq!(link02[2], 0.06 + 0.0585 + 0.045, epsilon = 1e-12);

    let link03 = se3_transform_point(&frames[index("link03")?], &[0.0; 3])?;
    assert_relative_eq!(link03[0], 0.1 - 0.35, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_revolute_joint_rotates_child_frame() -> Result<(), SceneError> {
    let robot = RobotKind::PandaArm.build()?;
    let mut state = robot.zero_state();
    state[0] = 0.7;
    let frames = compute_link_frames(&robot, &state)?;
    let link1 = robot.link_by_name("panda_link1").map(|l| l.index).unwrap_or_default();
    let rotation = se3_rotation(&frames[link1])?;
    assert!(rotation.max_abs_diff(&get_rpy_so3_matrix([0.0, 0.0, 0.7])) < 1e-12);
    Ok(())
}
