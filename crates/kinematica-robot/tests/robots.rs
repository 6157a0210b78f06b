use approx::assert_relative_eq;
use kinematica_lie::se3::se3_translation;
use kinematica_robot::{JointType, Robot, RobotError, RobotKind};
use rand::Rng;

#[test]
fn test_robot_sizes() -> Result<(), RobotError> {
    let cases = [
        (RobotKind::PandaArm, 12, 11, 8, 11),
        (RobotKind::Go1Quadruped, 18, 17, 18, 6),
        (RobotKind::Go1Z1, 27, 26, 25, 11),
    ];
    for (kind, links, joints, dofs, layers) in cases {
        let robot = kind.build()?;
        assert_eq!(robot.num_links(), links, "{kind}");
        assert_eq!(robot.num_joints(), joints, "{kind}");
        assert_eq!(robot.num_dofs(), dofs, "{kind}");
        assert_eq!(robot.hierarchy().len(), layers, "{kind}");
        assert_eq!(robot.zero_state().len(), dofs);
    }
    Ok(())
}

#[test]
fn test_dofs_sum_over_joints() -> Result<(), RobotError> {
    for kind in RobotKind::ALL {
        let robot = kind.build()?;
        let mut seen = vec![false; robot.num_dofs()];
        for joint in robot.joints() {
            for i in joint.variant().dof_indices() {
                assert!(!seen[i], "dof {i} of {kind} used twice");
                seen[i] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }
    Ok(())
}

#[test]
fn test_parents_before_children() -> Result<(), RobotError> {
    for kind in RobotKind::ALL {
        let robot = kind.build()?;
        robot.validate()?;
        for joint in robot.joints() {
            assert!(
                robot.hierarchy_order(joint.child_link) > robot.hierarchy_order(joint.parent_link),
                "{} in {kind}",
                joint.name
            );
        }
        let order = robot.links_in_hierarchy_order();
        assert_eq!(order.len(), robot.num_links());
        for (rank, &link) in order.iter().enumerate() {
            assert_eq!(robot.hierarchy_order(link), rank);
        }
    }
    Ok(())
}

#[test]
fn test_link_relations_match_joints() -> Result<(), RobotError> {
    for kind in RobotKind::ALL {
        let robot = kind.build()?;
        for link in robot.links() {
            assert_eq!(link.child_joints.len(), link.child_links.len());
            for (&j, &l) in link.child_joints.iter().zip(&link.child_links) {
                let joint = &robot.joints()[j];
                assert_eq!(joint.parent_link, link.index);
                assert_eq!(joint.child_link, l);
            }
        }
    }
    Ok(())
}

#[test]
fn test_go1_floating_base() -> Result<(), RobotError> {
    let go1 = RobotKind::Go1Quadruped.build()?;
    let root = go1.root_link().expect("go1 has a root");
    assert_eq!(root.name, "base");
    assert!(!root.has_mesh());

    let base = go1.joint_by_name("floating_base").expect("floating base");
    assert_eq!(base.joint_type(), JointType::Floating);
    assert_eq!(base.variant().dof_indices(), vec![0, 1, 2, 3, 4, 5]);

    let fr = go1.link_by_name("FR_thigh").expect("FR thigh");
    let fl = go1.link_by_name("FL_thigh").expect("FL thigh");
    assert_eq!(fr.mesh.as_deref(), Some("thigh_mirror.dae"));
    assert_eq!(fl.mesh.as_deref(), Some("thigh.dae"));
    assert_eq!(
        go1.mesh_path(go1.link_by_name("trunk").expect("trunk").index).as_deref(),
        Some("go1/trunk.dae")
    );
    Ok(())
}

#[test]
fn test_go1_z1_mount() -> Result<(), RobotError> {
    let robot = RobotKind::Go1Z1.build()?;
    let trunk = robot.link_by_name("trunk").expect("trunk");
    let arm_base = robot.link_by_name("link00").expect("arm base");
    assert_eq!(arm_base.parent_link, Some(trunk.index));
    assert!(robot.hierarchy()[2].contains(&arm_base.index));
    assert_eq!(robot.mesh_directory(), "go1_z1");
    Ok(())
}

#[test]
fn test_panda_fingers() -> Result<(), RobotError> {
    let panda = RobotKind::PandaArm.build()?;
    let finger = panda.joint_by_name("panda_finger_joint1").expect("finger joint");
    assert_eq!(finger.joint_type(), JointType::Prismatic);
    assert_eq!(finger.variant().dof_indices(), vec![7]);
    assert_eq!(finger.clamp(0.1), 0.04);

    let mut state = panda.zero_state();
    state[7] = 0.03;
    let t = panda.joint_se3(finger, &state)?;
    let xyz = se3_translation(&t)?;
    assert_relative_eq!(xyz[1], 0.03, epsilon = 1e-12);
    assert_relative_eq!(xyz[2], 0.0584, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_random_states_give_rigid_transforms() -> Result<(), RobotError> {
    let mut rng = rand::rng();
    for kind in RobotKind::ALL {
        let robot = kind.build()?;
        let state: Vec<f64> = (0..robot.num_dofs())
            .map(|_| rng.random_range(-1.0..1.0))
            .collect();
        for joint in robot.joints() {
            let t = robot.joint_se3(joint, &state)?;
            assert_eq!(t.shape(), (4, 4));
            assert_eq!(t[(3, 3)], 1.0);
            let r = kinematica_lie::se3::se3_rotation(&t)?;
            assert!(kinematica_lie::so3::is_so3(&r, 1e-9), "{}", joint.name);
        }
    }
    Ok(())
}

#[test]
fn test_wrong_state_length() -> Result<(), RobotError> {
    let robot = RobotKind::PandaArm.build()?;
    assert_eq!(
        robot.check_state(&[0.0; 3]),
        Err(RobotError::InvalidJointState {
            expected: 8,
            actual: 3
        })
    );
    Ok(())
}

#[test]
fn test_json_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let robot = RobotKind::Go1Z1.build()?;
    let json = serde_json::to_string(&robot)?;
    let back: Robot = serde_json::from_str(&json)?;
    back.validate()?;
    assert_eq!(back.num_dofs(), robot.num_dofs());
    assert_eq!(back.hierarchy(), robot.hierarchy());
    for (a, b) in back.joints().iter().zip(robot.joints()) {
        assert_eq!(a.name, b.name);
        assert!(a.static_se3().max_abs_diff(b.static_se3()) < 1e-12);
    }
    Ok(())
}

#[test]
fn test_json_edits_are_checked() -> Result<(), Box<dyn std::error::Error>> {
    let robot = RobotKind::PandaArm.build()?;
    let value = serde_json::to_value(&robot)?;
    assert!(value.get("hierarchy_order").is_none());

    // moving a joint rebuilds its static transform
    let mut moved = value.clone();
    moved["joints"][0]["xyz"] = serde_json::json!([0.5, 0.0, 0.0]);
    let back: Robot = serde_json::from_value(moved)?;
    let [x, _, z] = se3_translation(back.joints()[0].static_se3())?;
    assert_eq!(back.joints()[0].xyz(), [0.5, 0.0, 0.0]);
    assert_relative_eq!(x, 0.5, epsilon = 1e-12);
    assert_relative_eq!(z, 0.0, epsilon = 1e-12);
    for link in 0..back.num_links() {
        assert_eq!(back.hierarchy_order(link), robot.hierarchy_order(link));
    }

    let mut short = value.clone();
    short["hierarchy"]
        .as_array_mut()
        .ok_or("hierarchy is not an array")?
        .pop();
    assert!(serde_json::from_value::<Robot>(short).is_err());

    let mut out_of_range = value.clone();
    out_of_range["hierarchy"][1] = serde_json::json!([99]);
    assert!(serde_json::from_value::<Robot>(out_of_range).is_err());

    let mut empty = value.clone();
    empty["hierarchy"] = serde_json::json!([]);
    assert!(serde_json::from_value::<Robot>(empty).is_err());

    let mut orphan = value.clone();
    orphan["links"][1]["parent_link"] = serde_json::Value::Null;
    assert!(serde_json::from_value::<Robot>(orphan).is_err());

    let mut bad_dof = value;
    bad_dof["joints"][0]["variant"]["Revolute"]["dof_index"] = serde_json::json!(42);
    assert!(serde_json::from_value::<Robot>(bad_dof).is_err());
    Ok(())
}
