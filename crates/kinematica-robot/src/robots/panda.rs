use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use super::tables::{layer, JointSpec, LinkSpec, MotionSpec, RobotTables};

const Z: [f64; 3] = [0.0, 0.0, 1.0];

fn arm_joint(i: usize, xyz: [f64; 3], roll: f64, lower: f64, upper: f64) -> JointSpec {
    JointSpec::new(
        format!("panda_joint{i}"),
        format!("panda_link{}", i - 1),
        format!("panda_link{i}"),
        xyz,
        [roll, 0.0, 0.0],
        MotionSpec::revolute(Z, lower, upper),
    )
}

pub(crate) fn tables() -> RobotTables {
    let mut links: Vec<LinkSpec> = (0..8)
        .map(|i| LinkSpec::new(format!("panda_link{i}"), Some(format!("link{i}.dae").as_str())))
        .collect();
    links.extend([
        LinkSpec::new("panda_link8", None),
        LinkSpec::new("panda_hand", Some("hand.dae")),
        LinkSpec::new("panda_leftfinger", Some("finger.dae")),
        LinkSpec::new("panda_rightfinger", Some("finger.dae")),
    ]);

    let joints = vec![
        arm_joint(1, [0.0, 0.0, 0.333], 0.0, -2.8973, 2.8973),
        arm_joint(2, [0.0; 3], -FRAC_PI_2, -1.7628, 1.7628),
        arm_joint(3, [0.0, -0.316, 0.0], FRAC_PI_2, -2.8973, 2.8973),
        arm_joint(4, [0.0825, 0.0, 0.0], FRAC_PI_2, -3.0718, -0.0698),
        arm_joint(5, [-0.0825, 0.384, 0.0], -FRAC_PI_2, -2.8973, 2.8973),
        arm_joint(6, [0.0; 3], FRAC_PI_2, -0.0175, 3.7525),
        arm_joint(7, [0.088, 0.0, 0.0], FRAC_PI_2, -2.8973, 2.8973),
        JointSpec::new(
            "panda_joint8",
            "panda_link7",
            "panda_link8",
            [0.0, 0.0, 0.107],
            [0.0; 3],
            MotionSpec::Fixed,
        ),
        JointSpec::new(
            "panda_hand_joint",
            "panda_link8",
            "panda_hand",
            [0.0; 3],
            [0.0, 0.0, -FRAC_PI_4],
            MotionSpec::Fixed,
        ),
        JointSpec::new(
            "panda_finger_joint1",
            "panda_hand",
            "panda_leftfinger",
            [0.0, 0.0, 0.0584],
            [0.0; 3],
            MotionSpec::prismatic([0.0, 1.0, 0.0], 0.0, 0.04),
        ),
        // mirrors finger_joint1, kept rigid here
        JointSpec::new(
            "panda_finger_joint2",
            "panda_hand",
            "panda_rightfinger",
            [0.0, 0.0, 0.0584],
            [0.0, 0.0, PI],
            MotionSpec::Fixed,
        ),
    ];

    let mut layers: Vec<Vec<String>> = (0..9)
        .map(|i| layer(&[format!("panda_link{i}").as_str()]))
        .collect();
    layers.push(layer(&["panda_hand"]));
    layers.push(layer(&["panda_leftfinger", "panda_rightfinger"]));

    RobotTables {
        links,
        joints,
        layers,
    }
}
