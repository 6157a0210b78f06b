use std::f64::consts::FRAC_PI_2;

use super::tables::{layer, JointSpec, LinkSpec, MotionSpec, RobotTables};

const X: [f64; 3] = [1.0, 0.0, 0.0];
const Y: [f64; 3] = [0.0, 1.0, 0.0];
const Z: [f64; 3] = [0.0, 0.0, 1.0];

/// The arm base link.
pub(crate) const BASE: &str = "link00";

/// Revolute arm joints: offset from the previous link, axis, lower and upper bound.
const ARM: [([f64; 3], [f64; 3], f64, f64); 6] = [
    ([0.0, 0.0, 0.0585], Z, -2.6179938779914944, 2.6179938779914944),
    ([0.0, 0.0, 0.045], Y, 0.0, 2.9670597283903604),
    ([-0.35, 0.0, 0.0], Y, -2.8797932657906435, 0.0),
    ([0.218, 0.0, 0.057], Y, -1.5184364492350666, 1.5184364492350666),
    ([0.07, 0.0, 0.0], Z, -1.3439035240356338, 1.3439035240356338),
    ([0.0492, 0.0, 0.0], X, -2.792526803190927, 2.792526803190927),
];

/// Tables of the arm alone, rooted at [`BASE`].
pub(crate) fn tables() -> RobotTables {
    let mut links: Vec<LinkSpec> = (0..7)
        .map(|i| LinkSpec::new(format!("link0{i}"), Some(format!("z1_Link0{i}.dae").as_str())))
        .collect();
    links.extend([
        LinkSpec::new("gripperStator", Some("z1_GripperStator.dae")),
        LinkSpec::new("gripperMover", Some("z1_GripperMover.dae")),
    ]);

    let mut joints: Vec<JointSpec> = ARM
        .iter()
        .enumerate()
        .map(|(i, &(xyz, axis, lower, upper))| {
            JointSpec::new(
                format!("joint{}", i + 1),
                format!("link0{i}"),
                format!("link0{}", i + 1),
                xyz,
                [0.0; 3],
                MotionSpec::revolute(axis, lower, upper),
            )
        })
        .collect();
    joints.extend([
        JointSpec::new(
            "gripperStator",
            "link06",
            "gripperStator",
            [0.051, 0.0, 0.0],
            [0.0; 3],
            MotionSpec::Fixed,
        ),
        JointSpec::new(
            "jointGripper",
            "gripperStator",
            "gripperMover",
            [0.049, 0.0, 0.0],
            [0.0; 3],
            MotionSpec::revolute(Y, -FRAC_PI_2, 0.0),
        ),
    ]);

    let mut layers: Vec<Vec<String>> = (0..7).map(|i| layer(&[format!("link0{i}").as_str()])).collect();
    layers.push(layer(&["gripperStator"]));
    layers.push(layer(&["gripperMover"]));

    RobotTables {
        links,
        joints,
        layers,
    }
}
