use super::tables::{layer, JointSpec, LinkSpec, MotionSpec, RobotTables};

const X: [f64; 3] = [1.0, 0.0, 0.0];
const Y: [f64; 3] = [0.0, 1.0, 0.0];

/// Legs in table order: name, x sign of the hip, whether it is a right leg.
const LEGS: [(&str, f64, bool); 4] = [
    ("FR", 1.0, true),
    ("FL", 1.0, false),
    ("RR", -1.0, true),
    ("RL", -1.0, false),
];

const HIP_OFFSET: [f64; 2] = [0.1881, 0.04675];
const THIGH_OFFSET: f64 = 0.08;
const SEGMENT_LENGTH: f64 = 0.213;

/// Name of the link the rest of the body hangs from.
pub(crate) const TRUNK: &str = "trunk";

pub(crate) fn tables() -> RobotTables {
    let mut links = vec![
        LinkSpec::new("base", None),
        LinkSpec::new(TRUNK, Some("trunk.dae")),
    ];
    let mut joints = vec![JointSpec::new(
        "floating_base",
        "base",
        TRUNK,
        [0.0; 3],
        [0.0; 3],
        MotionSpec::Floating,
    )];
    let mut layers = vec![layer(&["base"]), layer(&[TRUNK]), vec![], vec![], vec![], vec![]];

    for (leg, x_sign, right) in LEGS {
        let y_sign = if right { -1.0 } else { 1.0 };
        let [hip, thigh, calf, foot] = ["hip", "thigh", "calf", "foot"].map(|p| format!("{leg}_{p}"));

        links.extend([
            LinkSpec::new(&hip, Some("hip.dae")),
            LinkSpec::new(
                &thigh,
                Some(if right { "thigh_mirror.dae" } else { "thigh.dae" }),
            ),
            LinkSpec::new(&calf, Some("calf.dae")),
            LinkSpec::new(&foot, None),
        ]);

        joints.extend([
            JointSpec::new(
                format!("{hip}_joint"),
                TRUNK,
                &hip,
                [x_sign * HIP_OFFSET[0], y_sign * HIP_OFFSET[1], 0.0],
                [0.0; 3],
                MotionSpec::revolute(X, -0.863, 0.863),
            ),
            JointSpec::new(
                format!("{thigh}_joint"),
                &hip,
                &thigh,
                [0.0, y_sign * THIGH_OFFSET, 0.0],
                [0.0; 3],
                MotionSpec::revolute(Y, -0.686, 4.501),
            ),
            JointSpec::new(
                format!("{calf}_joint"),
                &thigh,
                &calf,
                [0.0, 0.0, -SEGMENT_LENGTH],
                [0.0; 3],
                MotionSpec::revolute(Y, -2.818, -0.888),
            ),
            JointSpec::new(
                format!("{foot}_fixed"),
                &calf,
                &foot,
                [0.0, 0.0, -SEGMENT_LENGTH],
                [0.0; 3],
                MotionSpec::Fixed,
            ),
        ]);

        for (depth, name) in [hip, thigh, calf, foot].into_iter().enumerate() {
            layers[depth + 2].push(name);
        }
    }

    RobotTables {
        links,
        joints,
        layers,
    }
}
