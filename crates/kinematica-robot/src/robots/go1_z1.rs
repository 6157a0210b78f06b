use super::{
    go1,
    tables::{JointSpec, MotionSpec, RobotTables},
    z1,
};

/// Where the arm base sits on the trunk.
const ARM_MOUNT_XYZ: [f64; 3] = [0.1, 0.0, 0.06];

pub(crate) fn tables() -> RobotTables {
    let mut tables = go1::tables();
    let mount = JointSpec::new(
        "arm_mount",
        go1::TRUNK,
        z1::BASE,
        ARM_MOUNT_XYZ,
        [0.0; 3],
        MotionSpec::Fixed,
    );
    // the trunk sits in layer 1
    tables.attach(z1::tables(), mount, 2);
    tables
}
