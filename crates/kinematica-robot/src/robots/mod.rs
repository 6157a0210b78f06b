use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{error::RobotError, robot::Robot};

mod go1;
mod go1_z1;
mod panda;
/// Tables robots are built from.
pub mod tables;
mod z1;

/// The robots shipped with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RobotKind {
    /// Franka Emika Panda, a 7 DOF arm with a parallel gripper.
    PandaArm,
    /// Unitree Go1, a quadruped on a floating base.
    Go1Quadruped,
    /// Unitree Go1 carrying a Unitree Z1 arm on its trunk.
    Go1Z1,
}

impl RobotKind {
    /// Every supported robot.
    pub const ALL: [RobotKind; 3] = [RobotKind::PandaArm, RobotKind::Go1Quadruped, RobotKind::Go1Z1];

    /// The short name, also the mesh directory of the robot.
    pub fn name(&self) -> &'static str {
        match self {
            RobotKind::PandaArm => "panda",
            RobotKind::Go1Quadruped => "go1",
            RobotKind::Go1Z1 => "go1_z1",
        }
    }

    /// The reference tables of the robot.
    pub fn tables(&self) -> tables::RobotTables {
        match self {
            RobotKind::PandaArm => panda::tables(),
            RobotKind::Go1Quadruped => go1::tables(),
            RobotKind::Go1Z1 => go1_z1::tables(),
        }
    }

    /// Build the robot.
    ///
    /// # Errors
    ///
    /// Returns [`RobotError::InvalidTopology`] if the reference tables are inconsistent.
    pub fn build(&self) -> Result<Robot, RobotError> {
        Robot::from_tables(self.name(), self.name(), &self.tables())
    }
}

impl std::fmt::Display for RobotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RobotKind {
    type Err = RobotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "panda" | "pandaarm" => Ok(RobotKind::PandaArm),
            "go1" | "go1quadruped" => Ok(RobotKind::Go1Quadruped),
            "go1z1" => Ok(RobotKind::Go1Z1),
            _ => Err(RobotError::UnknownRobot(s.to_string())),
        }
    }
}
