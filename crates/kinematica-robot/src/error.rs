use kinematica_lie::LieError;
use kinematica_linalg::LinalgError;

/// An error type for the robot module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RobotError {
    /// Error coming from the matrix algebra.
    #[error(transparent)]
    Linalg(#[from] LinalgError),

    /// Error coming from the rotation builders.
    #[error(transparent)]
    Lie(#[from] LieError),

    /// A robot name that is not one of the supported robots.
    #[error("Unknown robot: {0}")]
    UnknownRobot(String),

    /// The joint, link and hierarchy tables do not describe a valid tree.
    #[error("Invalid robot topology: {0}")]
    InvalidTopology(String),

    /// A joint state with the wrong number of values.
    #[error("Invalid joint state. Expected {expected} values, got {actual}")]
    InvalidJointState {
        /// The number of degrees of freedom.
        expected: usize,
        /// The number of values given.
        actual: usize,
    },
}
