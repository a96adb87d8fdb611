pub mod model;
pub mod motor_inputs;
pub mod state;

use rotations::EulerKinematicsError;
use thiserror::Error;

pub use model::RigidBodyModel;
pub use motor_inputs::MotorInputs;
pub use state::BodyState;

/// Errors from a single integration step. A step that returns an error has
/// not mutated any state; the caller may retry with corrected input.
#[derive(Debug, Clone, Copy, Error)]
pub enum DynamicsError {
    #[error("time step must be finite and positive, got {0}")]
    InvalidTimestep(f64),
    #[error("motor input {index} must be non-negative, got {value}")]
    NegativeMotorInput { index: usize, value: f64 },
    #[error("motor input {index} is not finite")]
    NonFiniteMotorInput { index: usize },
    #[error(transparent)]
    Kinematics(#[from] EulerKinematicsError),
}
