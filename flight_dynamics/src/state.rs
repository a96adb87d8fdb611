use nalgebra::Vector3;
use rotations::EulerAngles;
use serde::{Deserialize, Serialize};

/// Full 6-DOF state of the rigid body, world frame.
///
/// `attitude_rate` is the Euler-angle rate θ̇, not the body angular velocity;
/// the two are related through the kinematic maps on [`EulerAngles`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub attitude: EulerAngles,
    pub attitude_rate: Vector3<f64>,
}

impl BodyState {
    /// At-rest state at the given position.
    pub fn at_position(position: Vector3<f64>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
            && self.velocity.iter().all(|v| v.is_finite())
            && self.attitude.phi.is_finite()
            && self.attitude.theta.is_finite()
            && self.attitude.psi.is_finite()
            && self.attitude_rate.iter().all(|v| v.is_finite())
    }
}
