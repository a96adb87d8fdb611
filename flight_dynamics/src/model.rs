use crate::{BodyState, DynamicsError, MotorInputs};
use airframe::AirframeParameters;
use nalgebra::Vector3;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rotations::{EulerAngles, RotationMatrix, RotationTrait};

/// Nonlinear 6-DOF rigid-body model of a quadrotor, integrating four motor
/// thrust commands into pose with semi-implicit Euler steps.
///
/// The world frame is Z-up: gravity acts along −z and the summed motor
/// thrust acts along the body z axis.
#[derive(Debug, Clone)]
pub struct RigidBodyModel {
    params: AirframeParameters,
    state: BodyState,
}

impl RigidBodyModel {
    /// Largest magnitude of the optional initial attitude-rate jitter,
    /// ±300°/s per axis.
    pub const RATE_JITTER_MAX_DEG: f64 = 300.0;

    /// Creates a model at rest at `position` with level attitude.
    pub fn new(params: AirframeParameters, position: Vector3<f64>) -> Self {
        Self {
            params,
            state: BodyState::at_position(position),
        }
    }

    /// Creates a model resuming from an explicit state.
    pub fn from_state(params: AirframeParameters, state: BodyState) -> Self {
        Self { params, state }
    }

    /// Randomizes the initial Euler-angle rate within ±300°/s per axis.
    ///
    /// The seed is explicit so runs are reproducible; the same seed always
    /// produces the same initial rate.
    pub fn with_attitude_rate_jitter(mut self, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let max = Self::RATE_JITTER_MAX_DEG.to_radians();
        self.state.attitude_rate = Vector3::new(
            rng.random_range(-max..=max),
            rng.random_range(-max..=max),
            rng.random_range(-max..=max),
        );
        self
    }

    pub fn state(&self) -> &BodyState {
        &self.state
    }

    pub fn params(&self) -> &AirframeParameters {
        &self.params
    }

    /// Advances the state by one time step and returns the new position.
    ///
    /// Integration order is semi-implicit Euler and must not be reordered:
    /// rates are advanced first and the advanced values are used for the
    /// angle and position updates within the same step.
    ///
    /// A rejected call (invalid input, or pitch at the kinematic
    /// singularity) leaves the state untouched; every fallible computation
    /// happens before the state is committed.
    pub fn step(&mut self, inputs: &MotorInputs, dt: f64) -> Result<Vector3<f64>, DynamicsError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(DynamicsError::InvalidTimestep(dt));
        }
        inputs.validate()?;

        let p = &self.params;
        let state = self.state;

        // Forces: gravity, rotated thrust, linear drag opposing velocity.
        let thrust_body = Vector3::new(0.0, 0.0, p.thrust_coefficient * inputs.total());
        let rotation = RotationMatrix::from(&state.attitude);
        let accel = Vector3::new(0.0, 0.0, -p.gravity) + rotation.rotate(thrust_body) / p.mass
            - p.linear_drag_coefficient * state.velocity;

        // Differential thrust gives roll/pitch torque; the alternating-sign
        // drag term gives reactive yaw.
        let [u0, u1, u2, u3] = inputs.0;
        let torque = Vector3::new(
            p.arm_length * p.thrust_coefficient * (u0 - u2),
            p.arm_length * p.thrust_coefficient * (u1 - u3),
            p.yaw_drag_coefficient * (u0 - u1 + u2 - u3),
        );

        // Euler's rigid-body equation with diagonal inertia.
        let inertia = Vector3::new(p.inertia[0], p.inertia[1], p.inertia[2]);
        let omega = state.attitude.body_rate_from_euler_rate(state.attitude_rate);
        let omega_dot =
            (torque - omega.cross(&omega.component_mul(&inertia))).component_div(&inertia);

        let omega = omega + dt * omega_dot;
        let attitude_rate = state.attitude.euler_rate_from_body_rate(omega)?;

        let mut next = state;
        next.attitude_rate = attitude_rate;
        next.attitude = EulerAngles::new(
            state.attitude.phi + dt * attitude_rate.x,
            state.attitude.theta + dt * attitude_rate.y,
            state.attitude.psi + dt * attitude_rate.z,
        );
        next.velocity = state.velocity + dt * accel;
        next.position = state.position + dt * next.velocity;
        self.state = next;

        Ok(next.position)
    }
}
