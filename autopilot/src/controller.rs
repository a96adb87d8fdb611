use crate::AutopilotError;
use nalgebra::Vector3;
use rotations::Quaternion;
use serde::{Deserialize, Serialize};

/// World up axis of the controller's frame. This is the Y-up graphics
/// convention; a Z-up consumer remaps at the adapter boundary, not here.
pub const WORLD_UP: Vector3<f64> = Vector3::new(0.0, 1.0, 0.0);

/// Simplified kinematic state of one tracked body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub orientation: Quaternion,
}

/// Kinematic waypoint autopilot: steers a body toward a target position
/// with a damped-momentum seek and slerp-smoothed orientation.
///
/// This is not a physical model. It trades fidelity for smooth, stable
/// motion, and is an alternative strategy to the rigid-body integrator,
/// not a layer on top of it.
#[derive(Debug, Clone, Copy)]
pub struct WaypointController {
    state: ControllerState,
}

impl WaypointController {
    /// Velocity magnitude cap, m/s.
    pub const MAX_SPEED: f64 = 3.0;
    /// Fraction of velocity carried over each step.
    const VELOCITY_RETENTION: f64 = 0.98;
    /// Acceleration gain toward the target, per second.
    const SEEK_GAIN: f64 = 0.3;
    /// Orientation smoothing rate; the slerp fraction per step is this
    /// times dt.
    const TURN_RATE: f64 = 0.5;
    /// Weight of the flight direction in the up-vector bias.
    const UP_BIAS: f64 = 1.5;
    /// Nudge applied to the commanded heading so the destination basis
    /// never has an exactly degenerate forward/up pair on axis-aligned
    /// headings.
    const HEADING_EPSILON: f64 = 1e-3;

    pub fn new(position: Vector3<f64>, orientation: Quaternion) -> Self {
        Self {
            state: ControllerState {
                position,
                velocity: Vector3::zeros(),
                orientation,
            },
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn position(&self) -> Vector3<f64> {
        self.state.position
    }

    pub fn velocity(&self) -> Vector3<f64> {
        self.state.velocity
    }

    pub fn orientation(&self) -> Quaternion {
        self.state.orientation
    }

    /// Advances the body one step toward `target` and returns the new
    /// (position, orientation) pair.
    ///
    /// The orientation blends between the approach attitude (nose along
    /// the flight direction, up biased away from vertical flight) and the
    /// commanded-heading attitude, weighted by exp(-distance) so the
    /// heading takes over as the target is reached.
    pub fn control(
        &mut self,
        target: Vector3<f64>,
        heading: f64,
        dt: f64,
    ) -> Result<(Vector3<f64>, Quaternion), AutopilotError> {
        if !target.iter().all(|v| v.is_finite()) {
            return Err(AutopilotError::NonFiniteTarget);
        }
        if !heading.is_finite() {
            return Err(AutopilotError::NonFiniteHeading);
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(AutopilotError::InvalidTimestep(dt));
        }

        let to_target = target - self.state.position;
        let direction = clamp_norm(to_target, 1.0);

        // Bias the up vector along (or against) the flight direction so
        // the forward/up pair never degenerates in near-vertical flight.
        let ascending = direction.y > 0.0;
        let bias = if ascending { direction } else { -direction };
        let up = Self::UP_BIAS * bias + WORLD_UP;
        let approach = Quaternion::from_basis(direction, up);

        let heading = heading + Self::HEADING_EPSILON;
        let destination = Quaternion::from_basis(
            Vector3::new(heading.cos(), 0.0, heading.sin()),
            WORLD_UP,
        );

        // exp(-distance) is 1 exactly at the target, so the destination
        // attitude wins outright once the body arrives.
        let proximity = (-to_target.norm()).exp();
        let desired = Quaternion::slerp(&approach, &destination, proximity)
            .map_err(|_| AutopilotError::DegenerateOrientation)?;
        let orientation = Quaternion::slerp(&self.state.orientation, &desired, Self::TURN_RATE * dt)
            .map_err(|_| AutopilotError::DegenerateOrientation)?;

        let velocity = clamp_norm(
            Self::VELOCITY_RETENTION * self.state.velocity + Self::SEEK_GAIN * dt * direction,
            Self::MAX_SPEED,
        );
        let position = self.state.position + dt * velocity;

        self.state = ControllerState {
            position,
            velocity,
            orientation,
        };
        Ok((position, orientation))
    }
}

/// Scales `v` down to `max` length if it is longer, leaving shorter
/// vectors untouched.
fn clamp_norm(v: Vector3<f64>, max: f64) -> Vector3<f64> {
    let norm = v.norm();
    if norm > max { v * (max / norm) } else { v }
}
