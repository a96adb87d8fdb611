pub mod adapter;
pub mod axis_remap;
pub mod kinematic;

use autopilot::AutopilotError;
use nalgebra::Vector3;
use rotations::Quaternion;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use adapter::AxisRemappedBackend;
pub use kinematic::KinematicFleet;

/// Position and orientation of one body, the pair handed to the graphics
/// consumer after every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vector3<f64>,
    pub orientation: Quaternion,
}

impl Pose {
    pub fn new(position: Vector3<f64>, orientation: Quaternion) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// At-rest pose with identity orientation.
    pub fn at_position(position: Vector3<f64>) -> Self {
        Self::new(position, Quaternion::IDENTITY)
    }
}

/// The swap contract between the native kinematic fleet and a substituted
/// high-fidelity simulator: per simulation step, N targets and N headings
/// in, N poses out, paired by index.
///
/// Implementations own one state record per body and must not mutate any
/// body when the call is rejected.
pub trait FlightBackend {
    /// Number of tracked bodies.
    fn body_count(&self) -> usize;

    /// Advances every body one step toward its target.
    fn control_all(
        &mut self,
        targets: &[Vector3<f64>],
        headings: &[f64],
        dt: f64,
    ) -> Result<Vec<Pose>, FleetError>;
}

/// Errors from a batched control step.
#[derive(Debug, Clone, Copy, Error)]
pub enum FleetError {
    #[error("expected {expected} targets and headings, got {targets} targets and {headings} headings")]
    LengthMismatch {
        expected: usize,
        targets: usize,
        headings: usize,
    },
    #[error("time step must be finite and positive, got {0}")]
    InvalidTimestep(f64),
    #[error("body {index}: {source}")]
    Body {
        index: usize,
        source: AutopilotError,
    },
}
