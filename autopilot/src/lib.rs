pub mod controller;

use thiserror::Error;

pub use controller::{ControllerState, WaypointController, WORLD_UP};

/// Errors from a single control call. A rejected call never mutates state.
#[derive(Debug, Clone, Copy, Error)]
pub enum AutopilotError {
    #[error("target position is not finite")]
    NonFiniteTarget,
    #[error("heading is not finite")]
    NonFiniteHeading,
    #[error("time step must be finite and positive, got {0}")]
    InvalidTimestep(f64),
    #[error("controller orientation degenerated to zero magnitude")]
    DegenerateOrientation,
}
