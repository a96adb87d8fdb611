use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating airframe parameters. All of
/// these are fatal at construction; a model is never built from a partial
/// or invalid parameter set.
#[derive(Debug, Error)]
pub enum AirframeError {
    #[error("failed to read airframe config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse airframe config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("airframe parameter `{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("airframe parameter `{field}` is not finite")]
    NonFinite { field: &'static str },
}

/// Physical constants of a single quadrotor airframe.
///
/// Loaded once from a RON file (or built programmatically) and immutable
/// afterwards. Every dynamics quantity derives from these seven values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirframeParameters {
    /// Vehicle mass m, kg.
    pub mass: f64,
    /// Thrust coefficient k mapping a motor input to thrust, N per unit input.
    pub thrust_coefficient: f64,
    /// Yaw drag coefficient b mapping differential motor input to yaw torque.
    pub yaw_drag_coefficient: f64,
    /// Arm length l from the center of mass to each motor, m.
    pub arm_length: f64,
    /// Diagonal of the inertia tensor (Ixx, Iyy, Izz), kg·m².
    pub inertia: [f64; 3],
    /// Linear drag coefficient kd opposing translational velocity.
    pub linear_drag_coefficient: f64,
    /// Gravitational acceleration g, m/s².
    pub gravity: f64,
}

impl Default for AirframeParameters {
    /// Reference airframe the rigid-body model is tuned for.
    fn default() -> Self {
        Self {
            mass: 0.5,
            thrust_coefficient: 3.0e-6,
            yaw_drag_coefficient: 1.0e-7,
            arm_length: 0.25,
            inertia: [5.0e-3, 5.0e-3, 1.0e-2],
            linear_drag_coefficient: 0.25,
            gravity: 9.81,
        }
    }
}

impl AirframeParameters {
    /// Loads and validates parameters from a RON file.
    pub fn from_ron_file(path: &Path) -> Result<Self, AirframeError> {
        let contents = fs::read_to_string(path).map_err(|source| AirframeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&contents)
    }

    /// Parses and validates parameters from a RON string.
    pub fn from_ron_str(contents: &str) -> Result<Self, AirframeError> {
        let params: Self = ron::from_str(contents)?;
        params.validate()?;
        Ok(params)
    }

    /// Checks every parameter is finite and strictly positive (gravity may
    /// be zero, for drop tests in free space).
    pub fn validate(&self) -> Result<(), AirframeError> {
        let positive = [
            ("mass", self.mass),
            ("thrust_coefficient", self.thrust_coefficient),
            ("yaw_drag_coefficient", self.yaw_drag_coefficient),
            ("arm_length", self.arm_length),
            ("inertia[0]", self.inertia[0]),
            ("inertia[1]", self.inertia[1]),
            ("inertia[2]", self.inertia[2]),
            ("linear_drag_coefficient", self.linear_drag_coefficient),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(AirframeError::NonFinite { field });
            }
            if value <= 0.0 {
                return Err(AirframeError::NonPositive { field, value });
            }
        }
        if !self.gravity.is_finite() {
            return Err(AirframeError::NonFinite { field: "gravity" });
        }
        if self.gravity < 0.0 {
            return Err(AirframeError::NonPositive {
                field: "gravity",
                value: self.gravity,
            });
        }
        Ok(())
    }

    /// Per-motor input that balances gravity when applied to all four
    /// motors at level attitude: m·g / (4·k).
    pub fn hover_input(&self) -> f64 {
        self.mass * self.gravity / (4.0 * self.thrust_coefficient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_config_parses() {
        let params =
            AirframeParameters::from_ron_str(include_str!("../config/reference.ron")).unwrap();
        assert_eq!(params, AirframeParameters::default());
    }

    #[test]
    fn test_missing_key_fails() {
        let result = AirframeParameters::from_ron_str("(mass: 0.5)");
        assert!(matches!(result, Err(AirframeError::Parse(_))));
    }

    #[test]
    fn test_missing_file_fails() {
        let result = AirframeParameters::from_ron_file(Path::new("/nonexistent/airframe.ron"));
        assert!(matches!(result, Err(AirframeError::Io { .. })));
    }

    #[test]
    fn test_negative_mass_rejected() {
        let params = AirframeParameters {
            mass: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(AirframeError::NonPositive { field: "mass", .. })
        ));
    }

    #[test]
    fn test_non_finite_inertia_rejected() {
        let mut params = AirframeParameters::default();
        params.inertia[1] = f64::NAN;
        assert!(matches!(
            params.validate(),
            Err(AirframeError::NonFinite { field: "inertia[1]" })
        ));
    }

    #[test]
    fn test_hover_input_balances_gravity() {
        let params = AirframeParameters::default();
        let thrust = 4.0 * params.thrust_coefficient * params.hover_input();
        assert_relative_eq!(thrust, params.mass * params.gravity, epsilon = 1e-12);
    }
}
