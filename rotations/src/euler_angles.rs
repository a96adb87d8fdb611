use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Roll/pitch/yaw attitude in radians.
///
/// The convention is fixed by the rotation matrix construction in
/// [`crate::RotationMatrix`]; the kinematic maps below are only valid away
/// from the pitch singularity at θ = ±90°.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    pub phi: f64,
    pub theta: f64,
    pub psi: f64,
}

/// Errors from the Euler-rate ↔ body-rate kinematic maps.
#[derive(Debug, Clone, Copy, Error)]
pub enum EulerKinematicsError {
    #[error(
        "pitch angle {pitch} rad is too close to the ±90° kinematic singularity (|cos θ| < {threshold})"
    )]
    PitchSingularity { pitch: f64, threshold: f64 },
}

impl EulerAngles {
    /// |cos θ| below this makes the rate transform effectively singular.
    pub const PITCH_SINGULARITY_COS: f64 = 1e-3;

    pub fn new(phi: f64, theta: f64, psi: f64) -> Self {
        Self { phi, theta, psi }
    }

    /// Returns an error when the pitch angle is close enough to ±90° that
    /// the body-rate → Euler-rate map would blow up.
    pub fn check_pitch_singularity(&self) -> Result<(), EulerKinematicsError> {
        if self.theta.cos().abs() < Self::PITCH_SINGULARITY_COS {
            return Err(EulerKinematicsError::PitchSingularity {
                pitch: self.theta,
                threshold: Self::PITCH_SINGULARITY_COS,
            });
        }
        Ok(())
    }

    /// Kinematic matrix W(φ, θ) mapping Euler-angle rates to body angular
    /// velocity: ω = W·θ̇.
    fn body_rate_matrix(&self) -> Matrix3<f64> {
        let (sphi, cphi) = self.phi.sin_cos();
        let (stheta, ctheta) = self.theta.sin_cos();
        Matrix3::new(
            1.0, 0.0, -stheta, //
            0.0, cphi, ctheta * sphi, //
            0.0, -sphi, ctheta * cphi,
        )
    }

    /// Maps an Euler-angle rate θ̇ to the body angular velocity ω.
    pub fn body_rate_from_euler_rate(&self, euler_rate: Vector3<f64>) -> Vector3<f64> {
        self.body_rate_matrix() * euler_rate
    }

    /// Maps a body angular velocity ω back to an Euler-angle rate θ̇ using
    /// the analytic inverse of W:
    ///
    /// W⁻¹ = [[1, sin φ tan θ, cos φ tan θ],
    ///        [0, cos φ, −sin φ],
    ///        [0, sin φ / cos θ, cos φ / cos θ]]
    pub fn euler_rate_from_body_rate(
        &self,
        omega: Vector3<f64>,
    ) -> Result<Vector3<f64>, EulerKinematicsError> {
        self.check_pitch_singularity()?;

        let (sphi, cphi) = self.phi.sin_cos();
        let ctheta = self.theta.cos();
        let ttheta = self.theta.tan();

        let w_inv = Matrix3::new(
            1.0, sphi * ttheta, cphi * ttheta, //
            0.0, cphi, -sphi, //
            0.0, sphi / ctheta, cphi / ctheta,
        );
        Ok(w_inv * omega)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_level_rate_maps_are_identity() {
        let euler = EulerAngles::default();
        let rate = Vector3::new(0.1, -0.2, 0.3);
        let omega = euler.body_rate_from_euler_rate(rate);
        assert_abs_diff_eq!((omega - rate).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rate_round_trip() {
        let euler = EulerAngles::new(0.4, 0.6, -1.1);
        let rate = Vector3::new(1.5, -0.7, 2.0);
        let omega = euler.body_rate_from_euler_rate(rate);
        let back = euler.euler_rate_from_body_rate(omega).unwrap();
        assert_abs_diff_eq!((back - rate).norm(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_pitch_singularity_detected() {
        let euler = EulerAngles::new(0.0, FRAC_PI_2, 0.0);
        assert!(matches!(
            euler.euler_rate_from_body_rate(Vector3::zeros()),
            Err(EulerKinematicsError::PitchSingularity { .. })
        ));
        assert!(euler.check_pitch_singularity().is_err());
    }

    #[test]
    fn test_near_but_not_at_singularity_is_fine() {
        let euler = EulerAngles::new(0.0, FRAC_PI_2 - 0.01, 0.0);
        assert!(euler.euler_rate_from_body_rate(Vector3::new(0.1, 0.1, 0.1)).is_ok());
    }
}
