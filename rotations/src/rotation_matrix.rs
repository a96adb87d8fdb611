use super::*;
use nalgebra::{Matrix3, Vector3};
use std::ops::Mul;

/// A 3x3 rotation matrix taking body-frame vectors to the world frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RotationMatrix(pub Matrix3<f64>);

impl RotationMatrix {
    pub fn get_value(&self) -> Matrix3<f64> {
        self.0
    }
}

impl From<Matrix3<f64>> for RotationMatrix {
    fn from(value: Matrix3<f64>) -> Self {
        Self(value)
    }
}

impl From<&EulerAngles> for RotationMatrix {
    /// Builds the rotation matrix from roll/pitch/yaw in the airframe's
    /// fixed convention. The columns are the body axes expressed in the
    /// world frame:
    ///
    /// - c0 = (cos φ cos θ, cos θ sin φ, −sin θ)
    /// - c1 = (cos φ sin θ sin ψ − cos ψ sin φ, cos φ cos ψ + sin φ sin θ sin ψ, cos θ sin ψ)
    /// - c2 = (sin φ sin ψ + cos φ cos ψ sin θ, cos ψ sin φ sin θ − cos φ sin ψ, cos θ cos ψ)
    fn from(euler: &EulerAngles) -> Self {
        let (sphi, cphi) = euler.phi.sin_cos();
        let (stheta, ctheta) = euler.theta.sin_cos();
        let (spsi, cpsi) = euler.psi.sin_cos();

        let c0 = Vector3::new(cphi * ctheta, ctheta * sphi, -stheta);
        let c1 = Vector3::new(
            cphi * stheta * spsi - cpsi * sphi,
            cphi * cpsi + sphi * stheta * spsi,
            ctheta * spsi,
        );
        let c2 = Vector3::new(
            sphi * spsi + cphi * cpsi * stheta,
            cpsi * sphi * stheta - cphi * spsi,
            ctheta * cpsi,
        );

        Self(Matrix3::from_columns(&[c0, c1, c2]))
    }
}

impl From<&Quaternion> for RotationMatrix {
    fn from(q: &Quaternion) -> Self {
        let Quaternion { x, y, z, w } = *q;

        let e11 = 1.0 - 2.0 * (y * y + z * z);
        let e12 = 2.0 * (x * y - w * z);
        let e13 = 2.0 * (x * z + w * y);
        let e21 = 2.0 * (x * y + w * z);
        let e22 = 1.0 - 2.0 * (x * x + z * z);
        let e23 = 2.0 * (y * z - w * x);
        let e31 = 2.0 * (x * z - w * y);
        let e32 = 2.0 * (y * z + w * x);
        let e33 = 1.0 - 2.0 * (x * x + y * y);

        Self(Matrix3::new(e11, e12, e13, e21, e22, e23, e31, e32, e33))
    }
}

impl RotationTrait for RotationMatrix {
    fn rotate(&self, v: Vector3<f64>) -> Vector3<f64> {
        self.0 * v
    }

    fn inv(&self) -> Self {
        RotationMatrix(self.0.transpose())
    }

    fn identity() -> Self {
        RotationMatrix(Matrix3::identity())
    }
}

impl Mul<RotationMatrix> for RotationMatrix {
    type Output = RotationMatrix;

    fn mul(self, rhs: RotationMatrix) -> RotationMatrix {
        RotationMatrix(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_level_attitude_is_identity() {
        let r = RotationMatrix::from(&EulerAngles::new(0.0, 0.0, 0.0));
        assert_abs_diff_eq!((r.0 - Matrix3::identity()).norm(), 0.0, epsilon = TOL);
    }

    #[test]
    fn test_matrix_is_orthonormal() {
        let r = RotationMatrix::from(&EulerAngles::new(0.3, -0.7, 1.2));
        let should_be_identity = r.0 * r.0.transpose();
        assert_abs_diff_eq!(
            (should_be_identity - Matrix3::identity()).norm(),
            0.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(r.0.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_first_column_formula() {
        let euler = EulerAngles::new(0.4, 0.9, -0.2);
        let r = RotationMatrix::from(&euler);
        assert_abs_diff_eq!(
            r.0[(0, 0)],
            euler.phi.cos() * euler.theta.cos(),
            epsilon = TOL
        );
        assert_abs_diff_eq!(
            r.0[(1, 0)],
            euler.theta.cos() * euler.phi.sin(),
            epsilon = TOL
        );
        assert_abs_diff_eq!(r.0[(2, 0)], -euler.theta.sin(), epsilon = TOL);
    }

    #[test]
    fn test_inverse_undoes_rotation() {
        let r = RotationMatrix::from(&EulerAngles::new(0.1, 0.2, 0.3));
        let v = Vector3::new(1.0, -2.0, 0.5);
        let round_trip = r.inv().rotate(r.rotate(v));
        assert_abs_diff_eq!((round_trip - v).norm(), 0.0, epsilon = 1e-12);
    }
}
