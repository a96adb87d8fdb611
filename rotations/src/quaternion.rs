use super::*;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Mul, Neg};
use thiserror::Error;

/// Magnitudes below this are left unscaled instead of normalized, so that
/// degenerate basis vectors stay finite rather than dividing by zero.
const NORM_GUARD: f64 = 1e-4;

/// A unit quaternion for 3D rotations, scalar component last.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

/// Errors that can occur when operating on a `Quaternion`.
#[derive(Debug, Clone, Copy, Error)]
pub enum QuaternionError {
    #[error("got zero magnitude quaternion")]
    ZeroMagnitude,
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Dot product of two quaternions.
    pub fn dot(&self, other: &Quaternion) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn mag(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn normalize(&self) -> Result<Self, QuaternionError> {
        let mag_squared = self.dot(self);
        if mag_squared < f64::EPSILON {
            return Err(QuaternionError::ZeroMagnitude);
        }
        // Already unit within round-off: return unchanged, so repeated
        // normalization is bitwise stable.
        if (mag_squared - 1.0).abs() < 1e-12 {
            return Ok(*self);
        }
        let mag = mag_squared.sqrt();
        Ok(Quaternion::new(
            self.x / mag,
            self.y / mag,
            self.z / mag,
            self.w / mag,
        ))
    }

    pub fn inv(&self) -> Quaternion {
        Quaternion::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Builds the orientation whose body x/y axes align with `forward` and
    /// `up`. The pair is forced orthonormal: `up` is normalized, the side
    /// axis is `forward x up`, and `forward` is recomputed as `up x side`.
    ///
    /// Near-zero inputs are guarded (left unscaled) so the result is always
    /// finite; a fully degenerate basis collapses to the identity.
    pub fn from_basis(forward: Vector3<f64>, up: Vector3<f64>) -> Quaternion {
        let up = guarded_normalize(up);
        let side = guarded_normalize(forward.cross(&up));
        let forward = up.cross(&side);

        let m = Matrix3::from_columns(&[forward, up, side]);
        Quaternion::from(&RotationMatrix(m))
            .normalize()
            .unwrap_or(Quaternion::IDENTITY)
    }

    /// Rotates a vector by this quaternion.
    pub fn rotate(&self, v: Vector3<f64>) -> Vector3<f64> {
        let u = Vector3::new(self.x, self.y, self.z);
        let uv = u.cross(&v);
        v + 2.0 * (self.w * uv + u.cross(&uv))
    }

    /// Spherical linear interpolation from `q1` (t = 0) to `q2` (t = 1)
    /// along the shorter arc.
    ///
    /// The endpoints are exact: `t <= 0` returns normalized `q1` and
    /// `t >= 1` returns normalized `q2`, with no interpolation round-off.
    pub fn slerp(q1: &Quaternion, q2: &Quaternion, t: f64) -> Result<Self, QuaternionError> {
        let q1 = q1.normalize()?;
        let q2 = q2.normalize()?;

        if t <= 0.0 {
            return Ok(q1);
        }
        if t >= 1.0 {
            return Ok(q2);
        }

        // If the dot product is negative, negate one endpoint so the
        // interpolation takes the shorter path. q and -q are the same rotation.
        let mut dot = q1.dot(&q2);
        let q2 = if dot < 0.0 {
            dot = -dot;
            -q2
        } else {
            q2
        };

        // Nearly parallel quaternions fall back to linear interpolation to
        // avoid dividing by a vanishing sin.
        if dot > 0.9995 {
            let lerp = Quaternion {
                x: q1.x + t * (q2.x - q1.x),
                y: q1.y + t * (q2.y - q1.y),
                z: q1.z + t * (q2.z - q1.z),
                w: q1.w + t * (q2.w - q1.w),
            };
            return lerp.normalize();
        }

        let theta = dot.clamp(-1.0, 1.0).acos();
        let sin_theta = theta.sin();
        let s1 = ((1.0 - t) * theta).sin() / sin_theta;
        let s2 = (t * theta).sin() / sin_theta;

        Quaternion {
            x: s1 * q1.x + s2 * q2.x,
            y: s1 * q1.y + s2 * q2.y,
            z: s1 * q1.z + s2 * q2.z,
            w: s1 * q1.w + s2 * q2.w,
        }
        .normalize()
    }
}

/// Normalizes a vector, leaving near-zero vectors unscaled.
pub fn guarded_normalize(v: Vector3<f64>) -> Vector3<f64> {
    let norm = v.norm();
    if norm < NORM_GUARD { v } else { v / norm }
}

impl From<&RotationMatrix> for Quaternion {
    /// Converts a rotation matrix to a quaternion using the branching trace
    /// method, picking the numerically largest component first.
    fn from(rotation_matrix: &RotationMatrix) -> Self {
        let m = rotation_matrix.0;
        let trace = m[(0, 0)] + m[(1, 1)] + m[(2, 2)];

        if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Quaternion::new(
                (m[(2, 1)] - m[(1, 2)]) / s,
                (m[(0, 2)] - m[(2, 0)]) / s,
                (m[(1, 0)] - m[(0, 1)]) / s,
                0.25 * s,
            )
        } else if m[(0, 0)] > m[(1, 1)] && m[(0, 0)] > m[(2, 2)] {
            let s = (1.0 + m[(0, 0)] - m[(1, 1)] - m[(2, 2)]).sqrt() * 2.0;
            Quaternion::new(
                0.25 * s,
                (m[(0, 1)] + m[(1, 0)]) / s,
                (m[(0, 2)] + m[(2, 0)]) / s,
                (m[(2, 1)] - m[(1, 2)]) / s,
            )
        } else if m[(1, 1)] > m[(2, 2)] {
            let s = (1.0 + m[(1, 1)] - m[(0, 0)] - m[(2, 2)]).sqrt() * 2.0;
            Quaternion::new(
                (m[(0, 1)] + m[(1, 0)]) / s,
                0.25 * s,
                (m[(1, 2)] + m[(2, 1)]) / s,
                (m[(0, 2)] - m[(2, 0)]) / s,
            )
        } else {
            let s = (1.0 + m[(2, 2)] - m[(0, 0)] - m[(1, 1)]).sqrt() * 2.0;
            Quaternion::new(
                (m[(0, 2)] + m[(2, 0)]) / s,
                (m[(1, 2)] + m[(2, 1)]) / s,
                0.25 * s,
                (m[(1, 0)] - m[(0, 1)]) / s,
            )
        }
    }
}

impl From<&EulerAngles> for Quaternion {
    fn from(euler: &EulerAngles) -> Self {
        Quaternion::from(&RotationMatrix::from(euler))
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Quaternion;

    /// Hamilton product. `(q1 * q2).rotate(v)` applies `q2` first, then `q1`.
    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

impl Neg for Quaternion {
    type Output = Quaternion;

    fn neg(self) -> Quaternion {
        Quaternion::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl RotationTrait for Quaternion {
    fn rotate(&self, v: Vector3<f64>) -> Vector3<f64> {
        Quaternion::rotate(self, v)
    }

    fn inv(&self) -> Self {
        Quaternion::inv(self)
    }

    fn identity() -> Self {
        Quaternion::IDENTITY
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.6}, {:.6}, {:.6}, {:.6}]",
            self.x, self.y, self.z, self.w
        )
    }
}
