pub mod euler_angles;
pub mod quaternion;
pub mod rotation_matrix;

use nalgebra::Vector3;

pub use euler_angles::{EulerAngles, EulerKinematicsError};
pub use quaternion::{Quaternion, QuaternionError};
pub use rotation_matrix::RotationMatrix;

pub mod prelude {
    pub use crate::RotationTrait;
    pub use crate::euler_angles::*;
    pub use crate::quaternion::*;
    pub use crate::rotation_matrix::*;
}

/// Trait defining rotation operations shared by the orientation
/// representations in this crate.
pub trait RotationTrait {
    /// Rotates a vector by the rotation.
    fn rotate(&self, v: Vector3<f64>) -> Vector3<f64>;

    /// Returns the inverse rotation.
    fn inv(&self) -> Self;

    /// Returns the identity rotation.
    fn identity() -> Self;
}
