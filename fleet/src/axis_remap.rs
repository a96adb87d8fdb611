//! Axis-convention remapping between the controllers' Y-up frame and a
//! Z-up backend frame.
//!
//! The two frames differ by a proper rotation of +90° about X, so every
//! remap here preserves handedness and rotation action. Keeping the remap
//! as standalone pure functions at the adapter boundary (instead of inline
//! fixups at each call site) is what makes convention mismatches testable.

use nalgebra::Vector3;
use rotations::Quaternion;

use std::f64::consts::FRAC_1_SQRT_2;

/// Quaternion of the +90° rotation about X taking Y-up coordinates to
/// Z-up coordinates.
const FRAME_ROTATION: Quaternion = Quaternion {
    x: FRAC_1_SQRT_2,
    y: 0.0,
    z: 0.0,
    w: FRAC_1_SQRT_2,
};

/// Re-expresses a Y-up vector in the Z-up frame: (x, y, z) → (x, −z, y).
pub fn vec_yup_to_zup(v: Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.x, -v.z, v.y)
}

/// Re-expresses a Z-up vector in the Y-up frame: (x, y, z) → (x, z, −y).
pub fn vec_zup_to_yup(v: Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.x, v.z, -v.y)
}

/// Re-expresses a Y-up orientation in the Z-up frame by conjugating with
/// the frame rotation.
pub fn quat_yup_to_zup(q: Quaternion) -> Quaternion {
    FRAME_ROTATION * q * FRAME_ROTATION.inv()
}

/// Re-expresses a Z-up orientation in the Y-up frame.
pub fn quat_zup_to_yup(q: Quaternion) -> Quaternion {
    FRAME_ROTATION.inv() * q * FRAME_ROTATION
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_up_maps_to_up() {
        let up = vec_yup_to_zup(Vector3::y());
        assert_abs_diff_eq!((up - Vector3::z()).norm(), 0.0, epsilon = TOL);
        let back = vec_zup_to_yup(Vector3::z());
        assert_abs_diff_eq!((back - Vector3::y()).norm(), 0.0, epsilon = TOL);
    }

    #[test]
    fn test_x_axis_is_shared() {
        assert_eq!(vec_yup_to_zup(Vector3::x()), Vector3::x());
        assert_eq!(vec_zup_to_yup(Vector3::x()), Vector3::x());
    }

    #[test]
    fn test_vector_round_trip() {
        let v = Vector3::new(1.0, -2.0, 3.0);
        assert_eq!(vec_zup_to_yup(vec_yup_to_zup(v)), v);
        assert_eq!(vec_yup_to_zup(vec_zup_to_yup(v)), v);
    }

    #[test]
    fn test_remap_preserves_handedness() {
        let a = Vector3::new(0.3, 0.5, -0.2);
        let b = Vector3::new(-1.0, 0.4, 0.8);
        let cross_then_map = vec_yup_to_zup(a.cross(&b));
        let map_then_cross = vec_yup_to_zup(a).cross(&vec_yup_to_zup(b));
        assert_abs_diff_eq!((cross_then_map - map_then_cross).norm(), 0.0, epsilon = TOL);
    }

    #[test]
    fn test_quaternion_remap_preserves_rotation_action() {
        let q = Quaternion::new(0.2, -0.3, 0.5, 0.8).normalize().unwrap();
        let v = Vector3::new(0.7, -1.2, 2.5);

        let direct = q.rotate(v);
        let via_zup = vec_zup_to_yup(quat_yup_to_zup(q).rotate(vec_yup_to_zup(v)));
        assert_abs_diff_eq!((direct - via_zup).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_quaternion_round_trip() {
        let q = Quaternion::new(0.1, 0.2, 0.3, 0.9).normalize().unwrap();
        let back = quat_zup_to_yup(quat_yup_to_zup(q));
        assert_abs_diff_eq!(q.dot(&back).abs(), 1.0, epsilon = 1e-12);
    }
}
