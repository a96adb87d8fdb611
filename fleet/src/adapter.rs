use crate::axis_remap::{quat_zup_to_yup, vec_yup_to_zup, vec_zup_to_yup};
use crate::{FleetError, FlightBackend, Pose};
use nalgebra::Vector3;

/// Adapter for a substituted high-fidelity simulator that works in a Z-up
/// frame while the rest of the system speaks Y-up.
///
/// The wrapped backend sees Z-up targets; callers see Y-up poses. Heading
/// is a rotation about the up axis in both conventions and passes through
/// unchanged. Everything else about the backend (its dynamics, its
/// fidelity) is its own business; only the array-in/array-out contract and
/// this convention remap are fixed here.
pub struct AxisRemappedBackend<B: FlightBackend> {
    inner: B,
}

impl<B: FlightBackend> AxisRemappedBackend<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: FlightBackend> FlightBackend for AxisRemappedBackend<B> {
    fn body_count(&self) -> usize {
        self.inner.body_count()
    }

    fn control_all(
        &mut self,
        targets: &[Vector3<f64>],
        headings: &[f64],
        dt: f64,
    ) -> Result<Vec<Pose>, FleetError> {
        let remapped: Vec<_> = targets.iter().map(|t| vec_yup_to_zup(*t)).collect();
        let poses = self.inner.control_all(&remapped, headings, dt)?;
        Ok(poses
            .into_iter()
            .map(|pose| Pose::new(vec_zup_to_yup(pose.position), quat_zup_to_yup(pose.orientation)))
            .collect())
    }
}
