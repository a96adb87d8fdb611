use crate::{FleetError, FlightBackend, Pose};
use autopilot::{AutopilotError, WaypointController};
use nalgebra::Vector3;
use rayon::prelude::*;

/// Native fleet of independently tracked bodies, one `WaypointController`
/// per body.
///
/// Bodies share no mutable state, so the batched update fans out across
/// threads; results come back in body order either way.
pub struct KinematicFleet {
    controllers: Vec<WaypointController>,
}

impl KinematicFleet {
    pub fn new(initial: &[Pose]) -> Self {
        let controllers = initial
            .iter()
            .map(|pose| WaypointController::new(pose.position, pose.orientation))
            .collect();
        Self { controllers }
    }

    pub fn poses(&self) -> Vec<Pose> {
        self.controllers
            .iter()
            .map(|c| Pose::new(c.position(), c.orientation()))
            .collect()
    }

    /// Validates the whole batch up front so a rejected call mutates no
    /// body at all.
    fn validate(
        &self,
        targets: &[Vector3<f64>],
        headings: &[f64],
        dt: f64,
    ) -> Result<(), FleetError> {
        if targets.len() != self.controllers.len() || headings.len() != self.controllers.len() {
            return Err(FleetError::LengthMismatch {
                expected: self.controllers.len(),
                targets: targets.len(),
                headings: headings.len(),
            });
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(FleetError::InvalidTimestep(dt));
        }
        for (index, target) in targets.iter().enumerate() {
            if !target.iter().all(|v| v.is_finite()) {
                return Err(FleetError::Body {
                    index,
                    source: AutopilotError::NonFiniteTarget,
                });
            }
        }
        for (index, heading) in headings.iter().enumerate() {
            if !heading.is_finite() {
                return Err(FleetError::Body {
                    index,
                    source: AutopilotError::NonFiniteHeading,
                });
            }
        }
        Ok(())
    }
}

impl FlightBackend for KinematicFleet {
    fn body_count(&self) -> usize {
        self.controllers.len()
    }

    fn control_all(
        &mut self,
        targets: &[Vector3<f64>],
        headings: &[f64],
        dt: f64,
    ) -> Result<Vec<Pose>, FleetError> {
        self.validate(targets, headings, dt)?;

        self.controllers
            .par_iter_mut()
            .zip(targets.par_iter())
            .zip(headings.par_iter())
            .enumerate()
            .map(|(index, ((controller, target), heading))| {
                let (position, orientation) = controller
                    .control(*target, *heading, dt)
                    .map_err(|source| FleetError::Body { index, source })?;
                Ok(Pose::new(position, orientation))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_body_fleet() -> KinematicFleet {
        KinematicFleet::new(&[
            Pose::at_position(Vector3::zeros()),
            Pose::at_position(Vector3::new(10.0, 2.0, -4.0)),
        ])
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut fleet = two_body_fleet();
        let result = fleet.control_all(&[Vector3::zeros()], &[0.0, 0.0], 0.05);
        assert!(matches!(result, Err(FleetError::LengthMismatch { .. })));
    }

    #[test]
    fn test_bad_batch_mutates_nothing() {
        let mut fleet = two_body_fleet();
        let before = fleet.poses();

        let targets = [Vector3::new(1.0, 1.0, 1.0), Vector3::new(f64::NAN, 0.0, 0.0)];
        assert!(fleet.control_all(&targets, &[0.0, 0.0], 0.05).is_err());
        assert!(
            fleet
                .control_all(&[Vector3::zeros(), Vector3::zeros()], &[0.0, 0.0], -1.0)
                .is_err()
        );

        assert_eq!(fleet.poses(), before);
    }

    #[test]
    fn test_batched_matches_sequential_controllers() {
        let starts = [
            Pose::at_position(Vector3::zeros()),
            Pose::at_position(Vector3::new(10.0, 2.0, -4.0)),
        ];
        let mut fleet = KinematicFleet::new(&starts);
        let mut solo: Vec<_> = starts
            .iter()
            .map(|p| WaypointController::new(p.position, p.orientation))
            .collect();

        let targets = [Vector3::new(5.0, 0.0, 3.0), Vector3::new(-2.0, 6.0, 1.0)];
        let headings = [0.0, 1.3];
        for _ in 0..200 {
            let batched = fleet.control_all(&targets, &headings, 0.05).unwrap();
            for (i, controller) in solo.iter_mut().enumerate() {
                let (position, orientation) =
                    controller.control(targets[i], headings[i], 0.05).unwrap();
                assert_eq!(batched[i], Pose::new(position, orientation));
            }
        }
    }

    #[test]
    fn test_poses_reports_current_state() {
        let mut fleet = two_body_fleet();
        let targets = [Vector3::new(1.0, 0.0, 0.0), Vector3::new(9.0, 2.0, -4.0)];
        let stepped = fleet.control_all(&targets, &[0.0, 0.0], 0.05).unwrap();
        assert_eq!(stepped, fleet.poses());
        for pose in fleet.poses() {
            assert!((pose.orientation.mag() - 1.0).abs() < 1e-5);
        }
    }
}
