//! Two bodies seeking a shared waypoint, printing pose and remaining
//! distance each frame. The printed (position, orientation) pairs are what
//! a graphics layer would push into its transform nodes.

use fleet::{FlightBackend, KinematicFleet, Pose};
use nalgebra::Vector3;
use std::f64::consts::PI;

fn main() -> Result<(), fleet::FleetError> {
    let mut fleet = KinematicFleet::new(&[
        Pose::at_position(Vector3::new(15.0, 0.0, 15.0)),
        Pose::at_position(Vector3::new(25.0, 3.0, 10.0)),
    ]);

    let target = Vector3::new(10.0, 10.0, 10.0);
    let targets = [target; 2];
    let headings = [PI; 2];

    for frame in 0..1000 {
        let poses = fleet.control_all(&targets, &headings, 0.05)?;
        if frame % 50 == 0 {
            for (i, pose) in poses.iter().enumerate() {
                println!(
                    "frame {frame:4} body {i}: pos [{:7.3} {:7.3} {:7.3}] orient {} dist {:.3}",
                    pose.position.x,
                    pose.position.y,
                    pose.position.z,
                    pose.orientation,
                    (target - pose.position).norm()
                );
            }
        }
    }
    Ok(())
}
