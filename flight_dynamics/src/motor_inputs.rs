use crate::DynamicsError;
use serde::{Deserialize, Serialize};

/// Per-motor thrust commands in the fixed index order front-left,
/// front-right, rear-left, rear-right. The index order is what ties the
/// torque formulas to the arm length and thrust/yaw-drag coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorInputs(pub [f64; 4]);

impl MotorInputs {
    pub const FRONT_LEFT: usize = 0;
    pub const FRONT_RIGHT: usize = 1;
    pub const REAR_LEFT: usize = 2;
    pub const REAR_RIGHT: usize = 3;

    /// The same command on all four motors.
    pub fn uniform(input: f64) -> Self {
        Self([input; 4])
    }

    /// All motors off.
    pub fn zero() -> Self {
        Self::uniform(0.0)
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Rejects non-finite or negative commands.
    pub fn validate(&self) -> Result<(), DynamicsError> {
        for (index, &value) in self.0.iter().enumerate() {
            if !value.is_finite() {
                return Err(DynamicsError::NonFiniteMotorInput { index });
            }
            if value < 0.0 {
                return Err(DynamicsError::NegativeMotorInput { index, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_zero_and_positive() {
        assert!(MotorInputs::zero().validate().is_ok());
        assert!(MotorInputs([1.0, 2.0, 3.0, 4.0]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative() {
        let result = MotorInputs([1.0, -0.5, 1.0, 1.0]).validate();
        assert!(matches!(
            result,
            Err(DynamicsError::NegativeMotorInput { index: 1, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let result = MotorInputs([1.0, 1.0, f64::NAN, 1.0]).validate();
        assert!(matches!(
            result,
            Err(DynamicsError::NonFiniteMotorInput { index: 2 })
        ));
    }
}
