//! Error types for the ball-flight engine.
//!
//! Every fallible entry point returns [`Result`]. Invalid measurements are
//! rejected before any integration starts; a simulation that hits one of the
//! configured caps reports [`SimulationError::NotConverged`] instead of a
//! truncated trajectory.

use thiserror::Error;

use crate::types::Phase;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SimulationError>;

/// A single input value outside its physical range.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid {field} = {value}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: f64,
    pub reason: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self {
            field,
            value,
            reason,
        }
    }

    /// Reject NaN/infinite values and anything outside `[min, max]`.
    pub fn check_range(
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> std::result::Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(Self::new(field, value, "value must be finite"));
        }
        if value < min || value > max {
            return Err(Self::new(field, value, "value outside physical range"));
        }
        Ok(())
    }
}

/// Errors produced by [`crate::simulate`] and [`crate::Simulator`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "simulation did not converge in {phase:?} phase: {reason} \
         (after {steps} steps, {elapsed_s:.2} s simulated)"
    )]
    NotConverged {
        phase: Phase,
        steps: usize,
        elapsed_s: f64,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range_accepts_bounds() {
        assert!(ValidationError::check_range("speed", 0.0, 0.0, 10.0).is_ok());
        assert!(ValidationError::check_range("speed", 10.0, 0.0, 10.0).is_ok());
    }

    #[test]
    fn test_check_range_rejects_nan() {
        let err = ValidationError::check_range("spin", f64::NAN, -1.0, 1.0).unwrap_err();
        assert_eq!(err.field, "spin");
        assert_eq!(err.reason, "value must be finite");
    }

    #[test]
    fn test_validation_converts_into_simulation_error() {
        let err: SimulationError = ValidationError::new("speed", -1.0, "negative").into();
        assert!(matches!(err, SimulationError::InvalidInput(_)));
        assert!(err.to_string().contains("speed"));
    }
}
