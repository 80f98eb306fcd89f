//! Shot input and output values.
//!
//! [`LaunchConditions`] holds what a launch monitor measures, already in SI.
//! [`ShotResult`] is the finished trajectory plus the summary numbers shown
//! on a range display (yards, feet, degrees).

use serde::{Deserialize, Serialize};

use crate::atmosphere::EnvironmentalConditions;
use crate::error::ValidationError;
use crate::types::{BallState, TrajectorySample, Vec3};
use crate::units;

/// Fastest ball speed accepted (m/s), well above any measured tour drive.
pub const MAX_BALL_SPEED: f64 = 120.0;

/// Largest backspin or sidespin component accepted (rad/s), about 19 000 rpm.
pub const MAX_SPIN: f64 = 2000.0;

/// Measured launch of a single shot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchConditions {
    /// Ball speed (m/s)
    pub ball_speed: f64,
    /// Vertical launch angle (degrees above horizontal)
    pub launch_angle_deg: f64,
    /// Horizontal launch direction (degrees, positive right of target)
    pub launch_direction_deg: f64,
    /// Backspin (rad/s)
    pub backspin: f64,
    /// Sidespin (rad/s, positive curves right)
    pub sidespin: f64,
}

impl LaunchConditions {
    pub fn new(
        ball_speed: f64,
        launch_angle_deg: f64,
        launch_direction_deg: f64,
        backspin: f64,
        sidespin: f64,
    ) -> Self {
        Self {
            ball_speed,
            launch_angle_deg,
            launch_direction_deg,
            backspin,
            sidespin,
        }
    }

    /// Build from launch-monitor units: mph, degrees and rpm.
    pub fn from_imperial(
        speed_mph: f64,
        launch_angle_deg: f64,
        launch_direction_deg: f64,
        back_rpm: f64,
        side_rpm: f64,
    ) -> Self {
        Self::new(
            units::mph_to_mps(speed_mph),
            launch_angle_deg,
            launch_direction_deg,
            units::rpm_to_rad_s(back_rpm),
            units::rpm_to_rad_s(side_rpm),
        )
    }

    /// Split a total spin rate (rad/s) by its spin-axis tilt.
    ///
    /// A positive axis tilts the spin axis to the right, which curves the
    /// ball right: `back = total * cos(axis)`, `side = total * sin(axis)`.
    pub fn from_total_spin(
        ball_speed: f64,
        launch_angle_deg: f64,
        launch_direction_deg: f64,
        total_spin: f64,
        spin_axis_deg: f64,
    ) -> Self {
        let axis = spin_axis_deg.to_radians();
        Self::new(
            ball_speed,
            launch_angle_deg,
            launch_direction_deg,
            total_spin * axis.cos(),
            total_spin * axis.sin(),
        )
    }

    /// Tour-average driver: 167 mph, 10.9°, 2686 rpm.
    pub fn driver() -> Self {
        Self::from_imperial(167.0, 10.9, 0.0, 2686.0, 0.0)
    }

    /// Tour-average 7-iron: 120 mph, 16.3°, 7097 rpm.
    pub fn seven_iron() -> Self {
        Self::from_imperial(120.0, 16.3, 0.0, 7097.0, 0.0)
    }

    /// Tour-average pitching wedge: 102 mph, 24.2°, 9304 rpm.
    pub fn wedge() -> Self {
        Self::from_imperial(102.0, 24.2, 0.0, 9304.0, 0.0)
    }

    pub fn with_sidespin(mut self, sidespin: f64) -> Self {
        self.sidespin = sidespin;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_range("ball speed", self.ball_speed, 0.0, MAX_BALL_SPEED)?;
        ValidationError::check_range("launch angle", self.launch_angle_deg, -90.0, 90.0)?;
        ValidationError::check_range("launch direction", self.launch_direction_deg, -90.0, 90.0)?;
        ValidationError::check_range("backspin", self.backspin, -MAX_SPIN, MAX_SPIN)?;
        ValidationError::check_range("sidespin", self.sidespin, -MAX_SPIN, MAX_SPIN)
    }

    /// Ball state at impact: at the origin, velocity from the launch angles,
    /// backspin about the horizontal axis perpendicular to the launch
    /// direction and sidespin about the vertical.
    pub fn initial_state(&self) -> BallState {
        let theta = self.launch_angle_deg.to_radians();
        let phi = self.launch_direction_deg.to_radians();

        let vel = Vec3::new(
            self.ball_speed * theta.cos() * phi.cos(),
            self.ball_speed * theta.sin(),
            self.ball_speed * theta.cos() * phi.sin(),
        );
        let spin = Vec3::new(
            -phi.sin() * self.backspin,
            -self.sidespin,
            phi.cos() * self.backspin,
        );
        BallState::new(Vec3::ZERO, vel, spin, 0.0)
    }
}

/// Completed simulation of one shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotResult {
    pub launch: LaunchConditions,
    pub environment: EnvironmentalConditions,
    /// Name of the surface the ball landed and rolled on
    pub surface: String,

    /// Time-ordered samples from launch to rest (SI units)
    pub samples: Vec<TrajectorySample>,

    pub carry_yards: f64,
    pub total_yards: f64,
    /// Total minus carry; negative when the ball spins back
    pub roll_yards: f64,
    /// Lateral distance at rest, positive right of target
    pub offline_yards: f64,
    /// Lateral distance at first landing
    pub carry_offline_yards: f64,
    pub apex_feet: f64,
    /// Time of the apex sample (s)
    pub apex_time: f64,
    /// Time of first landing (s)
    pub flight_time: f64,
    /// Time the ball came to rest (s)
    pub total_time: f64,
    /// Descent angle at first landing (degrees)
    pub landing_angle_deg: f64,
    pub landing_speed_mph: f64,
    pub bounce_count: usize,

    /// First ground contact (m)
    pub landing_position: Vec3,
    /// Resting position (m)
    pub final_position: Vec3,
}

impl ShotResult {
    pub fn carry_meters(&self) -> f64 {
        self.landing_position.horizontal_magnitude()
    }

    pub fn total_meters(&self) -> f64 {
        self.final_position.horizontal_magnitude()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_straight_launch_state() {
        let launch = LaunchConditions::new(70.0, 10.0, 0.0, 280.0, 0.0);
        let state = launch.initial_state();

        assert_eq!(state.pos, Vec3::ZERO);
        assert_relative_eq!(state.speed(), 70.0, epsilon = 1e-9);
        assert_relative_eq!(state.vel.z, 0.0, epsilon = 1e-12);
        assert_relative_eq!(state.spin.z, 280.0, epsilon = 1e-12);
        assert_relative_eq!(state.spin.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_backspin_axis_follows_launch_direction() {
        let launch = LaunchConditions::new(60.0, 12.0, 20.0, 300.0, 0.0);
        let state = launch.initial_state();
        // Backspin axis stays horizontal and perpendicular to travel
        assert_relative_eq!(state.spin.dot(&state.vel.horizontal()), 0.0, epsilon = 1e-9);
        assert_relative_eq!(state.spin.y, 0.0, epsilon = 1e-12);
        assert!(state.vel.z > 0.0, "positive direction is right of target");
    }

    #[test]
    fn test_positive_sidespin_is_negative_vertical_spin() {
        let state = LaunchConditions::new(60.0, 12.0, 0.0, 300.0, 50.0).initial_state();
        assert_relative_eq!(state.spin.y, -50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_total_spin_split() {
        let launch = LaunchConditions::from_total_spin(70.0, 11.0, 0.0, 300.0, 30.0);
        assert_relative_eq!(launch.backspin, 300.0 * 30f64.to_radians().cos(), epsilon = 1e-9);
        assert_relative_eq!(launch.sidespin, 150.0, epsilon = 1e-9);
    }

    #[test]
    fn test_imperial_driver() {
        let driver = LaunchConditions::driver();
        assert_relative_eq!(driver.ball_speed, 74.655_68, epsilon = 1e-6);
        assert_relative_eq!(units::rad_s_to_rpm(driver.backspin), 2686.0, epsilon = 1e-9);
        assert!(driver.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let negative = LaunchConditions::new(-1.0, 10.0, 0.0, 200.0, 0.0);
        assert_eq!(negative.validate().unwrap_err().field, "ball speed");

        let nan_spin = LaunchConditions::new(60.0, 10.0, 0.0, f64::NAN, 0.0);
        assert_eq!(nan_spin.validate().unwrap_err().field, "backspin");

        let vertical = LaunchConditions::new(60.0, 95.0, 0.0, 200.0, 0.0);
        assert_eq!(vertical.validate().unwrap_err().field, "launch angle");
    }

    #[test]
    fn test_zero_spin_is_valid() {
        assert!(LaunchConditions::new(50.0, 12.0, 0.0, 0.0, 0.0).validate().is_ok());
    }
}
