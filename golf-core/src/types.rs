//! Core types for the ball-flight simulation.
//!
//! All units are SI:
//! - Position: meters (m)
//! - Velocity: meters per second (m/s)
//! - Spin (angular velocity): radians per second (rad/s)
//! - Mass: kilograms (kg)
//! - Time: seconds (s)
//!
//! Conversion to yards/feet/rpm happens only at the boundary (see `units`).

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

// =============================================================================
// Vec3 - 3D Vector
// =============================================================================

/// A 3D vector used for positions, velocities, forces, and spin.
///
/// Coordinate system (right-handed):
/// - X: horizontal, along the target line (positive downrange)
/// - Y: vertical (positive upward)
/// - Z: horizontal, lateral (positive to the right of the target line)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude_squared(&self) -> f64 {
        self.dot(self)
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Unit vector in the same direction, or zero for a (near) zero vector.
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < constants::EPSILON {
            Self::ZERO
        } else {
            *self / mag
        }
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        *self + (*other - *self) * t
    }

    /// Ground-plane projection (Y dropped).
    pub fn horizontal(&self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }

    /// Length of the ground-plane projection.
    pub fn horizontal_magnitude(&self) -> f64 {
        self.x.hypot(self.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

macro_rules! impl_vec3_binop {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait for Vec3 {
            type Output = Self;
            fn $method(self, rhs: Self) -> Self {
                Self::new(self.x $op rhs.x, self.y $op rhs.y, self.z $op rhs.z)
            }
        }

        impl $assign_trait for Vec3 {
            fn $assign_method(&mut self, rhs: Self) {
                *self = *self $op rhs;
            }
        }
    };
}

impl_vec3_binop!(Add, add, AddAssign, add_assign, +);
impl_vec3_binop!(Sub, sub, SubAssign, sub_assign, -);

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        self * -1.0
    }
}

// =============================================================================
// Ball
// =============================================================================

/// Physical properties of a golf ball.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallProperties {
    pub mass: f64,
    pub radius: f64,
}

impl BallProperties {
    /// USGA conforming ball: 45.93 g maximum mass, 42.67 mm minimum diameter.
    pub const fn usga() -> Self {
        Self {
            mass: constants::BALL_MASS,
            radius: constants::BALL_RADIUS,
        }
    }

    pub fn diameter(&self) -> f64 {
        2.0 * self.radius
    }

    /// Cross-sectional area (πr²)
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// Moment of inertia treating the ball as a solid sphere: I = (2/5) m r²
    pub fn moment_of_inertia(&self) -> f64 {
        0.4 * self.mass * self.radius * self.radius
    }
}

impl Default for BallProperties {
    fn default() -> Self {
        Self::usga()
    }
}

/// Complete state of the ball at a given instant.
///
/// The spin vector encodes both the axis and magnitude of rotation
/// (right-hand rule). For a ball travelling along +X:
/// - Backspin: spin.z > 0 (Magnus lifts the ball)
/// - Sidespin that curves right: spin.y < 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub pos: Vec3,
    pub vel: Vec3,
    pub spin: Vec3,
    pub time: f64,
}

impl BallState {
    pub fn new(pos: Vec3, vel: Vec3, spin: Vec3, time: f64) -> Self {
        Self {
            pos,
            vel,
            spin,
            time,
        }
    }

    /// Ball at rest at a given position
    pub fn at_rest(pos: Vec3, time: f64) -> Self {
        Self::new(pos, Vec3::ZERO, Vec3::ZERO, time)
    }

    pub fn speed(&self) -> f64 {
        self.vel.magnitude()
    }

    /// Spin rate in rad/s.
    pub fn spin_rate(&self) -> f64 {
        self.spin.magnitude()
    }

    /// Unit spin axis, zero when the ball is not spinning.
    pub fn spin_axis(&self) -> Vec3 {
        self.spin.normalized()
    }

    /// Horizontal distance from the launch point.
    pub fn ground_distance(&self) -> f64 {
        self.pos.horizontal_magnitude()
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite() && self.spin.is_finite() && self.time.is_finite()
    }
}

// =============================================================================
// Phase
// =============================================================================

/// Motion phase of the ball. Transitions only move forward:
/// `Flight -> Bounce (repeatable) -> Rolling -> Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    Flight,
    Bounce,
    Rolling,
    Stopped,
}

impl Phase {
    /// Flight and the hops between bounces are integrated with the full
    /// aerodynamic force model.
    pub fn is_airborne(&self) -> bool {
        matches!(self, Phase::Flight | Phase::Bounce)
    }

    pub fn is_terminal(&self) -> bool {
        *self == Phase::Stopped
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Flight => "flight",
            Phase::Bounce => "bounce",
            Phase::Rolling => "rolling",
            Phase::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Trajectory Sample
// =============================================================================

/// Stored point of the trajectory, produced at the sampling cadence for
/// downstream rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub time: f64,
    pub pos: Vec3,
    pub vel: Vec3,
    pub phase: Phase,
}

impl TrajectorySample {
    pub fn from_state(state: &BallState, phase: Phase) -> Self {
        Self {
            time: state.time,
            pos: state.pos,
            vel: state.vel,
            phase,
        }
    }
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Physical constants used in the simulation.
pub mod constants {
    /// Standard gravitational acceleration (m/s²)
    pub const GRAVITY: f64 = 9.80665;

    /// Maximum USGA ball mass (kg)
    pub const BALL_MASS: f64 = 0.04593;

    /// Minimum USGA ball radius (m), 42.67 mm diameter
    pub const BALL_RADIUS: f64 = 0.021335;

    /// Height above the ground a ball is placed at after a bounce, so the
    /// next airborne step does not immediately re-detect contact (m)
    pub const GROUND_EPSILON: f64 = 1.0e-4;

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a - b, Vec3::new(-3.0, -3.0, -3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(a.dot(&b), 32.0);

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn test_backspin_axis_cross_forward_is_up() {
        // Backspin on a ball travelling downrange lifts it: Z x X = Y
        let lift = Vec3::new(0.0, 0.0, 1.0).cross(&Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(lift.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(lift.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_horizontal_projection() {
        let v = Vec3::new(3.0, 7.0, 4.0);
        assert_eq!(v.horizontal(), Vec3::new(3.0, 0.0, 4.0));
        assert_relative_eq!(v.horizontal_magnitude(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_vector_normalizes_to_zero() {
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
    }

    #[test]
    fn test_ball_properties() {
        let ball = BallProperties::usga();
        assert_relative_eq!(ball.diameter(), 0.04267, epsilon = 1e-9);
        assert_relative_eq!(ball.area(), 1.43e-3, epsilon = 1e-5);
        assert!(ball.moment_of_inertia() > 0.0);
    }

    #[test]
    fn test_phase_ordering_moves_forward() {
        assert!(Phase::Flight < Phase::Bounce);
        assert!(Phase::Bounce < Phase::Rolling);
        assert!(Phase::Rolling < Phase::Stopped);
        assert!(Phase::Stopped.is_terminal());
        assert!(Phase::Bounce.is_airborne());
        assert!(!Phase::Rolling.is_airborne());
    }

    #[test]
    fn test_spin_axis_and_rate() {
        let state = BallState::new(Vec3::ZERO, Vec3::ZERO, Vec3::new(0.0, 0.0, 300.0), 0.0);
        assert_relative_eq!(state.spin_rate(), 300.0, epsilon = 1e-12);
        assert_eq!(state.spin_axis(), Vec3::new(0.0, 0.0, 1.0));
    }
}
