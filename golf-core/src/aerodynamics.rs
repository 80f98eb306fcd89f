//! Aerodynamic forces acting on a golf ball in flight.
//!
//! This module implements the `ForceModel` trait for ball flight:
//!
//! - **Gravity**: Constant downward acceleration
//! - **Drag**: Opposes motion relative to the air, proportional to v²
//! - **Magnus**: Lift from backspin (and curve from sidespin)
//!
//! Both coefficients come from piecewise-linear tables:
//!
//! ```text
//! Cd(Re)   dimpled-ball drag crisis between Re = 0.375e5 and 1.0e5,
//!          constant 0.21 once the boundary layer is turbulent
//! Cl(S)    rises steeply at low spin factor, saturates near S = 0.55
//! ```
//!
//! The spin factor `S = r * |w| / |v|` also adds a small spin-drag
//! increment, which is what keeps high-spin iron shots from ballooning.

use crate::atmosphere::Atmosphere;
use crate::integrator::ForceModel;
use crate::types::{constants, BallProperties, BallState, Vec3};

/// Reynolds number above which the boundary layer is fully turbulent.
pub const TRANSITION_REYNOLDS: f64 = 1.0e5;

/// Drag coefficient in the supercritical regime.
pub const SUPERCRITICAL_DRAG: f64 = 0.21;

/// Drag coefficient vs Reynolds number.
pub static DRAG_TABLE: [(f64, f64); 6] = [
    (0.375e5, 0.46),
    (0.500e5, 0.41),
    (0.625e5, 0.35),
    (0.750e5, 0.29),
    (0.875e5, 0.24),
    (1.000e5, SUPERCRITICAL_DRAG),
];

/// Lift coefficient vs spin factor.
pub static LIFT_TABLE: [(f64, f64); 12] = [
    (0.00, 0.000),
    (0.05, 0.100),
    (0.10, 0.160),
    (0.15, 0.200),
    (0.20, 0.229),
    (0.25, 0.250),
    (0.30, 0.267),
    (0.35, 0.280),
    (0.40, 0.291),
    (0.45, 0.300),
    (0.50, 0.308),
    (0.55, 0.314),
];

/// Upper edge of the lift table; spin factors beyond it clamp here.
pub const MAX_SPIN_FACTOR: f64 = 0.55;

/// Extra drag per unit spin factor.
pub const SPIN_DRAG_FACTOR: f64 = 0.2;

/// Exponential in-flight spin decay rate (1/s), about 15% over a drive.
pub const SPIN_DECAY_RATE: f64 = 0.025;

/// Piecewise-linear lookup, clamped to the first/last entry.
fn interpolate(table: &[(f64, f64)], x: f64) -> f64 {
    let (first_x, first_y) = table[0];
    if x <= first_x {
        return first_y;
    }
    for pair in table.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x <= x1 {
            return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
        }
    }
    table[table.len() - 1].1
}

/// Drag coefficient for a Reynolds number.
pub fn drag_coefficient(reynolds: f64) -> f64 {
    if reynolds >= TRANSITION_REYNOLDS {
        return SUPERCRITICAL_DRAG;
    }
    interpolate(&DRAG_TABLE, reynolds)
}

/// Lift coefficient for a spin factor.
pub fn lift_coefficient(spin_factor: f64) -> f64 {
    interpolate(&LIFT_TABLE, spin_factor)
}

/// Reynolds number `rho * v * D / mu`.
pub fn reynolds_number(speed: f64, density: f64, viscosity: f64, diameter: f64) -> f64 {
    density * speed * diameter / viscosity
}

/// Spin factor `r * w / v`, zero when the ball is not moving through the air.
pub fn spin_factor(radius: f64, spin_rate: f64, speed: f64) -> f64 {
    if speed < constants::EPSILON {
        return 0.0;
    }
    radius * spin_rate / speed
}

/// Drag force for a velocity relative to the air.
///
/// F_drag = -0.5 * rho * Cd * A * |v|² * v̂
pub fn drag_force(velocity: Vec3, density: f64, cd: f64, area: f64) -> Vec3 {
    let speed_sq = velocity.magnitude_squared();
    if speed_sq < constants::EPSILON {
        return Vec3::ZERO;
    }
    velocity.normalized() * (-0.5 * density * cd * area * speed_sq)
}

/// Magnus force for a velocity relative to the air.
///
/// F_magnus = 0.5 * rho * Cl * A * |v|² * (ŵ × v̂)
pub fn magnus_force(velocity: Vec3, spin: Vec3, density: f64, cl: f64, area: f64) -> Vec3 {
    let speed_sq = velocity.magnitude_squared();
    if speed_sq < constants::EPSILON || spin.magnitude_squared() < constants::EPSILON {
        return Vec3::ZERO;
    }
    // Zero when spin is parallel to velocity (pure rifle spin)
    let direction = spin.cross(&velocity).normalized();
    direction * (0.5 * density * cl * area * speed_sq)
}

/// Complete force model for golf ball flight.
///
/// Combines gravity, aerodynamic drag and the Magnus effect, all computed
/// against the airspeed (ball velocity minus wind at the ball's height).
#[derive(Debug, Clone)]
pub struct GolfBallForces {
    pub atmosphere: Atmosphere,

    /// Gravity vector (default: -9.80665 in Y)
    pub gravity: Vec3,

    /// Spin decay rate (1/s)
    pub spin_decay_rate: f64,

    /// Enable/disable individual forces (useful for testing)
    pub enable_drag: bool,
    pub enable_magnus: bool,
}

impl Default for GolfBallForces {
    fn default() -> Self {
        Self::new(Atmosphere::default())
    }
}

impl GolfBallForces {
    pub fn new(atmosphere: Atmosphere) -> Self {
        Self {
            atmosphere,
            gravity: Vec3::new(0.0, -constants::GRAVITY, 0.0),
            spin_decay_rate: SPIN_DECAY_RATE,
            enable_drag: true,
            enable_magnus: true,
        }
    }

    /// Gravity only: a vacuum trajectory (for testing).
    pub fn gravity_only() -> Self {
        Self {
            enable_drag: false,
            enable_magnus: false,
            ..Self::default()
        }
    }

    /// Total aerodynamic force (drag + Magnus) on the ball.
    pub fn aerodynamic_force(&self, state: &BallState, props: &BallProperties) -> Vec3 {
        let airspeed = state.vel - self.atmosphere.wind_at(state.pos.y);
        let speed = airspeed.magnitude();
        if speed < constants::EPSILON {
            return Vec3::ZERO;
        }

        let area = props.area();
        let s = spin_factor(props.radius, state.spin_rate(), speed);
        let mut force = Vec3::ZERO;

        if self.enable_drag {
            let re = reynolds_number(
                speed,
                self.atmosphere.density,
                self.atmosphere.viscosity,
                props.diameter(),
            );
            let cd = drag_coefficient(re) + SPIN_DRAG_FACTOR * s.min(MAX_SPIN_FACTOR);
            force += drag_force(airspeed, self.atmosphere.density, cd, area);
        }

        if self.enable_magnus {
            force += magnus_force(
                airspeed,
                state.spin,
                self.atmosphere.density,
                lift_coefficient(s),
                area,
            );
        }

        force
    }
}

impl ForceModel for GolfBallForces {
    fn linear_acceleration(&self, state: &BallState, props: &BallProperties) -> Vec3 {
        self.gravity + self.aerodynamic_force(state, props) / props.mass
    }

    fn angular_acceleration(&self, state: &BallState, _props: &BallProperties) -> Vec3 {
        state.spin * (-self.spin_decay_rate)
    }
}

// =============================================================================
// Tests
// =============================================================================
