//! Ground interaction: bounce and roll.
//!
//! Each call is a pure transition `(state, surface, config) -> (state', phase')`:
//!
//! - [`bounce`] resolves one impact. The ball either hops again
//!   ([`Phase::Bounce`]) or settles into [`Phase::Rolling`].
//! - [`roll_step`] advances a rolling ball by one time step until it reports
//!   [`Phase::Stopped`].
//!
//! Both use the contact-point slip velocity `u = v + w x r_c`, with
//! `r_c = (0, -r, 0)` from the ball center to the contact point:
//!
//! ```text
//! u = (vx + r*wz, 0, vz - r*wx)
//! ```
//!
//! Friction always acts against `u`. It brakes a ball carrying backspin
//! harder than one carrying topspin, and can send it backwards.

pub mod bounce;
pub mod roll;

pub use bounce::{bounce, effective_restitution, landing_angle_deg, BounceOutcome};
pub use roll::roll_step;

use crate::types::{BallState, Phase, Vec3};

/// New ball state and the phase it is in after a ground transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundTransition {
    pub state: BallState,
    pub phase: Phase,
}

/// Slip velocity of the contact point (horizontal).
pub fn contact_slip(vel: &Vec3, spin: &Vec3, radius: f64) -> Vec3 {
    Vec3::new(vel.x + radius * spin.z, 0.0, vel.z - radius * spin.x)
}

/// Spin change per unit mass of a horizontal friction impulse
/// `-magnitude * direction` applied at the contact point.
///
/// For a solid sphere `m / I = 2.5 / r²`, so `dw = 2.5 / r * (dz, 0, -dx)`
/// times the impulse magnitude.
pub(crate) fn friction_spin_change(direction: &Vec3, magnitude: f64, radius: f64) -> Vec3 {
    Vec3::new(direction.z, 0.0, -direction.x) * (2.5 * magnitude / radius)
}

/// Spin of a ball rolling without slip at the given horizontal velocity,
/// keeping the vertical (sidespin) component.
pub(crate) fn rolling_spin(vel: &Vec3, spin_y: f64, radius: f64) -> Vec3 {
    Vec3::new(vel.z / radius, spin_y, -vel.x / radius)
}
