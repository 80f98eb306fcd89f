//! Impact resolution against the turf.
//!
//! Impacts are instantaneous and the ground has infinite mass.
//!
//! ```text
//! normal:      vn' = e * vn,  e = e0 * (1 - 0.5 * angle / 90°)
//! tangential:  J   = min(mu * (1 + e) * vn,  2/7 * |u|)
//!              v'  = v - J * û
//!              w'  = (w + 2.5 J / r * (ûz, 0, -ûx)) * 0.7
//! ```
//!
//! The `2/7 |u|` bound is the impulse that exactly stops the contact point
//! from slipping; friction can never push the slip past zero.

use crate::config::SimulationConfig;
use crate::surfaces::GroundSurface;
use crate::types::{constants, BallProperties, BallState, Phase, Vec3};

use super::{contact_slip, friction_spin_change};

/// Fraction of spin that survives an impact.
pub const SPIN_RETENTION: f64 = 0.7;

/// COR lost at a vertical landing, relative to the surface value.
pub const STEEP_LANDING_COR_LOSS: f64 = 0.5;

/// Result of one bounce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceOutcome {
    pub state: BallState,
    pub phase: Phase,
    /// Angle-adjusted COR applied to this impact
    pub restitution: f64,
    /// Vertical speed leaving the ground (m/s)
    pub normal_speed_out: f64,
}

/// Descent angle below the horizontal in degrees (positive while falling).
pub fn landing_angle_deg(vel: &Vec3) -> f64 {
    (-vel.y).atan2(vel.horizontal_magnitude()).to_degrees()
}

/// Surface COR reduced for steep landings.
pub fn effective_restitution(surface_cor: f64, landing_angle_deg: f64) -> f64 {
    let steepness = landing_angle_deg.clamp(0.0, 90.0) / 90.0;
    surface_cor * (1.0 - STEEP_LANDING_COR_LOSS * steepness)
}

/// Resolve the impact of a ball at (or just touching) the ground.
///
/// `bounce_number` counts this impact, starting at 1 for the first landing.
/// The ball hops again only while it leaves faster than the configured
/// threshold and the bounce cap has not been reached; otherwise it starts
/// rolling with its vertical motion removed.
pub fn bounce(
    contact: &BallState,
    props: &BallProperties,
    surface: &GroundSurface,
    config: &SimulationConfig,
    bounce_number: usize,
) -> BounceOutcome {
    let normal_speed_in = (-contact.vel.y).max(0.0);
    let restitution = effective_restitution(surface.restitution, landing_angle_deg(&contact.vel));
    let normal_speed_out = restitution * normal_speed_in;

    let mut vel = contact.vel.horizontal();
    let mut spin = contact.spin;

    let slip = contact_slip(&vel, &spin, props.radius);
    let slip_speed = slip.magnitude();
    if slip_speed > constants::EPSILON {
        let direction = slip / slip_speed;
        let coulomb = surface.friction * (1.0 + restitution) * normal_speed_in;
        let impulse = coulomb.min(2.0 / 7.0 * slip_speed);
        vel -= direction * impulse;
        spin += friction_spin_change(&direction, impulse, props.radius);
    }
    spin = spin * SPIN_RETENTION;

    let hops = normal_speed_out > config.bounce_min_normal_speed && bounce_number < config.max_bounces;
    let (phase, height, vy) = if hops {
        (Phase::Bounce, constants::GROUND_EPSILON, normal_speed_out)
    } else {
        (Phase::Rolling, 0.0, 0.0)
    };

    let mut pos = contact.pos;
    pos.y = height;
    vel.y = vy;

    BounceOutcome {
        state: BallState::new(pos, vel, spin, contact.time),
        phase,
        restitution,
        normal_speed_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn landing(vx: f64, vy: f64, backspin: f64) -> BallState {
        BallState::new(
            Vec3::new(230.0, 0.0, 0.0),
            Vec3::new(vx, vy, 0.0),
            Vec3::new(0.0, 0.0, backspin),
            6.5,
        )
    }

    #[test]
    fn test_landing_angle() {
        assert_relative_eq!(landing_angle_deg(&Vec3::new(10.0, -10.0, 0.0)), 45.0, epsilon = 1e-9);
        assert_relative_eq!(landing_angle_deg(&Vec3::new(0.0, -5.0, 0.0)), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_steeper_landing_loses_more_energy() {
        let shallow = effective_restitution(0.4, 20.0);
        let steep = effective_restitution(0.4, 60.0);
        assert!(steep < shallow);
        assert_relative_eq!(effective_restitution(0.4, 0.0), 0.4, epsilon = 1e-12);
        assert_relative_eq!(effective_restitution(0.4, 90.0), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_driver_landing_bounces_forward() {
        let contact = landing(25.0, -20.0, 200.0);
        let outcome = bounce(
            &contact,
            &BallProperties::usga(),
            &GroundSurface::fairway(),
            &SimulationConfig::default(),
            1,
        );

        assert_eq!(outcome.phase, Phase::Bounce);
        assert_eq!(outcome.state.pos.y, constants::GROUND_EPSILON);
        assert_relative_eq!(outcome.state.vel.y, outcome.normal_speed_out, epsilon = 1e-12);
        assert!(outcome.state.vel.x > 0.0 && outcome.state.vel.x < 25.0);
        assert_eq!(outcome.state.time, contact.time);
    }

    #[test]
    fn test_friction_never_reverses_slip() {
        // Huge normal speed: the Coulomb bound exceeds the stop-slip bound
        let props = BallProperties::usga();
        let contact = landing(10.0, -40.0, 600.0);
        let outcome = bounce(
            &contact,
            &props,
            &GroundSurface::rough(),
            &SimulationConfig::default(),
            1,
        );

        // Contact point stops slipping before the spin retention factor
        let spin = outcome.state.spin * (1.0 / SPIN_RETENTION);
        let slip = contact_slip(&outcome.state.vel.horizontal(), &spin, props.radius);
        assert_relative_eq!(slip.x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_soft_landing_starts_rolling() {
        let contact = landing(6.0, -1.5, 50.0);
        let outcome = bounce(
            &contact,
            &BallProperties::usga(),
            &GroundSurface::green(),
            &SimulationConfig::default(),
            1,
        );
        assert_eq!(outcome.phase, Phase::Rolling);
        assert_eq!(outcome.state.pos.y, 0.0);
        assert_eq!(outcome.state.vel.y, 0.0);
    }

    #[test]
    fn test_bounce_cap_forces_rolling() {
        let config = SimulationConfig::default();
        let contact = landing(25.0, -20.0, 200.0);
        let outcome = bounce(
            &contact,
            &BallProperties::usga(),
            &GroundSurface::fairway(),
            &config,
            config.max_bounces,
        );
        assert!(outcome.normal_speed_out > config.bounce_min_normal_speed);
        assert_eq!(outcome.phase, Phase::Rolling);
    }

    #[test]
    fn test_spin_is_reduced() {
        let mut contact = landing(0.0, -10.0, 0.0);
        contact.spin.y = -150.0;
        let outcome = bounce(
            &contact,
            &BallProperties::usga(),
            &GroundSurface::fairway(),
            &SimulationConfig::default(),
            1,
        );
        // Vertical-axis spin produces no contact slip, so only retention applies
        assert_relative_eq!(outcome.state.spin.y, -150.0 * SPIN_RETENTION, epsilon = 1e-9);
    }
}
