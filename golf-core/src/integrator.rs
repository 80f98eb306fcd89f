//! Numerical integration of the ball's equations of motion.
//!
//! The integrator is classical 4th-order Runge-Kutta over the combined
//! position / velocity / spin state:
//!
//! ```text
//! d(pos)/dt  = vel
//! d(vel)/dt  = (gravity + drag + magnus) / mass
//! d(spin)/dt = angular_acceleration(state)
//!
//! k1 = f(t,          y)
//! k2 = f(t + dt/2,   y + k1*dt/2)
//! k3 = f(t + dt/2,   y + k2*dt/2)
//! k4 = f(t + dt,     y + k3*dt)
//! y' = y + dt/6 * (k1 + 2k2 + 2k3 + k4)
//! ```
//!
//! Ground contact is found by checking each step for a crossing of the
//! ground plane and interpolating between the two bracketing states, so the
//! landing point does not depend on where the step boundary happened to fall.

use crate::types::{BallProperties, BallState, Vec3};

/// Trait for computing forces/accelerations on the ball.
///
/// Implementations provide the physics model (gravity, drag, Magnus, etc.)
pub trait ForceModel {
    /// Compute linear acceleration given current state.
    fn linear_acceleration(&self, state: &BallState, props: &BallProperties) -> Vec3;

    /// Compute angular acceleration (spin change rate).
    /// Default implementation: spin is constant.
    fn angular_acceleration(&self, _state: &BallState, _props: &BallProperties) -> Vec3 {
        Vec3::ZERO
    }
}

/// Time derivative of a [`BallState`].
#[derive(Debug, Clone, Copy)]
struct Derivative {
    dpos: Vec3,
    dvel: Vec3,
    dspin: Vec3,
}

impl Derivative {
    fn evaluate<F: ForceModel>(state: &BallState, props: &BallProperties, forces: &F) -> Self {
        Self {
            dpos: state.vel,
            dvel: forces.linear_acceleration(state, props),
            dspin: forces.angular_acceleration(state, props),
        }
    }

    /// `state + self * h`
    fn offset(&self, state: &BallState, h: f64) -> BallState {
        BallState {
            pos: state.pos + self.dpos * h,
            vel: state.vel + self.dvel * h,
            spin: state.spin + self.dspin * h,
            time: state.time + h,
        }
    }
}

/// Classical 4th-order Runge-Kutta integrator.
pub struct RungeKutta4;

impl RungeKutta4 {
    /// Advance the ball state by one time step.
    ///
    /// # Arguments
    /// * `state` - Current ball state (position, velocity, spin, time)
    /// * `props` - Ball physical properties (mass, radius)
    /// * `forces` - Force model providing accelerations
    /// * `dt` - Time step in seconds
    pub fn step<F: ForceModel>(
        state: &BallState,
        props: &BallProperties,
        forces: &F,
        dt: f64,
    ) -> BallState {
        let half = 0.5 * dt;

        let k1 = Derivative::evaluate(state, props, forces);
        let k2 = Derivative::evaluate(&k1.offset(state, half), props, forces);
        let k3 = Derivative::evaluate(&k2.offset(state, half), props, forces);
        let k4 = Derivative::evaluate(&k3.offset(state, dt), props, forces);

        let sixth = dt / 6.0;
        BallState {
            pos: state.pos + (k1.dpos + k2.dpos * 2.0 + k3.dpos * 2.0 + k4.dpos) * sixth,
            vel: state.vel + (k1.dvel + k2.dvel * 2.0 + k3.dvel * 2.0 + k4.dvel) * sixth,
            spin: state.spin + (k1.dspin + k2.dspin * 2.0 + k3.dspin * 2.0 + k4.dspin) * sixth,
            time: state.time + dt,
        }
    }

    /// Advance the ball state by multiple substeps.
    ///
    /// Total time advanced is `substeps * dt`.
    pub fn step_n<F: ForceModel>(
        state: &BallState,
        props: &BallProperties,
        forces: &F,
        dt: f64,
        substeps: usize,
    ) -> BallState {
        (0..substeps).fold(*state, |current, _| Self::step(&current, props, forces, dt))
    }
}

/// Outcome of one airborne integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightStep {
    /// Still above the ground at the end of the step.
    Airborne(BallState),
    /// Touched down during the step; the state is the interpolated contact.
    Landed(BallState),
}

/// Advance an airborne ball one step, stopping at ground contact.
pub fn flight_step<F: ForceModel>(
    state: &BallState,
    props: &BallProperties,
    forces: &F,
    dt: f64,
) -> FlightStep {
    let next = RungeKutta4::step(state, props, forces, dt);
    match ground_crossing(state, &next) {
        Some(contact) => FlightStep::Landed(contact),
        None => FlightStep::Airborne(next),
    }
}

/// Detect a descending crossing of the ground plane between two states.
///
/// Returns the contact state linearly interpolated between `prev` and
/// `next`, with height pinned to exactly zero.
pub fn ground_crossing(prev: &BallState, next: &BallState) -> Option<BallState> {
    if prev.pos.y < 0.0 || next.pos.y > 0.0 || next.vel.y >= 0.0 {
        return None;
    }

    let drop = prev.pos.y - next.pos.y;
    let fraction = if drop > 0.0 { prev.pos.y / drop } else { 0.0 };

    let mut pos = prev.pos.lerp(&next.pos, fraction);
    pos.y = 0.0;

    Some(BallState {
        pos,
        vel: prev.vel.lerp(&next.vel, fraction),
        spin: prev.spin.lerp(&next.spin, fraction),
        time: prev.time + (next.time - prev.time) * fraction,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aerodynamics::GolfBallForces;
    use crate::types::constants::GRAVITY;
    use approx::assert_relative_eq;

    /// Simple gravity-only force model for testing
    struct GravityOnly;

    impl ForceModel for GravityOnly {
        fn linear_acceleration(&self, _state: &BallState, _props: &BallProperties) -> Vec3 {
            Vec3::new(0.0, -GRAVITY, 0.0)
        }
    }

    /// Spin decays exponentially, nothing else happens
    struct SpinDecayOnly(f64);

    impl ForceModel for SpinDecayOnly {
        fn linear_acceleration(&self, _: &BallState, _: &BallProperties) -> Vec3 {
            Vec3::ZERO
        }

        fn angular_acceleration(&self, state: &BallState, _: &BallProperties) -> Vec3 {
            state.spin * (-self.0)
        }
    }

    #[test]
    fn test_free_fall_matches_closed_form() {
        let props = BallProperties::default();
        let initial = BallState::at_rest(Vec3::new(0.0, 10.0, 0.0), 0.0);

        let state = RungeKutta4::step_n(&initial, &props, &GravityOnly, 0.01, 100);

        // RK4 is exact for constant acceleration: y = 10 - g/2 * 1²
        assert_relative_eq!(state.pos.y, 10.0 - 0.5 * GRAVITY, epsilon = 1e-9);
        assert_relative_eq!(state.vel.y, -GRAVITY, epsilon = 1e-9);
        assert_relative_eq!(state.time, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_spin_decay_is_fourth_order_accurate() {
        let props = BallProperties::default();
        let initial = BallState::new(Vec3::ZERO, Vec3::ZERO, Vec3::new(0.0, 0.0, 300.0), 0.0);
        let rate = 0.5;

        let state = RungeKutta4::step_n(&initial, &props, &SpinDecayOnly(rate), 0.01, 400);

        let expected = 300.0 * (-rate * 4.0_f64).exp();
        assert_relative_eq!(state.spin.z, expected, epsilon = 1e-8);
    }

    #[test]
    fn test_horizontal_motion() {
        struct NoForces;
        impl ForceModel for NoForces {
            fn linear_acceleration(&self, _: &BallState, _: &BallProperties) -> Vec3 {
                Vec3::ZERO
            }
        }

        let props = BallProperties::default();
        let initial = BallState::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO, 0.0);
        let result = RungeKutta4::step(&initial, &props, &NoForces, 1.0);

        assert_relative_eq!(result.pos.x, 10.0, epsilon = 1e-12);
        assert_relative_eq!(result.vel.x, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vacuum_landing_is_interpolated() {
        // 20 m/s at 45 degrees in a vacuum: range v² sin(2θ) / g
        let props = BallProperties::default();
        let forces = GolfBallForces::gravity_only();
        let speed = 20.0;
        let angle = 45.0_f64.to_radians();
        let mut state = BallState::new(
            Vec3::ZERO,
            Vec3::new(speed * angle.cos(), speed * angle.sin(), 0.0),
            Vec3::ZERO,
            0.0,
        );

        let contact = loop {
            match flight_step(&state, &props, &forces, 0.01) {
                FlightStep::Airborne(next) => state = next,
                FlightStep::Landed(contact) => break contact,
            }
        };

        let range = speed * speed / GRAVITY;
        let flight_time = 2.0 * speed * angle.sin() / GRAVITY;
        assert_relative_eq!(contact.pos.x, range, epsilon = 1e-3);
        assert_relative_eq!(contact.time, flight_time, epsilon = 1e-4);
        assert_eq!(contact.pos.y, 0.0);
        assert!(contact.vel.y < 0.0);
    }

    #[test]
    fn test_no_crossing_while_rising() {
        let prev = BallState::new(Vec3::ZERO, Vec3::new(1.0, 5.0, 0.0), Vec3::ZERO, 0.0);
        let next = BallState::new(Vec3::new(0.01, 0.05, 0.0), Vec3::new(1.0, 4.9, 0.0), Vec3::ZERO, 0.01);
        assert!(ground_crossing(&prev, &next).is_none());
    }

    #[test]
    fn test_crossing_from_ground_level_lands_immediately() {
        // A zero-launch-angle ball sinks below the plane in its first step
        let prev = BallState::new(Vec3::ZERO, Vec3::new(30.0, 0.0, 0.0), Vec3::ZERO, 0.0);
        let next = BallState::new(
            Vec3::new(0.3, -0.0005, 0.0),
            Vec3::new(30.0, -0.1, 0.0),
            Vec3::ZERO,
            0.01,
        );
        let contact = ground_crossing(&prev, &next).expect("should land");
        assert_eq!(contact.time, 0.0);
        assert_eq!(contact.pos, Vec3::ZERO);
    }
}
