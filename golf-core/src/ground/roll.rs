//! Roll-out on the turf.
//!
//! A rolling step is either *sliding* or *rolling*:
//!
//! - **Sliding** while the contact point slips. Kinetic friction `mu * g`
//!   acts against the slip, slowing (or reversing) the ball and driving the
//!   spin toward the no-slip value. Slip shrinks at `3.5 * mu * g` per
//!   second, so once one step would overshoot it the ball snaps to rolling.
//! - **Rolling** once the slip is gone: constant deceleration
//!   `max(c_rr * g, floor)` along the direction of travel, spin locked to
//!   the rolling value. Speed only decreases in this branch.

use crate::config::SimulationConfig;
use crate::surfaces::GroundSurface;
use crate::types::{constants, BallProperties, BallState, Phase, Vec3};

use super::{contact_slip, friction_spin_change, rolling_spin, GroundTransition};

/// Decay rate of spin about the vertical axis while on the ground (1/s).
pub const SIDESPIN_DECAY_RATE: f64 = 2.0;

/// Advance a ball on the ground by one time step.
pub fn roll_step(
    state: &BallState,
    props: &BallProperties,
    surface: &GroundSurface,
    config: &SimulationConfig,
    dt: f64,
) -> GroundTransition {
    let radius = props.radius;
    let vel = state.vel.horizontal();
    let spin_y = state.spin.y * (-SIDESPIN_DECAY_RATE * dt).exp();

    let slip = contact_slip(&vel, &state.spin, radius);
    let slip_speed = slip.magnitude();
    let friction_dv = surface.friction * constants::GRAVITY * dt;

    // Sliding: friction works against the slip for the whole step
    if slip_speed > 3.5 * friction_dv {
        let direction = slip / slip_speed;
        let new_vel = vel - direction * friction_dv;
        let mut spin = state.spin + friction_spin_change(&direction, friction_dv, radius);
        spin.y = spin_y;
        return GroundTransition {
            state: advance(state, new_vel, spin, dt),
            phase: Phase::Rolling,
        };
    }

    // Slip dies out within this step: remove it, then roll
    let vel = if slip_speed > constants::EPSILON {
        vel - slip * (2.0 / 7.0)
    } else {
        vel
    };

    let speed = vel.magnitude();
    let deceleration = (surface.rolling_resistance * constants::GRAVITY).max(config.min_roll_deceleration);
    let new_speed = speed - deceleration * dt;

    if new_speed < config.stop_speed {
        // Coast to rest without running past the stopping point
        let travel = if deceleration > 0.0 {
            (speed * speed / (2.0 * deceleration)).min(speed * dt)
        } else {
            speed * dt
        };
        let mut pos = state.pos + vel.normalized() * travel;
        pos.y = 0.0;
        return GroundTransition {
            state: BallState::at_rest(pos, state.time + dt),
            phase: Phase::Stopped,
        };
    }

    let new_vel = vel * (new_speed / speed);
    let spin = rolling_spin(&new_vel, spin_y, radius);
    GroundTransition {
        state: advance_avg(state, vel, new_vel, spin, dt),
        phase: Phase::Rolling,
    }
}

fn advance(state: &BallState, new_vel: Vec3, spin: Vec3, dt: f64) -> BallState {
    advance_avg(state, state.vel.horizontal(), new_vel, spin, dt)
}

/// Move with the average of the start and end velocities, pinned to the ground.
fn advance_avg(state: &BallState, start_vel: Vec3, new_vel: Vec3, spin: Vec3, dt: f64) -> BallState {
    let mut pos = state.pos + (start_vel + new_vel) * (0.5 * dt);
    pos.y = 0.0;
    BallState::new(pos, new_vel, spin, state.time + dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f64 = 0.01;

    fn run_to_rest(mut state: BallState, surface: &GroundSurface) -> (BallState, Vec<BallState>) {
        let props = BallProperties::usga();
        let config = SimulationConfig::default();
        let mut history = vec![state];
        for _ in 0..10_000 {
            let t = roll_step(&state, &props, surface, &config, DT);
            state = t.state;
            history.push(state);
            if t.phase == Phase::Stopped {
                return (state, history);
            }
        }
        panic!("ball never stopped: {:?}", state);
    }

    fn rolling_ball(vx: f64) -> BallState {
        let vel = Vec3::new(vx, 0.0, 0.0);
        BallState::new(
            Vec3::new(200.0, 0.0, 0.0),
            vel,
            rolling_spin(&vel, 0.0, BallProperties::usga().radius),
            7.0,
        )
    }

    #[test]
    fn test_pure_roll_stopping_distance() {
        let surface = GroundSurface::fairway();
        let (rest, _) = run_to_rest(rolling_ball(8.0), &surface);

        let decel = surface.rolling_resistance * constants::GRAVITY;
        let expected = 8.0 * 8.0 / (2.0 * decel);
        assert_relative_eq!(rest.pos.x - 200.0, expected, epsilon = 0.05);
        assert_eq!(rest.vel, Vec3::ZERO);
        assert_eq!(rest.pos.y, 0.0);
    }

    #[test]
    fn test_rolling_speed_never_increases() {
        let (_, history) = run_to_rest(rolling_ball(12.0), &GroundSurface::green());
        for pair in history.windows(2) {
            assert!(
                pair[1].speed() <= pair[0].speed() + 1e-12,
                "speed rose from {} to {}",
                pair[0].speed(),
                pair[1].speed()
            );
        }
    }

    #[test]
    fn test_backspin_reverses_ball_on_green() {
        // Slow forward ball with heavy backspin, as left by a wedge landing
        let start = BallState::new(
            Vec3::new(120.0, 0.0, 0.0),
            Vec3::new(2.7, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 440.0),
            5.0,
        );
        let (rest, history) = run_to_rest(start, &GroundSurface::green());

        assert!(history.iter().any(|s| s.vel.x < 0.0), "ball should spin back");
        let furthest = history.iter().map(|s| s.pos.x).fold(f64::MIN, f64::max);
        assert!(rest.pos.x < furthest, "rest {} not behind peak {}", rest.pos.x, furthest);
    }

    #[test]
    fn test_topspin_deficit_gets_spun_up() {
        // Forward ball with too little topspin slides, then rolls without slip
        let props = BallProperties::usga();
        let config = SimulationConfig::default();
        let surface = GroundSurface::fairway();
        let mut state = BallState::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO, 0.0);

        for _ in 0..200 {
            state = roll_step(&state, &props, &surface, &config, DT).state;
        }
        let slip = contact_slip(&state.vel, &state.spin, props.radius);
        assert_relative_eq!(slip.magnitude(), 0.0, epsilon = 1e-9);
        assert!(state.vel.x > 0.0);
    }

    #[test]
    fn test_sidespin_decays_on_ground() {
        let mut start = rolling_ball(5.0);
        start.spin.y = -100.0;
        let t = roll_step(
            &start,
            &BallProperties::usga(),
            &GroundSurface::fairway(),
            &SimulationConfig::default(),
            DT,
        );
        assert!(t.state.spin.y > -100.0 && t.state.spin.y < 0.0);
    }

    #[test]
    fn test_slow_ball_stops_immediately() {
        let t = roll_step(
            &rolling_ball(0.05),
            &BallProperties::usga(),
            &GroundSurface::rough(),
            &SimulationConfig::default(),
            DT,
        );
        assert_eq!(t.phase, Phase::Stopped);
        assert_eq!(t.state.spin, Vec3::ZERO);
        assert_relative_eq!(t.state.time, 7.01, epsilon = 1e-12);
    }
}
