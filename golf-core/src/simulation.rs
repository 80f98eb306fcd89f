//! Shot orchestration: flight, bounces, roll-out and the result summary.
//!
//! ```text
//!   Flight ──contact──▶ bounce() ──hop──▶ Bounce ──contact──▶ bounce() ...
//!                          │                                     │
//!                          └──────────── settles ────────────────┴──▶ Rolling ──▶ Stopped
//! ```
//!
//! Every integration step runs at `time_step`; samples are stored every
//! `sample_interval`, plus one sample at each ground contact and one at rest.

use tracing::{debug, trace, warn};

use crate::aerodynamics::GolfBallForces;
use crate::atmosphere::{Atmosphere, EnvironmentalConditions};
use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::ground::{self, GroundTransition};
use crate::integrator::{flight_step, FlightStep};
use crate::shot::{LaunchConditions, ShotResult};
use crate::surfaces::GroundSurface;
use crate::types::{BallProperties, BallState, Phase, TrajectorySample};
use crate::units;

/// Tolerance when comparing sample times against the sampling schedule.
const SAMPLE_TIME_TOLERANCE: f64 = 1e-9;

/// Configured simulator for a surface and ball.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
    surface: GroundSurface,
    ball: BallProperties,
}

impl Default for Simulator {
    fn default() -> Self {
        Self {
            config: SimulationConfig::default(),
            surface: GroundSurface::fairway(),
            ball: BallProperties::usga(),
        }
    }
}

impl Simulator {
    pub fn new(config: SimulationConfig, surface: GroundSurface) -> Result<Self> {
        config.validate()?;
        surface.validate()?;
        Ok(Self {
            config,
            surface,
            ball: BallProperties::usga(),
        })
    }

    /// Default configuration on the given surface.
    pub fn with_surface(surface: GroundSurface) -> Result<Self> {
        Self::new(SimulationConfig::default(), surface)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn surface(&self) -> &GroundSurface {
        &self.surface
    }

    pub fn ball(&self) -> &BallProperties {
        &self.ball
    }

    /// Simulate a shot from launch until the ball is at rest.
    pub fn simulate(
        &self,
        launch: &LaunchConditions,
        environment: &EnvironmentalConditions,
    ) -> Result<ShotResult> {
        launch.validate()?;
        environment.validate()?;

        let cfg = &self.config;
        let dt = cfg.time_step;
        let atmosphere = Atmosphere::from_conditions(environment);
        let forces = GolfBallForces::new(atmosphere);

        let mut state = launch.initial_state();
        let mut phase = Phase::Flight;
        let mut sampler = Sampler::new(cfg.sample_interval, cfg.max_samples);
        sampler.record(&state, phase);

        debug!(
            ball_speed = launch.ball_speed,
            launch_angle = launch.launch_angle_deg,
            spin_rate = state.spin_rate(),
            air_density = atmosphere.density,
            surface = %self.surface.name,
            "starting shot simulation"
        );

        let mut steps = 0usize;
        let mut airborne_time = 0.0;
        let mut bounce_count = 0usize;
        let mut landing: Option<BallState> = None;

        while !phase.is_terminal() {
            if steps >= cfg.max_steps {
                return Err(not_converged(phase, steps, &state, "step limit exceeded"));
            }
            if state.time > cfg.max_total_time {
                return Err(not_converged(phase, steps, &state, "total time limit exceeded"));
            }
            if !state.is_finite() {
                return Err(not_converged(phase, steps, &state, "state became non-finite"));
            }
            steps += 1;

            if phase.is_airborne() {
                if airborne_time > cfg.max_airborne_time {
                    return Err(not_converged(phase, steps, &state, "airborne time limit exceeded"));
                }

                match flight_step(&state, &self.ball, &forces, dt) {
                    FlightStep::Airborne(next) => {
                        airborne_time += next.time - state.time;
                        state = next;
                        sampler.record(&state, phase);
                    }
                    FlightStep::Landed(contact) => {
                        airborne_time += contact.time - state.time;
                        sampler.force(&contact, phase);

                        if landing.is_none() {
                            debug!(
                                carry_m = contact.ground_distance(),
                                landing_angle = ground::landing_angle_deg(&contact.vel),
                                flight_time = contact.time,
                                "ball landed"
                            );
                            landing = Some(contact);
                        }

                        bounce_count += 1;
                        let outcome =
                            ground::bounce(&contact, &self.ball, &self.surface, cfg, bounce_count);
                        trace!(
                            bounce = bounce_count,
                            restitution = outcome.restitution,
                            normal_speed_out = outcome.normal_speed_out,
                            "bounce"
                        );
                        if outcome.phase == Phase::Rolling {
                            debug!(speed = outcome.state.speed(), time = contact.time, "rolling");
                        }
                        state = outcome.state;
                        phase = outcome.phase;
                    }
                }
            } else {
                let GroundTransition { state: next, phase: next_phase } =
                    ground::roll_step(&state, &self.ball, &self.surface, cfg, dt);
                state = next;
                phase = next_phase;
                if phase.is_terminal() {
                    sampler.force(&state, phase);
                } else {
                    sampler.record(&state, phase);
                }
            }
        }

        // Stopped is only reachable through a landing
        let landing = landing.unwrap_or(state);
        let samples = sampler.finish();
        let (apex_height, apex_time) = samples
            .iter()
            .map(|s| (s.pos.y, s.time))
            .fold((0.0, 0.0), |best, cur| if cur.0 > best.0 { cur } else { best });

        let carry = landing.ground_distance();
        let total = state.ground_distance();

        debug!(
            carry_m = carry,
            total_m = total,
            bounces = bounce_count,
            samples = samples.len(),
            steps,
            "shot complete"
        );

        Ok(ShotResult {
            launch: *launch,
            environment: *environment,
            surface: self.surface.name.clone(),
            samples,
            carry_yards: units::meters_to_yards(carry),
            total_yards: units::meters_to_yards(total),
            roll_yards: units::meters_to_yards(total - carry),
            offline_yards: units::meters_to_yards(state.pos.z),
            carry_offline_yards: units::meters_to_yards(landing.pos.z),
            apex_feet: units::meters_to_feet(apex_height),
            apex_time,
            flight_time: landing.time,
            total_time: state.time,
            landing_angle_deg: ground::landing_angle_deg(&landing.vel),
            landing_speed_mph: units::mps_to_mph(landing.speed()),
            bounce_count,
            landing_position: landing.pos,
            final_position: state.pos,
        })
    }
}

/// Simulate a shot on the fairway with the default configuration.
pub fn simulate(launch: &LaunchConditions, environment: &EnvironmentalConditions) -> Result<ShotResult> {
    Simulator::default().simulate(launch, environment)
}

fn not_converged(phase: Phase, steps: usize, state: &BallState, reason: &'static str) -> SimulationError {
    SimulationError::NotConverged {
        phase,
        steps,
        elapsed_s: state.time,
        reason,
    }
}

// =============================================================================
// Sampling
// =============================================================================

/// Fixed-cadence sample buffer with a hard size cap.
///
/// When the cap is hit the buffer keeps every other sample and the cadence
/// doubles, so the stored points always span the whole shot.
struct Sampler {
    samples: Vec<TrajectorySample>,
    interval: f64,
    next_time: f64,
    capacity: usize,
}

impl Sampler {
    fn new(interval: f64, capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            interval,
            next_time: 0.0,
            capacity,
        }
    }

    /// Store the state if it is due on the sampling schedule.
    fn record(&mut self, state: &BallState, phase: Phase) {
        if state.time + SAMPLE_TIME_TOLERANCE < self.next_time {
            return;
        }
        self.push(TrajectorySample::from_state(state, phase));
        while self.next_time <= state.time + SAMPLE_TIME_TOLERANCE {
            self.next_time += self.interval;
        }
    }

    /// Store the state regardless of the schedule (contacts, rest).
    fn force(&mut self, state: &BallState, phase: Phase) {
        self.push(TrajectorySample::from_state(state, phase));
    }

    fn push(&mut self, sample: TrajectorySample) {
        if let Some(last) = self.samples.last() {
            if sample.time <= last.time {
                return;
            }
        }
        if self.samples.len() >= self.capacity {
            self.decimate();
        }
        self.samples.push(sample);
    }

    fn decimate(&mut self) {
        let mut index = 0;
        self.samples.retain(|_| {
            let keep = index % 2 == 0;
            index += 1;
            keep
        });
        self.interval *= 2.0;
        if let Some(last) = self.samples.last() {
            self.next_time = self.next_time.max(last.time + self.interval);
        }
        warn!(
            kept = self.samples.len(),
            interval = self.interval,
            "sample buffer full, halving sample rate"
        );
    }

    fn finish(self) -> Vec<TrajectorySample> {
        self.samples
    }
}
