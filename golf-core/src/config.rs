//! Simulation tuning parameters.
//!
//! Defaults reproduce the reference trajectories; a YAML document can
//! override any subset of them:
//!
//! ```yaml
//! time_step: 0.005
//! max_bounces: 3
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Step sizes, sampling cadence and the runaway caps of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Integration step (s)
    pub time_step: f64,
    /// Spacing of stored trajectory samples (s)
    pub sample_interval: f64,
    /// Sample buffer cap; hitting it halves the sampling rate
    pub max_samples: usize,
    /// Airborne time before a shot counts as runaway (s)
    pub max_airborne_time: f64,
    /// Total simulated time cap (s)
    pub max_total_time: f64,
    pub max_steps: usize,
    pub max_bounces: usize,
    /// A bounce leaving slower than this (m/s, normal component) starts the roll
    pub bounce_min_normal_speed: f64,
    /// Rolling speed below which the ball is stopped (m/s)
    pub stop_speed: f64,
    /// Floor on the rolling deceleration (m/s²)
    pub min_roll_deceleration: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: 0.01,
            sample_interval: 0.05,
            max_samples: 600,
            max_airborne_time: 30.0,
            max_total_time: 120.0,
            max_steps: 100_000,
            max_bounces: 5,
            bounce_min_normal_speed: 1.0,
            stop_speed: 0.1,
            min_roll_deceleration: 0.25,
        }
    }
}

impl SimulationConfig {
    /// Parse a YAML document; keys that are absent keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|err| SimulationError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("time_step", self.time_step),
            ("sample_interval", self.sample_interval),
            ("max_airborne_time", self.max_airborne_time),
            ("max_total_time", self.max_total_time),
            ("stop_speed", self.stop_speed),
            ("min_roll_deceleration", self.min_roll_deceleration),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        if !(self.bounce_min_normal_speed.is_finite() && self.bounce_min_normal_speed >= 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "bounce_min_normal_speed must be non-negative, got {}",
                self.bounce_min_normal_speed
            )));
        }
        if self.sample_interval < self.time_step {
            return Err(SimulationError::InvalidConfig(format!(
                "sample_interval {} is shorter than time_step {}",
                self.sample_interval, self.time_step
            )));
        }

        let caps = [
            ("max_samples", self.max_samples),
            ("max_steps", self.max_steps),
            ("max_bounces", self.max_bounces),
        ];
        for (name, value) in caps {
            if value == 0 {
                return Err(SimulationError::InvalidConfig(format!("{} must be at least 1", name)));
            }
        }
        if self.max_samples < 2 {
            return Err(SimulationError::InvalidConfig(
                "max_samples must hold at least the launch and rest points".to_string(),
            ));
        }
        Ok(())
    }
}
