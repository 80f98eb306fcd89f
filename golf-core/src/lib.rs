//! # Golf Core
//!
//! A deterministic golf ball-flight engine: launch-monitor measurements in,
//! full flight, bounce and roll-out trajectory out.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec3, ball state, phases, samples)
//! - `units`: Launch-monitor unit conversions
//! - `atmosphere`: Air density, viscosity and wind profile
//! - `aerodynamics`: Drag/lift tables, drag and Magnus forces
//! - `integrator`: RK4 integration and ground-contact detection
//! - `ground`: Bounce and roll state transitions
//! - `surfaces`: Turf presets and YAML surface loader
//! - `config`: Step sizes, sampling and runaway caps
//! - `shot`: Launch conditions and shot result
//! - `simulation`: Main orchestrator
//!
//! ## Example
//!
//! ```
//! use golf_core::{simulate, EnvironmentalConditions, LaunchConditions};
//!
//! let launch = LaunchConditions::from_imperial(167.0, 10.9, 0.0, 2686.0, 0.0);
//! let shot = simulate(&launch, &EnvironmentalConditions::standard()).unwrap();
//! assert!(shot.carry_yards > 250.0);
//! ```

pub mod aerodynamics;
pub mod atmosphere;
pub mod config;
pub mod error;
pub mod ground;
pub mod integrator;
pub mod shot;
pub mod simulation;
pub mod surfaces;
pub mod types;
pub mod units;

pub use atmosphere::{Atmosphere, EnvironmentalConditions, Wind};
pub use config::SimulationConfig;
pub use error::{Result, SimulationError, ValidationError};
pub use shot::{LaunchConditions, ShotResult};
pub use simulation::{simulate, Simulator};
pub use surfaces::{GroundSurface, SurfaceError, SurfaceLoader};
pub use types::{BallProperties, BallState, Phase, TrajectorySample, Vec3};
