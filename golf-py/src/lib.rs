//! Python bindings for the golf-core ball-flight engine.
//!
//! Provides a simple Python API:
//!
//! ```python
//! from golf_physics import simulate_shot
//!
//! shot = simulate_shot(167.0, 10.9, 0.0, 2686.0, 0.0, surface="fairway")
//! print(f"carry {shot.carry_yards:.1} yd, total {shot.total_yards:.1} yd")
//!
//! for t, x, y, z, phase in shot.trajectory():
//!     print(t, x, y, z, phase)
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use golf_core::surfaces::PRESET_NAMES;
use golf_core::{
    EnvironmentalConditions, GroundSurface, LaunchConditions, ShotResult, SimulationConfig,
    SimulationError, Simulator, Wind,
};

fn to_py_err(err: SimulationError) -> PyErr {
    match err {
        SimulationError::InvalidInput(_) | SimulationError::InvalidConfig(_) => {
            PyValueError::new_err(err.to_string())
        }
        SimulationError::NotConverged { .. } => PyRuntimeError::new_err(err.to_string()),
    }
}

/// Result of a simulated shot.
///
/// Summary values are in yards, feet, degrees and seconds.
#[pyclass(frozen)]
pub struct Shot {
    result: ShotResult,
}

#[pymethods]
impl Shot {
    #[getter]
    fn carry_yards(&self) -> f64 {
        self.result.carry_yards
    }

    #[getter]
    fn total_yards(&self) -> f64 {
        self.result.total_yards
    }

    #[getter]
    fn roll_yards(&self) -> f64 {
        self.result.roll_yards
    }

    /// Lateral distance at rest (positive = right of target).
    #[getter]
    fn offline_yards(&self) -> f64 {
        self.result.offline_yards
    }

    #[getter]
    fn carry_offline_yards(&self) -> f64 {
        self.result.carry_offline_yards
    }

    #[getter]
    fn apex_feet(&self) -> f64 {
        self.result.apex_feet
    }

    #[getter]
    fn apex_time(&self) -> f64 {
        self.result.apex_time
    }

    #[getter]
    fn flight_time(&self) -> f64 {
        self.result.flight_time
    }

    /// Descent angle at first landing in degrees.
    #[getter]
    fn landing_angle(&self) -> f64 {
        self.result.landing_angle_deg
    }

    #[getter]
    fn bounce_count(&self) -> usize {
        self.result.bounce_count
    }

    #[getter]
    fn surface(&self) -> String {
        self.result.surface.clone()
    }

    /// Trajectory samples as `(t, x, y, z, phase)` tuples in meters.
    fn trajectory(&self) -> Vec<(f64, f64, f64, f64, &'static str)> {
        self.result
            .samples
            .iter()
            .map(|s| (s.time, s.pos.x, s.pos.y, s.pos.z, s.phase.as_str()))
            .collect()
    }

    /// Get the summary as a dict for easy inspection.
    fn summary_dict(&self) -> PyResult<PyObject> {
        Python::with_gil(|py| {
            let r = &self.result;
            let dict = pyo3::types::PyDict::new(py);
            dict.set_item("carry_yards", r.carry_yards)?;
            dict.set_item("total_yards", r.total_yards)?;
            dict.set_item("roll_yards", r.roll_yards)?;
            dict.set_item("offline_yards", r.offline_yards)?;
            dict.set_item("carry_offline_yards", r.carry_offline_yards)?;
            dict.set_item("apex_feet", r.apex_feet)?;
            dict.set_item("apex_time", r.apex_time)?;
            dict.set_item("flight_time", r.flight_time)?;
            dict.set_item("total_time", r.total_time)?;
            dict.set_item("landing_angle", r.landing_angle_deg)?;
            dict.set_item("landing_speed_mph", r.landing_speed_mph)?;
            dict.set_item("bounce_count", r.bounce_count)?;
            dict.set_item("surface", r.surface.as_str())?;
            dict.set_item("samples", r.samples.len())?;
            Ok(dict.into())
        })
    }

    fn __repr__(&self) -> String {
        format!(
            "Shot(carry={:.1} yd, total={:.1} yd, offline={:.1} yd, apex={:.1} ft)",
            self.result.carry_yards,
            self.result.total_yards,
            self.result.offline_yards,
            self.result.apex_feet
        )
    }
}

/// Simulate one shot from launch-monitor values.
///
/// Speeds in mph, angles in degrees, spins in rpm, temperature in °F,
/// elevation in feet, humidity in percent. A wind direction of 0 is a
/// tailwind, 180 a headwind, 90 blows toward the right.
#[pyfunction]
#[pyo3(signature = (
    speed_mph,
    launch_deg,
    direction_deg,
    back_rpm,
    side_rpm,
    surface = "fairway",
    temperature_f = 70.0,
    elevation_ft = 0.0,
    humidity_pct = 50.0,
    wind_mph = 0.0,
    wind_direction_deg = 0.0
))]
#[allow(clippy::too_many_arguments)]
fn simulate_shot(
    speed_mph: f64,
    launch_deg: f64,
    direction_deg: f64,
    back_rpm: f64,
    side_rpm: f64,
    surface: &str,
    temperature_f: f64,
    elevation_ft: f64,
    humidity_pct: f64,
    wind_mph: f64,
    wind_direction_deg: f64,
) -> PyResult<Shot> {
    let surface =
        GroundSurface::preset(surface).map_err(|err| PyValueError::new_err(err.to_string()))?;
    let launch = LaunchConditions::from_imperial(speed_mph, launch_deg, direction_deg, back_rpm, side_rpm);

    let mut env = EnvironmentalConditions::from_imperial(temperature_f, elevation_ft, humidity_pct);
    if wind_mph != 0.0 {
        env = env.with_wind(Wind::from_mph(wind_mph, wind_direction_deg));
    }

    let simulator = Simulator::new(SimulationConfig::default(), surface).map_err(to_py_err)?;
    let result = simulator.simulate(&launch, &env).map_err(to_py_err)?;
    Ok(Shot { result })
}

/// Names of the built-in ground surfaces.
#[pyfunction]
fn surfaces() -> Vec<&'static str> {
    PRESET_NAMES.to_vec()
}

/// Python module definition.
#[pymodule]
fn golf_physics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Shot>()?;
    m.add_function(wrap_pyfunction!(simulate_shot, m)?)?;
    m.add_function(wrap_pyfunction!(surfaces, m)?)?;
    Ok(())
}
