//! Atmosphere model: air density, viscosity and the wind profile.
//!
//! Density uses the standard-atmosphere pressure at elevation, then splits it
//! into dry-air and water-vapor partial pressures (Tetens saturation
//! formula) so humid air comes out lighter than dry air:
//!
//! ```text
//! p     = 101325 * (1 - 2.25577e-5 * h)^5.25588
//! p_v   = RH * 610.78 * 10^(7.5 T / (T + 237.3))
//! rho   = (p - p_v) / (R_d * T_K) + p_v / (R_v * T_K)
//! ```
//!
//! Wind grows logarithmically with height above a short-grass surface and is
//! zero at ground level.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::Vec3;
use crate::units;

const SEA_LEVEL_PRESSURE: f64 = 101_325.0;
const GAS_CONSTANT_DRY_AIR: f64 = 287.058;
const GAS_CONSTANT_WATER_VAPOR: f64 = 461.495;

/// Sutherland's law constants for air
const SUTHERLAND_C1: f64 = 1.458e-6;
const SUTHERLAND_S: f64 = 110.4;

/// Height at which the reported wind speed is measured (m)
pub const WIND_REFERENCE_HEIGHT: f64 = 10.0;

/// Aerodynamic roughness length of mown grass (m)
pub const WIND_ROUGHNESS_LENGTH: f64 = 0.03;

// =============================================================================
// Wind
// =============================================================================

/// Static wind field.
///
/// `direction_deg` is the direction the wind blows *toward*, measured from
/// the target line, positive to the right: 0 is a tailwind, 180 a headwind,
/// 90 blows left-to-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Speed at [`WIND_REFERENCE_HEIGHT`] (m/s)
    pub speed: f64,
    pub direction_deg: f64,
}

impl Wind {
    pub fn new(speed: f64, direction_deg: f64) -> Self {
        Self {
            speed,
            direction_deg,
        }
    }

    pub fn from_mph(speed_mph: f64, direction_deg: f64) -> Self {
        Self::new(units::mph_to_mps(speed_mph), direction_deg)
    }

    /// Wind velocity at a height above the ground.
    pub fn velocity_at(&self, height: f64) -> Vec3 {
        if self.speed == 0.0 || height <= WIND_ROUGHNESS_LENGTH {
            return Vec3::ZERO;
        }
        let profile = (height / WIND_ROUGHNESS_LENGTH).ln()
            / (WIND_REFERENCE_HEIGHT / WIND_ROUGHNESS_LENGTH).ln();
        let heading = self.direction_deg.to_radians();
        Vec3::new(heading.cos(), 0.0, heading.sin()) * (self.speed * profile)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_range("wind speed", self.speed, 0.0, 50.0)?;
        ValidationError::check_range("wind direction", self.direction_deg, -360.0, 360.0)
    }
}

// =============================================================================
// Environmental Conditions
// =============================================================================

/// Weather and course conditions for a shot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalConditions {
    pub temperature_c: f64,
    pub elevation_m: f64,
    /// Relative humidity as a fraction in `[0, 1]`
    pub relative_humidity: f64,
    #[serde(default)]
    pub wind: Option<Wind>,
}

impl EnvironmentalConditions {
    pub fn new(temperature_c: f64, elevation_m: f64, relative_humidity: f64) -> Self {
        Self {
            temperature_c,
            elevation_m,
            relative_humidity,
            wind: None,
        }
    }

    /// Range reference conditions: 70 °F at sea level, 50% humidity, calm.
    pub fn standard() -> Self {
        Self::from_imperial(70.0, 0.0, 50.0)
    }

    /// Build from °F, feet of elevation and humidity in percent.
    pub fn from_imperial(temperature_f: f64, elevation_ft: f64, humidity_pct: f64) -> Self {
        Self::new(
            units::fahrenheit_to_celsius(temperature_f),
            units::feet_to_meters(elevation_ft),
            humidity_pct / 100.0,
        )
    }

    pub fn with_wind(mut self, wind: Wind) -> Self {
        self.wind = Some(wind);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_range("temperature", self.temperature_c, -40.0, 60.0)?;
        ValidationError::check_range("elevation", self.elevation_m, -500.0, 5000.0)?;
        ValidationError::check_range("relative humidity", self.relative_humidity, 0.0, 1.0)?;
        if let Some(wind) = &self.wind {
            wind.validate()?;
        }
        Ok(())
    }

    /// Static pressure at the course elevation (Pa)
    pub fn pressure(&self) -> f64 {
        SEA_LEVEL_PRESSURE * (1.0 - 2.25577e-5 * self.elevation_m).powf(5.25588)
    }

    /// Moist-air density (kg/m³)
    pub fn air_density(&self) -> f64 {
        let t_c = self.temperature_c;
        let t_k = units::celsius_to_kelvin(t_c);
        let saturation = 610.78 * 10f64.powf(7.5 * t_c / (t_c + 237.3));
        let vapor = self.relative_humidity * saturation;
        let dry = self.pressure() - vapor;
        dry / (GAS_CONSTANT_DRY_AIR * t_k) + vapor / (GAS_CONSTANT_WATER_VAPOR * t_k)
    }

    /// Dynamic viscosity of air from Sutherland's law (Pa·s)
    pub fn air_viscosity(&self) -> f64 {
        let t_k = units::celsius_to_kelvin(self.temperature_c);
        SUTHERLAND_C1 * t_k.powf(1.5) / (t_k + SUTHERLAND_S)
    }
}

impl Default for EnvironmentalConditions {
    fn default() -> Self {
        Self::standard()
    }
}

// =============================================================================
// Atmosphere
// =============================================================================

/// Air properties derived once per simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    pub density: f64,
    pub viscosity: f64,
    pub wind: Option<Wind>,
}

impl Atmosphere {
    pub fn from_conditions(conditions: &EnvironmentalConditions) -> Self {
        Self {
            density: conditions.air_density(),
            viscosity: conditions.air_viscosity(),
            wind: conditions.wind,
        }
    }

    pub fn wind_at(&self, height: f64) -> Vec3 {
        match &self.wind {
            Some(wind) => wind.velocity_at(height),
            None => Vec3::ZERO,
        }
    }
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self::from_conditions(&EnvironmentalConditions::standard())
    }
}
