//! Unit conversions between launch-monitor units and SI.
//!
//! Launch monitors report mph, degrees and rpm; the engine works in m/s,
//! radians and rad/s and only converts back to yards/feet for the summary
//! fields of a [`crate::ShotResult`].

use std::f64::consts::PI;

/// Meters per second in one mile per hour (exact).
pub const MPS_PER_MPH: f64 = 0.44704;

/// Meters in one yard (exact).
pub const METERS_PER_YARD: f64 = 0.9144;

/// Meters in one foot (exact).
pub const METERS_PER_FOOT: f64 = 0.3048;

const RAD_S_PER_RPM: f64 = 2.0 * PI / 60.0;

pub fn mph_to_mps(mph: f64) -> f64 {
    mph * MPS_PER_MPH
}

pub fn mps_to_mph(mps: f64) -> f64 {
    mps / MPS_PER_MPH
}

pub fn meters_to_yards(meters: f64) -> f64 {
    meters / METERS_PER_YARD
}

pub fn yards_to_meters(yards: f64) -> f64 {
    yards * METERS_PER_YARD
}

pub fn meters_to_feet(meters: f64) -> f64 {
    meters / METERS_PER_FOOT
}

pub fn feet_to_meters(feet: f64) -> f64 {
    feet * METERS_PER_FOOT
}

pub fn rpm_to_rad_s(rpm: f64) -> f64 {
    rpm * RAD_S_PER_RPM
}

pub fn rad_s_to_rpm(rad_s: f64) -> f64 {
    rad_s / RAD_S_PER_RPM
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + 273.15
}
