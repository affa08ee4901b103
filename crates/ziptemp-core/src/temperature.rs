//! # Temperature Readings
//!
//! Celsius and Fahrenheit are taken as reported by the weather service.
//! Kelvin is derived as `celsius + 273`. The 0.15 fraction is deliberately
//! left out so responses stay compatible with existing consumers.

use serde::{Deserialize, Serialize};

use crate::location::Location;

/// Offset added to Celsius to derive Kelvin.
pub const KELVIN_OFFSET: f64 = 273.0;

/// Derive Kelvin from Celsius.
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}

/// Current temperature for a resolved city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub city: String,
    pub celsius: f64,
    pub fahrenheit: f64,
    pub kelvin: f64,
}

impl TemperatureReading {
    /// Build a reading for `location`, deriving Kelvin from `celsius`.
    pub fn new(location: &Location, celsius: f64, fahrenheit: f64) -> Self {
        Self {
            city: location.name().to_string(),
            celsius,
            fahrenheit,
            kelvin: celsius_to_kelvin(celsius),
        }
    }
}
