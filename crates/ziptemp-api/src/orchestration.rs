//! # Temperature Orchestration
//!
//! The two-hop pipeline behind `POST /temperature`:
//!
//! 1. **Directory lookup**: zip code to city. Any failure (unknown code,
//!    unreachable directory, bad status, undecodable body) is a 404.
//! 2. **Weather lookup**: city to current temperatures. Any failure is a 500.
//! 3. **Conversion**: Kelvin derived from Celsius.
//!
//! The lookups are strictly sequential. The weather collaborator is never
//! called unless the directory produced a non-empty city.

use ziptemp_client::LookupClients;
use ziptemp_core::{TemperatureReading, ZipCode};

use crate::error::AppError;
use crate::middleware::metrics::ApiMetrics;

/// Body of every 404 from this pipeline.
pub const NOT_FOUND_MESSAGE: &str = "can not find zipcode";
/// Body of every 500 caused by the weather lookup.
pub const WEATHER_FAILURE_MESSAGE: &str = "error fetching temperature";

const DIRECTORY: &str = "directory";
const WEATHER: &str = "weather";
const OK: &str = "ok";

/// Resolve the current temperature for `zipcode`.
#[tracing::instrument(name = "resolve_temperature", skip_all, fields(zipcode = %zipcode))]
pub async fn resolve_temperature(
    clients: &LookupClients,
    metrics: &ApiMetrics,
    zipcode: &ZipCode,
) -> Result<TemperatureReading, AppError> {
    let location = match clients.directory().find_by_zipcode(zipcode).await {
        Ok(location) => {
            metrics.record_lookup(DIRECTORY, OK);
            location
        }
        Err(err) => {
            metrics.record_lookup(DIRECTORY, err.kind());
            tracing::warn!(error = %err, kind = err.kind(), "directory lookup failed");
            return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
        }
    };

    let current = match clients.weather().current_temperature(&location).await {
        Ok(current) => {
            metrics.record_lookup(WEATHER, OK);
            current
        }
        Err(err) => {
            metrics.record_lookup(WEATHER, err.kind());
            return Err(AppError::upstream(WEATHER_FAILURE_MESSAGE, err));
        }
    };

    let reading = TemperatureReading::new(&location, current.temp_c, current.temp_f);
    tracing::info!(city = %location, celsius = reading.celsius, "temperature resolved");
    Ok(reading)
}
