//! # Temperature Endpoint
//!
//! `POST /temperature` with `{"zipcode": "01001000"}`.
//!
//! | Outcome | Status | Body |
//! |---|---|---|
//! | body is not decodable JSON (any content type) | 400 | decoder message |
//! | zip code is not 8 digits | 422 | `invalid zipcode` |
//! | directory lookup fails | 404 | `can not find zipcode` |
//! | weather lookup fails | 500 | `error fetching temperature` |
//! | success | 200 | `{city, celsius, fahrenheit, kelvin}` |

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use ziptemp_core::{TemperatureReading, ZipCode};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::orchestration;
use crate::state::AppState;

/// Body of every 422 for a malformed zip code.
pub const INVALID_ZIPCODE_MESSAGE: &str = "invalid zipcode";

const ZIPCODE_FIELD: &str = "zipcode";

/// Request body for `POST /temperature`.
///
/// A `null` body, an absent `zipcode` and `"zipcode": null` all decode as
/// an empty zip code and are rejected as invalid.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct TemperatureRequest {
    /// Brazilian postal code, exactly 8 digits without separators.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "01001000")]
    pub zipcode: Option<String>,
}

/// The member name matches case-insensitively; an exact `zipcode` key wins
/// over other spellings. Unknown members are ignored.
impl<'de> Deserialize<'de> for TemperatureRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Some(mut fields) = Option::<Map<String, Value>>::deserialize(deserializer)? else {
            return Ok(Self::default());
        };
        let value = fields.remove(ZIPCODE_FIELD).or_else(|| {
            fields
                .into_iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(ZIPCODE_FIELD))
                .map(|(_, value)| value)
        });
        let zipcode = match value {
            Some(value) => Option::<String>::deserialize(value).map_err(D::Error::custom)?,
            None => None,
        };
        Ok(Self { zipcode })
    }
}

impl TemperatureRequest {
    pub fn new(zipcode: impl Into<String>) -> Self {
        Self {
            zipcode: Some(zipcode.into()),
        }
    }

    /// Validate the zip code, producing the 422 error on failure.
    pub fn into_zipcode(self) -> Result<ZipCode, AppError> {
        ZipCode::new(self.zipcode.unwrap_or_default()).map_err(|e| {
            tracing::debug!(error = %e, "zipcode rejected");
            AppError::Validation(INVALID_ZIPCODE_MESSAGE.to_string())
        })
    }
}

/// Current temperature for the city of a zip code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemperatureResponse {
    #[schema(example = "São Paulo")]
    pub city: String,
    #[schema(example = 18.0)]
    pub celsius: f64,
    #[schema(example = 64.4)]
    pub fahrenheit: f64,
    /// Celsius + 273.
    #[schema(example = 291.0)]
    pub kelvin: f64,
}

impl From<TemperatureReading> for TemperatureResponse {
    fn from(reading: TemperatureReading) -> Self {
        Self {
            city: reading.city,
            celsius: reading.celsius,
            fahrenheit: reading.fahrenheit,
            kelvin: reading.kelvin,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/temperature", post(post_temperature))
}

/// Resolve the current temperature for a zip code.
#[utoipa::path(
    post,
    path = "/temperature",
    request_body = TemperatureRequest,
    responses(
        (status = 200, description = "Current temperature", body = TemperatureResponse),
        (status = 400, description = "Body is not a decodable JSON object", body = String, content_type = "text/plain"),
        (status = 422, description = "Zip code is not exactly 8 digits", body = String, content_type = "text/plain"),
        (status = 404, description = "Zip code could not be resolved to a city", body = String, content_type = "text/plain"),
        (status = 500, description = "Weather lookup failed", body = String, content_type = "text/plain"),
    ),
    tag = "temperature"
)]
pub async fn post_temperature(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<TemperatureResponse>, AppError> {
    let zipcode = extract_json::<TemperatureRequest>(body)?.into_zipcode()?;
    let reading =
        orchestration::resolve_temperature(&state.clients, &state.metrics, &zipcode).await?;
    Ok(Json(reading.into()))
}
