//! # Weather Client
//!
//! Fetches current conditions for a city via
//! `GET {base}/v1/current.json?key={key}&q={city}`. The city is
//! percent-encoded as a query value, so names with spaces and non-ASCII
//! letters ("São Paulo") are carried intact.
//!
//! The API key travels only in the query string. It never appears in
//! error messages, logs, or `Debug` output.

use std::sync::Arc;

use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;
use ziptemp_core::Location;

use crate::error::{body_excerpt, LookupError};
use crate::exchange::{endpoint_url, ExchangeRequest, HttpExchange};

const ENDPOINT: &str = "GET /v1/current.json";

/// Current temperature as reported by the weather service.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub temp_f: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: CurrentConditions,
}

/// Client for the weather service.
#[derive(Clone)]
pub struct WeatherClient {
    exchange: Arc<dyn HttpExchange>,
    base_url: Url,
    api_key: Zeroizing<String>,
}

impl std::fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherClient")
            .field("exchange", &self.exchange)
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl WeatherClient {
    pub fn new(exchange: Arc<dyn HttpExchange>, base_url: Url, api_key: Zeroizing<String>) -> Self {
        Self {
            exchange,
            base_url,
            api_key,
        }
    }

    /// Fetch the current temperature for `location`.
    ///
    /// Makes exactly one outbound request.
    #[tracing::instrument(name = "weather_lookup", skip_all, fields(city = %location))]
    pub async fn current_temperature(
        &self,
        location: &Location,
    ) -> Result<CurrentConditions, LookupError> {
        let mut url = endpoint_url(&self.base_url, "v1/current.json").map_err(|e| {
            LookupError::InvalidRequest {
                endpoint: ENDPOINT.into(),
                reason: e.to_string(),
            }
        })?;
        url.query_pairs_mut()
            .append_pair("key", self.api_key.as_str())
            .append_pair("q", location.name());

        let resp = self
            .exchange
            .execute(ExchangeRequest::get(url))
            .await
            .map_err(|source| LookupError::Transport {
                endpoint: ENDPOINT.into(),
                source,
            })?;

        if !resp.is_success() {
            return Err(LookupError::Status {
                endpoint: ENDPOINT.into(),
                status: resp.status,
                body: body_excerpt(&resp.body),
            });
        }

        let parsed: CurrentResponse =
            serde_json::from_slice(&resp.body).map_err(|source| LookupError::Decode {
                endpoint: ENDPOINT.into(),
                source,
            })?;

        tracing::debug!(
            temp_c = parsed.current.temp_c,
            temp_f = parsed.current.temp_f,
            "current conditions received"
        );
        Ok(parsed.current)
    }
}
