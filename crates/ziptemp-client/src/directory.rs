//! # Postal-Code Directory Client
//!
//! Resolves a validated [`ZipCode`] to a [`Location`] via
//! `GET {base}/ws/{zipcode}/json`. The directory answers unknown codes with
//! HTTP 200 and either an empty `localidade` or an `{"erro": true}` body, so
//! a missing or empty place name maps to [`LookupError::NotFound`].

use std::sync::Arc;

use serde::Deserialize;
use url::Url;
use ziptemp_core::{Location, ZipCode};

use crate::error::{body_excerpt, LookupError};
use crate::exchange::{endpoint_url, ExchangeRequest, HttpExchange};

const ENDPOINT: &str = "GET /ws/{zipcode}/json";

#[derive(Debug, Deserialize)]
struct DirectoryRecord {
    #[serde(default)]
    localidade: Option<String>,
}

/// Client for the postal-code directory.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    exchange: Arc<dyn HttpExchange>,
    base_url: Url,
}

impl DirectoryClient {
    pub fn new(exchange: Arc<dyn HttpExchange>, base_url: Url) -> Self {
        Self { exchange, base_url }
    }

    /// Resolve `zipcode` to its place name.
    ///
    /// Makes exactly one outbound request.
    #[tracing::instrument(name = "directory_lookup", skip_all, fields(zipcode = %zipcode))]
    pub async fn find_by_zipcode(&self, zipcode: &ZipCode) -> Result<Location, LookupError> {
        let path = format!("ws/{}/json", zipcode.as_str());
        let url = endpoint_url(&self.base_url, &path).map_err(|e| LookupError::InvalidRequest {
            endpoint: ENDPOINT.into(),
            reason: e.to_string(),
        })?;

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

        let record: DirectoryRecord =
            serde_json::from_slice(&resp.body).map_err(|source| LookupError::Decode {
                endpoint: ENDPOINT.into(),
                source,
            })?;

        let location = record
            .localidade
            .and_then(|name| Location::new(name).ok())
            .ok_or_else(|| LookupError::NotFound {
                zipcode: zipcode.to_string(),
            })?;

        tracing::debug!(city = %location, "zipcode resolved");
        Ok(location)
    }
}
