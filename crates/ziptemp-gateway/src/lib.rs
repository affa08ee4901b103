//! # ziptemp-gateway: Input Gateway
//!
//! Edge service in front of the temperature service. Rejects malformed
//! bodies (400) and zip codes that are not exactly 8 digits (422) without
//! any outbound traffic, and forwards everything else to
//! `POST {temperature-service}/temperature`, relaying the downstream status,
//! content type and body unchanged.
//!
//! The `x-request-id` assigned (or received) here is sent downstream, so a
//! request carries one id through both services.

pub mod config;

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use ziptemp_client::{ExchangeRequest, HttpExchange};

use ziptemp_api::error::AppError;
use ziptemp_api::extractors::extract_json;
use ziptemp_api::middleware::tracing_layer::{request_id, with_request_tracing, REQUEST_ID_HEADER};
use ziptemp_api::routes::health;
use ziptemp_api::routes::temperature::TemperatureRequest;
use ziptemp_api::BODY_LIMIT_BYTES;

use crate::config::GatewayConfig;

/// Body of every 500 caused by a failed forward.
pub const FORWARD_FAILURE_MESSAGE: &str = "error calling temperature service";

/// Shared gateway state.
#[derive(Debug, Clone)]
pub struct GatewayState {
    pub config: Arc<GatewayConfig>,
    pub exchange: Arc<dyn HttpExchange>,
}

impl GatewayState {
    pub fn new(config: GatewayConfig, exchange: Arc<dyn HttpExchange>) -> Self {
        Self {
            config: Arc::new(config),
            exchange,
        }
    }
}

/// Assemble the gateway router.
pub fn app(state: GatewayState) -> Router {
    let router = Router::new()
        .route("/", post(forward_zipcode))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .merge(health::router())
        .with_state(state);

    with_request_tracing(router)
}

/// POST /: validate the zip code and forward it to the temperature service.
async fn forward_zipcode(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let zipcode = extract_json::<TemperatureRequest>(body)?.into_zipcode()?;

    let endpoint = state
        .config
        .temperature_endpoint()
        .map_err(|e| AppError::Internal(format!("temperature endpoint: {e}")))?;
    let forward = TemperatureRequest::new(zipcode.as_str());
    let mut request = ExchangeRequest::post_json(endpoint, &forward)
        .map_err(|e| AppError::Internal(format!("encoding forward body: {e}")))?;
    if let Some(id) = request_id(&headers) {
        request = request.with_header(REQUEST_ID_HEADER, id);
    }

    let downstream = state
        .exchange
        .execute(request)
        .await
        .map_err(|e| AppError::upstream(FORWARD_FAILURE_MESSAGE, e))?;

    tracing::info!(zipcode = %zipcode, status = downstream.status, "forwarded");

    let status = StatusCode::from_u16(downstream.status)
        .map_err(|e| AppError::upstream(FORWARD_FAILURE_MESSAGE, e))?;
    let content_type = downstream
        .content_type
        .as_deref()
        .and_then(|v| HeaderValue::from_str(v).ok());

    let mut response = (status, downstream.body).into_response();
    match content_type {
        Some(ct) => {
            response.headers_mut().insert(CONTENT_TYPE, ct);
        }
        None => {
            response.headers_mut().remove(CONTENT_TYPE);
        }
    }
    Ok(response)
}
