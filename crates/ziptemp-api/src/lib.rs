//! # ziptemp-api: Zip Code Temperature Service
//!
//! Validates a Brazilian zip code, resolves its city through the postal-code
//! directory, and returns the city's current temperature in Celsius,
//! Fahrenheit and Kelvin.
//!
//! ## API Surface
//!
//! | Route | Module | Purpose |
//! |---|---|---|
//! | `POST /temperature` | [`routes::temperature`] | Zip code to temperature |
//! | `GET /openapi.json` | [`openapi`] | OpenAPI document |
//! | `GET /health/*` | [`routes::health`] | Liveness and readiness |
//! | `GET /metrics` | this module | Prometheus scrape |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! SetRequestId → TraceLayer → PropagateRequestId → MetricsMiddleware → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod orchestration;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::Router;

use crate::middleware::tracing_layer::with_request_tracing;
use crate::state::AppState;

/// Maximum accepted request body.
pub const BODY_LIMIT_BYTES: usize = 16 * 1024;

/// Check if metrics are enabled via the `ZIPTEMP_METRICS_ENABLED` env var.
/// Defaults to `true` when the variable is absent or set to anything other than `"false"`.
pub fn metrics_enabled() -> bool {
    std::env::var("ZIPTEMP_METRICS_ENABLED")
        .map(|v| v.to_lowercase() != "false")
        .unwrap_or(true)
}

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics_on = metrics_enabled();

    let mut api = Router::new()
        .merge(routes::temperature::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES));

    if metrics_on {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(axum::Extension(state.metrics.clone()));
    }

    let mut operational: Router<AppState> = routes::health::router();
    if metrics_on {
        operational = operational.route("/metrics", axum::routing::get(prometheus_metrics));
    }

    let router = Router::new()
        .merge(operational)
        .merge(api)
        .with_state(state);

    with_request_tracing(router)
}

/// GET /metrics: Prometheus metrics scrape endpoint.
async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}
