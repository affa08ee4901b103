//! Health probes, shared by every service in the workspace.

use axum::routing::get;
use axum::Router;

/// `/health/liveness` and `/health/readiness`.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
}

/// Liveness probe: always 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe.
///
/// Collaborators are not probed: an unreachable directory or weather service
/// is reported per request (404 / 500), and restarting this process would
/// not fix it.
async fn readiness() -> &'static str {
    "ready"
}
