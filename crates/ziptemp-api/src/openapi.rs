//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into one OpenAPI document, served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ziptemp API",
        description = "Current temperature for a Brazilian zip code (CEP).\n\nThe zip code is resolved to a city through the postal-code directory, and the city's current temperature is fetched from the weather service. Error responses are plain text.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(crate::routes::temperature::post_temperature),
    components(schemas(
        crate::routes::temperature::TemperatureRequest,
        crate::routes::temperature::TemperatureResponse,
    )),
    tags(
        (name = "temperature", description = "Zip code to temperature lookup"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
