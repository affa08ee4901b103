//! # Integration Tests for ziptemp-api
//!
//! Drives the full router in-process with a scripted HTTP exchange standing
//! in for the directory and weather services. Covers the status mapping of
//! every pipeline stage, the number of outbound calls per outcome,
//! cancellation, health probes, metrics, request ids and the OpenAPI
//! document.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use url::Url;

use ziptemp_api::state::AppState;
use ziptemp_client::mock::ScriptedExchange;
use ziptemp_client::{
    ClientConfig, ExchangeRequest, ExchangeResponse, HttpExchange, LookupClients, TransportError,
};

/// Helper: build the app over a scripted exchange shared by both clients.
fn test_app(exchange: Arc<ScriptedExchange>) -> axum::Router {
    app_over(exchange)
}

fn app_over(exchange: Arc<dyn HttpExchange>) -> axum::Router {
    let config = ClientConfig::local(
        Url::parse("https://viacep.test").unwrap(),
        Url::parse("https://weather.test").unwrap(),
        "test-key",
    );
    let clients = LookupClients::with_exchange(&config, exchange);
    let state = AppState::new(clients).unwrap();
    ziptemp_api::app(state)
}

fn post_temperature(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/temperature")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn directory_ok(city: &str) -> ExchangeResponse {
    ExchangeResponse::json(200, &json!({"cep": "01001-000", "localidade": city, "uf": "SP"}))
}

fn weather_ok(temp_c: f64, temp_f: f64) -> ExchangeResponse {
    ExchangeResponse::json(200, &json!({"current": {"temp_c": temp_c, "temp_f": temp_f}}))
}

// -- Success ------------------------------------------------------------------

#[tokio::test]
async fn test_sao_paulo_end_to_end() {
    let exchange = Arc::new(ScriptedExchange::new());
    exchange.push_response(directory_ok("São Paulo"));
    exchange.push_response(weather_ok(18.0, 64.4));

    let response = test_app(exchange.clone())
        .oneshot(post_temperature(r#"{"zipcode":"01001000"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        body,
        json!({"city": "São Paulo", "celsius": 18.0, "fahrenheit": 64.4, "kelvin": 291.0})
    );

    let requests = exchange.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].url.as_str(),
        "https://viacep.test/ws/01001000/json"
    );
    assert_eq!(requests[1].url.host_str(), Some("weather.test"));
    assert_eq!(requests[1].url.path(), "/v1/current.json");
    let q: Vec<(String, String)> = requests[1]
        .url
        .query_pairs()
        .into_owned()
        .filter(|(k, _)| k == "q")
        .collect();
    assert_eq!(q, vec![("q".to_string(), "São Paulo".to_string())]);
}

#[tokio::test]
async fn test_kelvin_is_celsius_plus_273() {
    for (c, f) in [(-5.5, 22.1), (0.0, 32.0), (37.2, 98.96)] {
        let exchange = Arc::new(ScriptedExchange::new());
        exchange.push_response(directory_ok("Curitiba"));
        exchange.push_response(weather_ok(c, f));

        let response = test_app(exchange)
            .oneshot(post_temperature(r#"{"zipcode":"80010000"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["kelvin"].as_f64().unwrap(), c + 273.0);
        assert_eq!(body["fahrenheit"].as_f64().unwrap(), f);
    }
}

// -- Input errors -------------------------------------------------------------

#[tokio::test]
async fn test_invalid_zipcode_is_422_without_outbound_calls() {
    let exchange = Arc::new(ScriptedExchange::new());
    let response = test_app(exchange.clone())
        .oneshot(post_temperature(r#"{"zipcode":"invalidcep"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_string(response).await, "invalid zipcode");
    assert_eq!(exchange.call_count(), 0);
}

#[tokio::test]
async fn test_wrong_length_zipcodes_are_422() {
    for zip in ["0100100", "010010000", "01001-000", "", " 01001000"] {
        let exchange = Arc::new(ScriptedExchange::new());
        let body = json!({ "zipcode": zip }).to_string();
        let response = test_app(exchange.clone())
            .oneshot(post_temperature(&body))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "zipcode {zip:?}"
        );
        assert_eq!(exchange.call_count(), 0);
    }
}

#[tokio::test]
async fn test_absent_zipcode_is_422() {
    let exchange = Arc::new(ScriptedExchange::new());
    let response = test_app(exchange.clone())
        .oneshot(post_temperature("{}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(exchange.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    for body in ["{not json", r#"{"zipcode": 1001000}"#, r#""01001000""#, "[]", ""] {
        let exchange = Arc::new(ScriptedExchange::new());
        let response = test_app(exchange.clone())
            .oneshot(post_temperature(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body:?}");
        let ct = response.headers()["content-type"].to_str().unwrap().to_string();
        assert!(ct.starts_with("text/plain"), "content-type: {ct}");
        assert_eq!(exchange.call_count(), 0);
    }
}

#[tokio::test]
async fn test_oversized_body_is_400() {
    let exchange = Arc::new(ScriptedExchange::new());
    let padding = "x".repeat(ziptemp_api::BODY_LIMIT_BYTES + 1);
    let body = json!({"zipcode": "01001000", "padding": padding}).to_string();
    let response = test_app(exchange.clone())
        .oneshot(post_temperature(&body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(exchange.call_count(), 0);
}

#[tokio::test]
async fn test_body_is_decoded_regardless_of_content_type() {
    for content_type in [None, Some("text/plain"), Some("application/x-www-form-urlencoded")] {
        let exchange = Arc::new(ScriptedExchange::new());
        exchange.push_response(directory_ok("São Paulo"));
        exchange.push_response(weather_ok(18.0, 64.4));

        let mut builder = Request::builder().method("POST").uri("/temperature");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        let request = builder
            .body(Body::from(r#"{"zipcode":"01001000"}"#))
            .unwrap();

        let response = test_app(exchange.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "content-type {content_type:?}");
        assert_eq!(exchange.call_count(), 2);
    }
}

#[tokio::test]
async fn test_null_zipcode_and_null_body_are_422() {
    for body in [r#"{"zipcode":null}"#, "null"] {
        let exchange = Arc::new(ScriptedExchange::new());
        let response = test_app(exchange.clone())
            .oneshot(post_temperature(body))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "body {body:?}"
        );
        assert_eq!(body_string(response).await, "invalid zipcode");
        assert_eq!(exchange.call_count(), 0);
    }
}

#[tokio::test]
async fn test_zipcode_key_is_case_insensitive() {
    let exchange = Arc::new(ScriptedExchange::new());
    exchange.push_response(directory_ok("São Paulo"));
    exchange.push_response(weather_ok(18.0, 64.4));

    let response = test_app(exchange.clone())
        .oneshot(post_temperature(r#"{"ZipCode":"01001000"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        exchange.requests()[0].url.as_str(),
        "https://viacep.test/ws/01001000/json"
    );
}

// -- Directory failures -------------------------------------------------------

#[tokio::test]
async fn test_empty_city_is_404_and_weather_not_called() {
    let exchange = Arc::new(ScriptedExchange::new());
    exchange.push_response(ExchangeResponse::json(200, &json!({"localidade": ""})));

    let response = test_app(exchange.clone())
        .oneshot(post_temperature(r#"{"zipcode":"99999999"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "can not find zipcode");
    assert_eq!(exchange.call_count(), 1);
}

#[tokio::test]
async fn test_directory_erro_body_is_404() {
    let exchange = Arc::new(ScriptedExchange::new());
    exchange.push_response(ExchangeResponse::json(200, &json!({"erro": true})));

    let response = test_app(exchange.clone())
        .oneshot(post_temperature(r#"{"zipcode":"99999999"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(exchange.call_count(), 1);
}

#[tokio::test]
async fn test_directory_transport_failure_is_404() {
    let exchange = Arc::new(ScriptedExchange::new());
    exchange.push_error(TransportError::Failed {
        target: "https://viacep.test/ws/01001000/json".into(),
        reason: "connection refused".into(),
    });

    let response = test_app(exchange.clone())
        .oneshot(post_temperature(r#"{"zipcode":"01001000"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "can not find zipcode");
    assert_eq!(exchange.call_count(), 1);
}

#[tokio::test]
async fn test_directory_bad_status_and_garbage_are_404() {
    for resp in [
        ExchangeResponse::new(503, "unavailable"),
        ExchangeResponse::new(200, "<html></html>"),
    ] {
        let exchange = Arc::new(ScriptedExchange::new());
        exchange.push_response(resp);
        let response = test_app(exchange.clone())
            .oneshot(post_temperature(r#"{"zipcode":"01001000"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(exchange.call_count(), 1);
    }
}

// -- Weather failures ---------------------------------------------------------

#[tokio::test]
async fn test_weather_transport_failure_is_500() {
    let exchange = Arc::new(ScriptedExchange::new());
    exchange.push_response(directory_ok("Recife"));
    exchange.push_error(TransportError::Timeout {
        target: "https://weather.test/v1/current.json".into(),
    });

    let response = test_app(exchange.clone())
        .oneshot(post_temperature(r#"{"zipcode":"50010000"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "error fetching temperature");
    assert_eq!(exchange.call_count(), 2);
}

#[tokio::test]
async fn test_weather_string_temperature_is_500() {
    let exchange = Arc::new(ScriptedExchange::new());
    exchange.push_response(directory_ok("Recife"));
    exchange.push_response(ExchangeResponse::json(
        200,
        &json!({"current": {"temp_c": "30", "temp_f": 86.0}}),
    ));

    let response = test_app(exchange)
        .oneshot(post_temperature(r#"{"zipcode":"50010000"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_weather_error_detail_is_not_leaked() {
    let exchange = Arc::new(ScriptedExchange::new());
    exchange.push_response(directory_ok("Recife"));
    exchange.push_response(ExchangeResponse::json(
        401,
        &json!({"error": {"code": 2006, "message": "API key is invalid."}}),
    ));

    let response = test_app(exchange)
        .oneshot(post_temperature(r#"{"zipcode":"50010000"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(response).await;
    assert!(!body.contains("API key"));
    assert!(!body.contains("test-key"));
}

// -- Cancellation -------------------------------------------------------------

/// Exchange whose calls never complete. Records how many calls started and
/// how many in-flight call futures were dropped.
#[derive(Debug, Default)]
struct StalledExchange {
    started: AtomicUsize,
    dropped: Arc<AtomicBool>,
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl HttpExchange for StalledExchange {
    async fn execute(&self, _request: ExchangeRequest) -> Result<ExchangeResponse, TransportError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let _flag = DropFlag(self.dropped.clone());
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_abandoned_request_drops_inflight_lookup() {
    let exchange = Arc::new(StalledExchange::default());
    let app = app_over(exchange.clone());

    let outcome = tokio::time::timeout(
        Duration::from_millis(50),
        app.oneshot(post_temperature(r#"{"zipcode":"01001000"}"#)),
    )
    .await;

    assert!(outcome.is_err(), "handler should still be waiting on the directory");
    // Only the directory call started; the weather call never did.
    assert_eq!(exchange.started.load(Ordering::SeqCst), 1);
    assert!(exchange.dropped.load(Ordering::SeqCst));
}

// -- Operational endpoints ----------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app(Arc::new(ScriptedExchange::new()))
        .oneshot(get("/health/liveness"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app(Arc::new(ScriptedExchange::new()))
        .oneshot(get("/health/readiness"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let exchange = Arc::new(ScriptedExchange::new());
    let response = test_app(exchange)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/temperature")
                .header("content-type", "application/json")
                .header("x-request-id", "req-42")
                .body(Body::from(r#"{"zipcode":"bad"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn test_metrics_count_requests_and_lookups() {
    let exchange = Arc::new(ScriptedExchange::new());
    exchange.push_response(directory_ok("São Paulo"));
    exchange.push_response(weather_ok(18.0, 64.4));
    let app = test_app(exchange);

    let response = app
        .clone()
        .oneshot(post_temperature(r#"{"zipcode":"01001000"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_string(response).await;
    assert!(text.contains("ziptemp_http_requests_total"));
    assert!(text.contains(r#"path="/temperature""#));
    assert!(text.contains(r#"ziptemp_lookups_total{collaborator="directory",outcome="ok"} 1"#));
    assert!(text.contains(r#"ziptemp_lookups_total{collaborator="weather",outcome="ok"} 1"#));
}

#[tokio::test]
async fn test_openapi_document() {
    let response = test_app(Arc::new(ScriptedExchange::new()))
        .oneshot(get("/openapi.json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let doc: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(doc["paths"]["/temperature"]["post"].is_object());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = test_app(Arc::new(ScriptedExchange::new()))
        .oneshot(get("/nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
