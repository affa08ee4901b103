//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every failure of a request maps to exactly one status code and a short
//! plain-text body. Upstream and internal details are logged for operators
//! and never returned to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body could not be decoded (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request decoded but a field is invalid (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// The requested resource could not be resolved (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// A collaborator failed (500). `message` goes to the client, `detail`
    /// only to the logs.
    #[error("{message}: {detail}")]
    Upstream {
        message: &'static str,
        detail: String,
    },

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Upstream { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Construct an upstream error (500) with a client-facing message.
    pub fn upstream(message: &'static str, detail: impl std::fmt::Display) -> Self {
        Self::Upstream {
            message,
            detail: detail.to_string(),
        }
    }

    /// The plain-text body sent to the client.
    fn client_message(&self) -> String {
        match self {
            Self::BadRequest(msg) | Self::Validation(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Upstream { message, .. } => (*message).to_string(),
            Self::Internal(_) => "internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, code, "internal server error"),
            Self::Upstream { .. } => tracing::error!(error = %self, code, "upstream error"),
            _ => tracing::debug!(error = %self, code, "request rejected"),
        }

        (status, self.client_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header::CONTENT_TYPE;
    use http_body_util::BodyExt;

    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, String, String) {
        let resp = err.into_response();
        let status = resp.status();
        let ct = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, ct, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn bad_request_status_code() {
        let (status, code) = AppError::BadRequest("x".into()).status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "BAD_REQUEST");
    }

    #[test]
    fn validation_status_code() {
        let (status, code) = AppError::Validation("x".into()).status_and_code();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn not_found_status_code() {
        let (status, code) = AppError::NotFound("x".into()).status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
    }

    #[test]
    fn upstream_status_code() {
        let (status, code) = AppError::upstream("boom", "detail").status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn client_errors_return_their_message_as_plain_text() {
        let (status, ct, body) = body_of(AppError::Validation("invalid zipcode".into())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(ct.starts_with("text/plain"), "content-type: {ct}");
        assert_eq!(body, "invalid zipcode");
    }

    #[tokio::test]
    async fn upstream_detail_is_not_returned() {
        let err = AppError::upstream(
            "error fetching temperature",
            "GET /v1/current.json returned 401: API key is invalid",
        );
        let (status, _, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "error fetching temperature");
    }

    #[tokio::test]
    async fn internal_message_is_not_returned() {
        let (status, _, body) = body_of(AppError::Internal("secret detail".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "internal server error");
    }
}
