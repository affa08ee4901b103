//! # Custom Extractors
//!
//! Handlers take the raw body as `Result<Bytes, BytesRejection>` and decode
//! it here, so the request `Content-Type` is never consulted. Every failure
//! (unreadable or oversized body, invalid JSON, wrong types) goes through
//! [`AppError`] and comes back as a 400 with a plain-text body.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::AppError;

/// Decode a JSON body, mapping any failure to [`AppError::BadRequest`].
pub fn extract_json<T: DeserializeOwned>(
    body: Result<Bytes, BytesRejection>,
) -> Result<T, AppError> {
    let bytes = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    serde_json::from_slice(&bytes).map_err(|e| {
        let message = match e.classify() {
            Category::Data => {
                format!("Failed to deserialize the JSON body into the target type: {e}")
            }
            _ => format!("Failed to parse the request body as JSON: {e}"),
        };
        AppError::BadRequest(message)
    })
}
