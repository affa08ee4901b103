//! # HTTP Exchange Capability
//!
//! The lookup clients never talk to `reqwest` directly. They hand an
//! [`ExchangeRequest`] to an [`HttpExchange`] and get back either an
//! [`ExchangeResponse`] (any status) or a [`TransportError`].
//!
//! Production wires [`ReqwestExchange`], a pooled `reqwest::Client`.
//! Tests wire a scripted implementation (see the `mock` feature) and
//! assert on the requests it recorded.
//!
//! Cancellation follows future ownership: the request handler owns the
//! `execute` future, so dropping the handler (client gone) drops the
//! in-flight exchange with it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::error::TransportError;

/// Default per-exchange timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = concat!("ziptemp/", env!("CARGO_PKG_VERSION"));

/// One outbound HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl ExchangeRequest {
    /// A `GET` with no body.
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// A `POST` carrying `body` serialized as JSON.
    pub fn post_json<T: Serialize>(url: Url, body: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            method: Method::POST,
            url,
            headers: vec![(CONTENT_TYPE.as_str().to_string(), "application/json".to_string())],
            body: Some(serde_json::to_vec(body)?),
        })
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A received HTTP response, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ExchangeResponse {
    /// A response with the given status and raw body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: None,
            body: body.into(),
        }
    }

    /// A response with a JSON body.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: value.to_string().into_bytes(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Perform one HTTP exchange.
///
/// Implementations must be `Send + Sync` so a single instance can be shared
/// behind an `Arc` by every request handler.
#[async_trait]
pub trait HttpExchange: Send + Sync + std::fmt::Debug {
    /// Send `request` and buffer the full response.
    ///
    /// Non-2xx statuses are returned as `Ok`; only failures to obtain a
    /// response at all are errors.
    async fn execute(&self, request: ExchangeRequest) -> Result<ExchangeResponse, TransportError>;
}

/// [`HttpExchange`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestExchange {
    client: reqwest::Client,
}

impl ReqwestExchange {
    /// Build a client with the given per-exchange timeout.
    pub fn new(timeout_secs: u64) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Failed {
                target: "client_init".into(),
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpExchange for ReqwestExchange {
    async fn execute(&self, request: ExchangeRequest) -> Result<ExchangeResponse, TransportError> {
        // Strip the query so API keys never reach error messages or logs.
        let mut target_url = request.url.clone();
        target_url.set_query(None);
        let target = target_url.to_string();

        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&target, e))?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(&target, e))?
            .to_vec();

        tracing::debug!(%target, status, bytes = body.len(), "exchange completed");

        Ok(ExchangeResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Join `path` onto `base`, tolerating a trailing slash (or none) on the base.
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut raw = base.as_str().trim_end_matches('/').to_string();
    raw.push('/');
    raw.push_str(path.trim_start_matches('/'));
    Url::parse(&raw)
}
