//! Lookup client error types.

/// Failure to complete one HTTP exchange (no usable response was received).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The exchange did not complete within the client timeout.
    #[error("request to {target} timed out")]
    Timeout { target: String },
    /// Connection, TLS, or protocol failure.
    #[error("request to {target} failed: {reason}")]
    Failed { target: String, reason: String },
}

impl TransportError {
    /// `target` must already be stripped of secrets. The URL reqwest keeps on
    /// the error is dropped since it still carries the query string.
    pub(crate) fn from_reqwest(target: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout {
                target: target.to_string(),
            };
        }
        let err = err.without_url();
        let mut reason = err.to_string();
        let mut cause = std::error::Error::source(&err);
        while let Some(inner) = cause {
            reason.push_str(": ");
            reason.push_str(&inner.to_string());
            cause = inner.source();
        }
        Self::Failed {
            target: target.to_string(),
            reason,
        }
    }
}

/// Errors from directory and weather lookups.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The outbound request could not be built.
    #[error("error creating request for {endpoint}: {reason}")]
    InvalidRequest { endpoint: String, reason: String },
    /// The HTTP exchange failed before a response arrived.
    #[error("error doing request {endpoint}: {source}")]
    Transport {
        endpoint: String,
        source: TransportError,
    },
    /// The collaborator answered with a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// The response body is not the expected JSON shape.
    #[error("error decoding response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },
    /// The directory has no location for this zip code.
    #[error("zipcode {zipcode} not found")]
    NotFound { zipcode: String },
}

impl LookupError {
    /// Short, stable label for the failure kind (used as a metrics label).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Transport { .. } => "transport",
            Self::Status { .. } => "status",
            Self::Decode { .. } => "decode",
            Self::NotFound { .. } => "not_found",
        }
    }
}

/// Truncate an upstream body for inclusion in error messages.
pub(crate) fn body_excerpt(body: &[u8]) -> String {
    const MAX_EXCERPT: usize = 256;
    let text = String::from_utf8_lossy(body);
    if text.chars().count() <= MAX_EXCERPT {
        return text.into_owned();
    }
    let mut excerpt: String = text.chars().take(MAX_EXCERPT).collect();
    excerpt.push('…');
    excerpt
}
