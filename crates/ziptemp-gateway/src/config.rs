//! Gateway configuration.

use url::Url;
use ziptemp_client::exchange::DEFAULT_TIMEOUT_SECS;

/// Default base URL of the temperature service.
pub const DEFAULT_TEMPERATURE_SERVICE_URL: &str = "http://service-b:8080";
/// Default listen port of the gateway.
pub const DEFAULT_PORT: u16 = 8081;

/// Where and how the gateway forwards requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL of the temperature service.
    pub temperature_service_url: Url,
    /// Timeout for one forwarded exchange, in seconds.
    pub timeout_secs: u64,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL in {var}: {reason}")]
    InvalidUrl { var: String, reason: String },

    #[error("invalid value in {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `TEMPERATURE_SERVICE_URL` | `http://service-b:8080` |
    /// | `FORWARD_TIMEOUT_SECS` | `10` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("TEMPERATURE_SERVICE_URL")
            .unwrap_or_else(|| DEFAULT_TEMPERATURE_SERVICE_URL.to_string());
        let temperature_service_url =
            Url::parse(&raw_url).map_err(|e| ConfigError::InvalidUrl {
                var: "TEMPERATURE_SERVICE_URL".into(),
                reason: e.to_string(),
            })?;

        let timeout_secs = match lookup("FORWARD_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "FORWARD_TIMEOUT_SECS".into(),
                        reason: format!("expected a positive integer, got \"{raw}\""),
                    })
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            temperature_service_url,
            timeout_secs,
        })
    }

    /// The forwarding target, `{base}/temperature`.
    pub fn temperature_endpoint(&self) -> Result<Url, url::ParseError> {
        let mut raw = self
            .temperature_service_url
            .as_str()
            .trim_end_matches('/')
            .to_string();
        raw.push_str("/temperature");
        Url::parse(&raw)
    }
}
