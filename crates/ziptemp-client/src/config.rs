//! Lookup client configuration.

use url::Url;
use zeroize::Zeroizing;

use crate::exchange::DEFAULT_TIMEOUT_SECS;

/// Default base URL of the postal-code directory.
pub const DEFAULT_DIRECTORY_URL: &str = "https://viacep.com.br";
/// Default base URL of the weather service.
pub const DEFAULT_WEATHER_URL: &str = "https://api.weatherapi.com";

/// Configuration for the directory and weather clients.
///
/// The weather API key is wrapped in [`Zeroizing`] so it is scrubbed from
/// memory on drop, and it is redacted from `Debug` output.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the postal-code directory.
    pub directory_url: Url,
    /// Base URL of the weather service.
    pub weather_url: Url,
    /// Weather service API key, sent as the `key` query parameter.
    pub weather_api_key: Zeroizing<String>,
    /// Per-exchange timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("directory_url", &self.directory_url.as_str())
            .field("weather_url", &self.weather_url.as_str())
            .field("weather_api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("WEATHER_API_KEY is required but not set")]
    MissingApiKey,

    #[error("invalid URL in {var}: {reason}")]
    InvalidUrl { var: String, reason: String },

    #[error("invalid value in {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Required | Default |
    /// |---|---|---|
    /// | `WEATHER_API_KEY` | yes | |
    /// | `DIRECTORY_BASE_URL` | no | `https://viacep.com.br` |
    /// | `WEATHER_BASE_URL` | no | `https://api.weatherapi.com` |
    /// | `LOOKUP_TIMEOUT_SECS` | no | `10` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// [`from_env`](Self::from_env) delegates here; tests pass a map so they
    /// do not mutate process-wide environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let directory_url = parse_url(&lookup, "DIRECTORY_BASE_URL", DEFAULT_DIRECTORY_URL)?;
        let weather_url = parse_url(&lookup, "WEATHER_BASE_URL", DEFAULT_WEATHER_URL)?;

        let weather_api_key = lookup("WEATHER_API_KEY")
            .filter(|k| !k.is_empty())
            .map(Zeroizing::new)
            .ok_or(ConfigError::MissingApiKey)?;

        let timeout_secs = match lookup("LOOKUP_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "LOOKUP_TIMEOUT_SECS".into(),
                        reason: format!("expected a positive integer, got \"{raw}\""),
                    })
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            directory_url,
            weather_url,
            weather_api_key,
            timeout_secs,
        })
    }

    /// Configuration pointing both collaborators at local base URLs.
    pub fn local(directory_url: Url, weather_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            directory_url,
            weather_url,
            weather_api_key: Zeroizing::new(api_key.into()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn parse_url<F>(lookup: &F, var: &str, default: &str) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(var).unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
        var: var.to_string(),
        reason: e.to_string(),
    })
}
