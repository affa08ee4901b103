//! # ziptemp-client
//!
//! Typed clients for the two upstream collaborators:
//!
//! - [`DirectoryClient`] resolves a zip code to a place name.
//! - [`WeatherClient`] fetches current temperatures for a place name.
//!
//! Both issue requests through the [`HttpExchange`] capability. Production
//! uses [`ReqwestExchange`]. With the `mock` feature enabled,
//! [`mock::ScriptedExchange`] replays canned responses for tests.

pub mod config;
pub mod directory;
pub mod error;
pub mod exchange;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod weather;

use std::sync::Arc;

pub use config::{ClientConfig, ConfigError};
pub use directory::DirectoryClient;
pub use error::{LookupError, TransportError};
pub use exchange::{ExchangeRequest, ExchangeResponse, HttpExchange, ReqwestExchange};
pub use weather::{CurrentConditions, WeatherClient};

/// The pair of lookup clients a temperature request needs.
///
/// Built once at startup and shared by every handler.
#[derive(Debug, Clone)]
pub struct LookupClients {
    directory: DirectoryClient,
    weather: WeatherClient,
}

impl LookupClients {
    /// Build both clients over a shared pooled `reqwest` exchange.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let exchange = Arc::new(ReqwestExchange::new(config.timeout_secs)?);
        Ok(Self::with_exchange(config, exchange))
    }

    /// Build both clients over the given exchange.
    pub fn with_exchange(config: &ClientConfig, exchange: Arc<dyn HttpExchange>) -> Self {
        Self {
            directory: DirectoryClient::new(exchange.clone(), config.directory_url.clone()),
            weather: WeatherClient::new(
                exchange,
                config.weather_url.clone(),
                config.weather_api_key.clone(),
            ),
        }
    }

    pub fn directory(&self) -> &DirectoryClient {
        &self.directory
    }

    pub fn weather(&self) -> &WeatherClient {
        &self.weather
    }
}
