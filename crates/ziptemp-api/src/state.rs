//! # Application State
//!
//! Built once at startup and cloned into every handler. Holds the shared
//! lookup clients (one connection pool) and the metrics registry. There is
//! no per-request shared state.

use std::sync::Arc;

use ziptemp_client::LookupClients;

use crate::middleware::metrics::ApiMetrics;

/// Default listen port of the temperature service.
pub const DEFAULT_PORT: u16 = 8080;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub clients: Arc<LookupClients>,
    pub metrics: ApiMetrics,
}

impl AppState {
    /// Build state with a fresh metrics registry.
    pub fn new(clients: LookupClients) -> Result<Self, prometheus::Error> {
        Ok(Self {
            clients: Arc::new(clients),
            metrics: ApiMetrics::new()?,
        })
    }
}
