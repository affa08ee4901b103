//! # Middleware Stack
//!
//! Tower middleware shared by the temperature service and the gateway:
//! - [`tracing_layer`]: request ids and request/response tracing with `TraceLayer`.
//! - [`metrics`]: Prometheus request metrics.

pub mod metrics;
pub mod tracing_layer;
