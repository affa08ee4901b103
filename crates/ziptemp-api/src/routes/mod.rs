//! # API Route Modules
//!
//! - `temperature`: the zip code to temperature endpoint.
//! - `health`: liveness and readiness probes.

pub mod health;
pub mod temperature;
