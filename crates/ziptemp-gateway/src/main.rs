//! # ziptemp-gateway entry point

use std::sync::Arc;

use clap::Parser;
use ziptemp_client::ReqwestExchange;

use ziptemp_api::server::serve;
use ziptemp_api::telemetry::{init_tracing, LogFormat};
use ziptemp_gateway::config::{GatewayConfig, DEFAULT_PORT};
use ziptemp_gateway::GatewayState;

/// Input gateway: validates zip codes and forwards them to the temperature
/// service.
///
/// Reads TEMPERATURE_SERVICE_URL and FORWARD_TIMEOUT_SECS from the environment.
#[derive(Parser, Debug)]
#[command(name = "ziptemp-gateway", version, about, long_about = None)]
struct Cli {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = GatewayConfig::from_env()?;
    tracing::info!(
        target_url = %config.temperature_service_url,
        timeout_secs = config.timeout_secs,
        "ziptemp-gateway starting"
    );

    let exchange = Arc::new(ReqwestExchange::new(config.timeout_secs)?);
    let state = GatewayState::new(config, exchange);

    serve(ziptemp_gateway::app(state), cli.port).await?;
    Ok(())
}
