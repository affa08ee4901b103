//! # ziptemp-api entry point
//!
//! Loads the lookup configuration from the environment, builds the shared
//! clients, and serves the temperature API until shutdown.

use clap::Parser;
use ziptemp_client::{ClientConfig, LookupClients};

use ziptemp_api::server::serve;
use ziptemp_api::state::{AppState, DEFAULT_PORT};
use ziptemp_api::telemetry::{init_tracing, LogFormat};

/// Current temperature for a Brazilian zip code.
///
/// Reads WEATHER_API_KEY (required), DIRECTORY_BASE_URL, WEATHER_BASE_URL and
/// LOOKUP_TIMEOUT_SECS from the environment.
#[derive(Parser, Debug)]
#[command(name = "ziptemp-api", version, about, long_about = None)]
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

    let client_config = ClientConfig::from_env()?;
    tracing::info!(config = ?client_config, "lookup clients configured");

    let clients = LookupClients::new(&client_config)?;
    let state = AppState::new(clients)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        metrics = ziptemp_api::metrics_enabled(),
        "ziptemp-api starting"
    );
    serve(ziptemp_api::app(state), cli.port).await?;
    Ok(())
}
