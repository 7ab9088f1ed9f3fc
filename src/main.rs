//! Alertgate webhook-to-alert bridge.
//!
//! Main entry point for the bridge server. Resolves configuration and the
//! alerting credential once, then serves inbound event notifications until
//! shutdown.

use std::time::Duration;

use alertgate_api::{AppState, Config};
use anyhow::{Context, Result};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with structured logging
    init_tracing();

    info!("Starting alertgate webhook-to-alert bridge");

    // Load configuration from environment; this resolves the alerting
    // credential, which stays in memory for the process lifetime.
    let config = Config::load()?;
    let addr = config.parse_server_addr()?;
    info!(
        alert_api_url = %config.alert_api_url,
        workflows = config.workflows.len(),
        server_addr = %addr,
        "Configuration loaded"
    );

    let state = AppState::from_config(&config).context("Failed to build alert client")?;

    info!(addr = %addr, "Alertgate is ready to receive events");

    alertgate_api::start_server(state, addr, Duration::from_secs(config.request_timeout))
        .await
        .context("Server failed")?;

    info!("Alertgate shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,alertgate=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
