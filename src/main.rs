//! gridlink - SMS device control service.
//!
//! Loads configuration, wires up the shared state, and runs the HTTP
//! server until shutdown.

use std::sync::Arc;

use gridlink::config::AppConfig;
use gridlink::server;
use gridlink::server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AppConfig::from_env();
    tracing::info!(
        port = config.port,
        sms_configured = config.at_api_key.is_some(),
        provider_configured = config.openai_api_key.is_some(),
        "starting gridlink"
    );

    let state = Arc::new(AppState::new(&config));
    server::run_server(&config, state).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
