//! HTTP server module for API and WebSocket endpoints.
//!
//! Exposes the SMS webhook, manual device control, the recommendation
//! proxy, and a WebSocket for real-time state updates.

pub mod broadcast;
pub mod routes;
pub mod state;
pub mod ws;

use crate::config::AppConfig;
use crate::server::routes::{analyze, control, health, sms};
use crate::server::state::AppState;
use crate::server::ws::ws_handler;

use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;

/// Assembles the application router.
pub fn build_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Device state
        .route("/state", get(control::get_state))
        .route("/control", post(control::control_device))
        .route("/toggle", post(control::toggle_device))
        // SMS gateway webhook
        .route("/sms/callback", post(sms::sms_callback))
        // Recommendation proxy
        .route("/analyze", post(analyze::analyze))
        .route("/analysis-types", get(analyze::get_analysis_types))
        .route("/status", get(analyze::get_analyzer_status))
        // WebSocket
        .route("/ws", get(ws_handler))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// CORS layer for frontends. `*` anywhere in the list means permissive.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(?e, %origin, "ignoring unparsable allowed origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Runs the axum server until shutdown.
pub async fn run_server(config: &AppConfig, state: Arc<AppState>) -> std::io::Result<()> {
    let app = build_router(state, &config.allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("HTTP server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(?e, "failed to listen for shutdown signal");
    }
}
