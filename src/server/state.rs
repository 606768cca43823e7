//! Shared application state for the HTTP server.

use crate::analyzer::EnergyAnalyzer;
use crate::config::AppConfig;
use crate::device::{DeviceState, DeviceStore};
use crate::server::broadcast::ConnectionManager;
use crate::sms::SmsGateway;

/// Application state shared across all handlers.
pub struct AppState {
    /// Source of truth for the device status.
    pub device: DeviceStore,
    /// Live WebSocket connection registry.
    pub connections: ConnectionManager,
    /// Outbound SMS gateway, absent when credentials are not configured.
    pub sms: Option<SmsGateway>,
    /// Recommendation proxy.
    pub analyzer: EnergyAnalyzer,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let sms = match (&config.at_username, &config.at_api_key) {
            (Some(username), Some(api_key)) => {
                match SmsGateway::new(username.clone(), api_key.clone()) {
                    Ok(gateway) => Some(gateway),
                    Err(e) => {
                        tracing::warn!(?e, "failed to build sms gateway; replies disabled");
                        None
                    }
                }
            }
            _ => {
                tracing::info!("AT_USERNAME/AT_API_KEY not set; sms replies disabled");
                None
            }
        };

        Self {
            device: DeviceStore::new(),
            connections: ConnectionManager::new(),
            sms,
            analyzer: EnergyAnalyzer::from_config(config),
        }
    }

    /// Fans the given state out to every connected client.
    pub fn broadcast_state(&self, state: &DeviceState) {
        match serde_json::to_string(state) {
            Ok(payload) => self.connections.broadcast(&payload),
            Err(e) => tracing::error!(?e, "failed to serialize device state"),
        }
    }

    /// Dispatches an SMS reply on a background task. Failures are logged
    /// and never affect the caller.
    pub fn send_sms_reply(&self, to: &str, message: &str) {
        let Some(gateway) = self.sms.clone() else {
            tracing::warn!("sms gateway not configured; skipping reply");
            return;
        };
        if to.is_empty() {
            tracing::warn!("sms callback carried no sender; skipping reply");
            return;
        }

        let to = to.to_string();
        let message = message.to_string();
        tokio::spawn(async move {
            if let Err(e) = gateway.send(&to, &message).await {
                tracing::warn!(?e, %to, "failed to send sms reply");
            }
        });
    }
}
