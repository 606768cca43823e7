//! Inbound SMS webhook.
//!
//! The gateway posts a form with the message text and sender. A valid
//! ON/OFF command mutates state and broadcasts it; everything else gets
//! an invalid-command reply. The webhook response is decoupled from the
//! reply delivery: the gateway always receives a success acknowledgment.

use axum::extract::State;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::device::DeviceStatus;
use crate::server::state::AppState;

/// Reply sent when the message is not a recognized command.
pub const INVALID_COMMAND_REPLY: &str = "Invalid command. Please send either 'ON' or 'OFF'";

/// Form payload delivered by the SMS gateway.
#[derive(Debug, Deserialize)]
pub struct SmsCallbackForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub from: String,
}

/// Acknowledgment returned to the gateway.
#[derive(Debug, Serialize)]
pub struct SmsAck {
    pub status: &'static str,
    pub message: String,
}

/// POST /sms/callback - Gateway webhook for inbound messages.
pub async fn sms_callback(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<SmsCallbackForm>,
) -> Json<SmsAck> {
    let command = payload.text.trim().to_uppercase();

    let reply = match command.parse::<DeviceStatus>() {
        Ok(status) => {
            let new_state = state.device.set(status);
            state.broadcast_state(&new_state);
            tracing::info!(%status, from = %payload.from, "device state changed via sms");
            format!("Device has been turned {status}")
        }
        Err(_) => {
            tracing::debug!(text = %payload.text, "ignoring unrecognized sms command");
            INVALID_COMMAND_REPLY.to_string()
        }
    };

    state.send_sms_reply(&payload.from, &reply);

    Json(SmsAck {
        status: "success",
        message: reply,
    })
}
