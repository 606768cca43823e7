//! Manual device control endpoints.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::device::{DeviceState, DeviceStatus};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Body of a manual state change request.
#[derive(Debug, Deserialize)]
pub struct StateChangeRequest {
    pub status: String,
}

/// Response for state-mutating control calls.
#[derive(Debug, Serialize)]
pub struct ControlResponse {
    pub status: &'static str,
    pub message: String,
    pub current_state: DeviceState,
}

/// GET /state - Get current device state.
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<DeviceState> {
    Json(state.device.get())
}

/// POST /control - Manually set device state.
pub async fn control_device(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StateChangeRequest>,
) -> Result<Json<ControlResponse>, ApiError> {
    let status: DeviceStatus = request.status.parse()?;
    let new_state = state.device.set(status);
    state.broadcast_state(&new_state);
    tracing::info!(%status, "device state set via control api");

    Ok(Json(ControlResponse {
        status: "success",
        message: format!("Device has been turned {status}"),
        current_state: new_state,
    }))
}

/// POST /toggle - Toggle device state between ON and OFF.
pub async fn toggle_device(State(state): State<Arc<AppState>>) -> Json<ControlResponse> {
    let new_state = state.device.toggle();
    state.broadcast_state(&new_state);
    tracing::info!(status = %new_state.status, "device state toggled via control api");

    Json(ControlResponse {
        status: "success",
        message: format!("Device has been toggled to {}", new_state.status),
        current_state: new_state,
    })
}
