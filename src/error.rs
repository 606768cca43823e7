//! API error taxonomy.
//!
//! Only control-plane validation failures and unexpected analysis
//! failures reach HTTP clients. Best-effort side channels (SMS replies,
//! the completion provider) have their own error types that are logged
//! and degraded, never surfaced here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A status value outside {ON, OFF} was supplied.
    #[error("Status must be 'ON' or 'OFF'")]
    InvalidStatus,

    /// An analysis was requested with no data.
    #[error("No data provided for analysis")]
    EmptyPayload,

    /// Anything unexpected during analysis. Carries a short description
    /// only, no internal detail.
    #[error("Analysis failed: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidStatus | ApiError::EmptyPayload => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_client_errors() {
        assert_eq!(ApiError::InvalidStatus.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::EmptyPayload.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unexpected_failures_are_server_errors() {
        let err = ApiError::Internal("boom".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Analysis failed: boom");
    }
}
