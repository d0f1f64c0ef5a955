//! HTTP response DTOs.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::use_cases::SignalAccepted;
use crate::error::GatewayError;

/// Response for an order the venue accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalAcceptedResponse {
    /// Summary line.
    pub message: String,
    /// Venue order ID.
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
    /// Full venue response.
    pub data: Value,
}

impl From<SignalAccepted> for SignalAcceptedResponse {
    fn from(accepted: SignalAccepted) -> Self {
        Self {
            message: "order accepted".to_string(),
            order_id: accepted.order_id,
            data: accepted.response,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Venue environment.
    pub environment: String,
}

/// API error rendered as the gateway's JSON error body.
#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        if code.is_validation() {
            tracing::debug!(%code, "Responding with local rejection");
        } else {
            tracing::info!(%code, status = %self.0.status(), "Responding with pipeline error");
        }
        (self.0.status(), Json(self.0.to_http_response())).into_response()
    }
}
