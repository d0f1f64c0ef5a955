//! HTTP Controller (Driver Adapter)
//!
//! Axum router exposing the signal webhook and a health check.

use std::any::Any;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::Method,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::application::ports::VenuePort;
use crate::application::use_cases::SubmitSignalUseCase;
use crate::error::GatewayError;

use super::request::parse_signal;
use super::response::{ApiError, HealthResponse, SignalAcceptedResponse};

/// Application state shared across handlers.
pub struct AppState<V>
where
    V: VenuePort,
{
    /// Use case for submitting signals.
    pub submit_signal: Arc<SubmitSignalUseCase<V>>,
    /// Application version.
    pub version: String,
    /// Venue environment name, reported by the health check.
    pub environment: String,
    /// Path the webhook is mounted on.
    pub webhook_path: String,
}

impl<V> Clone for AppState<V>
where
    V: VenuePort,
{
    fn clone(&self) -> Self {
        Self {
            submit_signal: Arc::clone(&self.submit_signal),
            version: self.version.clone(),
            environment: self.environment.clone(),
            webhook_path: self.webhook_path.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
///
/// The webhook answers POST only; every other method gets a 405 JSON body
/// and never reaches the pipeline.
pub fn create_router<V>(state: AppState<V>) -> Router
where
    V: VenuePort + 'static,
{
    let webhook_path = state.webhook_path.clone();

    Router::new()
        .route("/health", get(health_check::<V>))
        .route(
            &webhook_path,
            post(receive_signal::<V>).fallback(method_not_allowed),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<V>(State(state): State<AppState<V>>) -> impl IntoResponse
where
    V: VenuePort,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        environment: state.environment.clone(),
    })
}

/// Signal webhook endpoint.
async fn receive_signal<V>(
    State(state): State<AppState<V>>,
    body: Bytes,
) -> Result<Json<SignalAcceptedResponse>, ApiError>
where
    V: VenuePort,
{
    let raw = parse_signal(&body).inspect_err(|e| {
        tracing::warn!(code = %e.code(), bytes = body.len(), "Unreadable signal body");
    })?;

    tracing::info!(
        symbol = raw.symbol.as_deref().unwrap_or_default(),
        side = raw.side.as_deref().unwrap_or_default(),
        qty = raw.qty.as_deref().unwrap_or_default(),
        "Signal received"
    );

    let accepted = state.submit_signal.execute(raw).await?;
    Ok(Json(accepted.into()))
}

/// Any non-POST method on the webhook.
async fn method_not_allowed(method: Method) -> ApiError {
    tracing::warn!(%method, "Rejected non-POST webhook call");
    ApiError(GatewayError::MethodNotAllowed {
        method: method.to_string(),
    })
}

/// Render a handler panic as a 500 JSON body.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("handler panicked");

    tracing::error!(panic = message, "Request handler panicked");
    ApiError(GatewayError::internal(message)).into_response()
}
