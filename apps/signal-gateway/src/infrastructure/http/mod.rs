//! HTTP/REST API adapter.
//!
//! Inbound adapter receiving signals and delegating to the submit use case.

mod controller;
mod request;
mod response;

pub use controller::{AppState, create_router};
pub use request::{SignalPayload, parse_signal};
pub use response::{ApiError, HealthResponse, SignalAcceptedResponse};
