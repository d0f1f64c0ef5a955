// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::items_after_statements
    )
)]

//! Signal Gateway - Rust Core Library
//!
//! Turns trade signals delivered over a webhook into signed market orders on
//! Bybit's v5 REST API.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: pure request-scoped logic with no I/O
//!   - `order_intent`: side and symbol normalisation, the validated intent
//!   - `policy`: minimum quantity / minimum order value policy
//!   - `validation`: the fail-fast validator
//!   - `notional`: minimum order value arithmetic
//!   - `order`: the canonical order body
//!   - `signing`: HMAC-SHA256 request signing
//!
//! - **Application**: the `VenuePort` and the `SubmitSignalUseCase` pipeline
//!
//! - **Infrastructure**: adapters
//!   - `http`: axum webhook and health endpoints
//!   - `venue::bybit`: reqwest client for the venue
//!
//! Every request runs the pipeline independently. Nothing is shared between
//! requests except the read-only configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Configuration loading and validation.
pub mod config;

/// Error taxonomy and HTTP mapping.
pub mod error;

/// Tracing subscriber setup.
pub mod telemetry;

/// Domain layer - pure business logic.
pub mod domain;

/// Application layer - use cases and port definitions.
pub mod application;

/// Infrastructure layer - adapters and external integrations.
pub mod infrastructure;

pub use application::ports::{VenueError, VenuePort, VenueResponse};
pub use application::use_cases::{PipelineSettings, SignalAccepted, SubmitSignalUseCase};
pub use config::{Config, ConfigError, load_config, load_config_from_string};
pub use domain::{
    BuyQuantityUnit, CanonicalBody, CredentialConfig, CredentialSource, Credentials,
    MarketCategory, OrderIntent, OrderPolicy, RawIntent, Side, SignedOrder, Symbol,
    ValidationMode, VenueOrder,
};
pub use error::{ErrorCode, GatewayError, HttpErrorResponse};
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::venue::bybit::{BybitConfig, BybitEnvironment, BybitVenueAdapter};
