//! Signal Gateway Binary
//!
//! Starts the webhook server.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin signal-gateway
//! ```
//!
//! # Environment Variables
//!
//! - `GATEWAY_CONFIG`: path to the YAML config (default: `config.yaml`)
//! - `RUST_LOG`: log filter (default: `signal_gateway=info,tower_http=info`)
//! - `LOG_FORMAT`: `json` for JSON log lines
//!
//! Anything referenced as `${VAR}` in the config file, e.g. `BYBIT_API_KEY`.

use std::sync::Arc;

use anyhow::Context;
use signal_gateway::config::{Config, DEFAULT_CONFIG_PATH, load_config};
use signal_gateway::infrastructure::http::{AppState, create_router};
use signal_gateway::infrastructure::venue::bybit::BybitVenueAdapter;
use signal_gateway::telemetry::{LogFormat, init_tracing};
use signal_gateway::{PipelineSettings, SubmitSignalUseCase};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing(LogFormat::from_env());

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting signal gateway");

    let config_path =
        std::env::var("GATEWAY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(Some(config_path.as_str()))
        .with_context(|| format!("loading configuration from {config_path}"))?;

    let settings = config.pipeline_settings();
    log_config(&config, &settings);

    let venue = BybitVenueAdapter::new(&config.venue.bybit_config())
        .context("creating venue client")?;
    tracing::info!(
        environment = %venue.environment(),
        base_url = venue.base_url(),
        "Venue client ready"
    );

    let state = AppState {
        submit_signal: Arc::new(SubmitSignalUseCase::new(Arc::new(venue), settings)),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.venue.environment.to_string(),
        webhook_path: config.server.webhook_path.clone(),
    };
    let app = create_router(state);

    let addr = config.server.listen_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!(%addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  POST {}", config.server.webhook_path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Signal gateway stopped");
    Ok(())
}

/// Load `.env` from the working directory, if present.
fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("Ignoring unreadable .env file: {e}");
    }
}

/// Log the effective configuration. Credentials are never printed.
fn log_config(config: &Config, settings: &PipelineSettings) {
    tracing::info!(
        environment = %config.venue.environment,
        category = %settings.category,
        credential_source = settings.credentials.source.as_str(),
        configured_credentials = settings.credentials.configured.is_some(),
        policy = ?settings.policy.validation,
        buy_quantity_unit = ?settings.policy.buy_quantity_unit,
        request_timeout_ms = ?config.venue.request_timeout_ms,
        "Configuration loaded"
    );

    if config.venue.environment.is_mainnet() {
        tracing::warn!("Mainnet environment: orders use real funds");
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
