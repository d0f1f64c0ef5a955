//! Bybit v5 response types.
//!
//! Every v5 endpoint wraps its payload in the same envelope; a non-zero
//! `retCode` is the venue's rejection, independent of the HTTP status.

use serde::Deserialize;

// ============================================================================
// Envelope
// ============================================================================

/// Common v5 response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BybitEnvelope<T> {
    /// Return code, zero on success.
    pub ret_code: i64,
    /// Return message.
    #[serde(default)]
    pub ret_msg: String,
    /// Endpoint payload. Often `{}` on failure.
    pub result: Option<T>,
}

// ============================================================================
// Market Data
// ============================================================================

/// `GET /v5/market/tickers` result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TickerResult {
    /// Tickers; one entry when queried by symbol.
    #[serde(default)]
    pub list: Vec<Ticker>,
}

/// One ticker entry. Only the fields read here are mapped.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    /// Last traded price, as a decimal string.
    pub last_price: Option<String>,
}

// ============================================================================
// Orders
// ============================================================================

/// `POST /v5/order/create` result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateResult {
    /// Venue order ID.
    pub order_id: Option<String>,
}
