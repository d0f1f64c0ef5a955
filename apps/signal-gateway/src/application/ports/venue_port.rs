//! Venue Port (Driven Port)
//!
//! Interface to the trading venue: one public price read and one signed
//! order submission. Implementations make exactly one attempt per call.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::domain::{MarketCategory, SignedOrder, Symbol};

/// The venue's answer to an order submission.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueResponse {
    /// Venue return code; zero means accepted.
    pub ret_code: i64,
    /// Venue message.
    pub ret_msg: String,
    /// Venue order ID, present on success.
    pub order_id: Option<String>,
    /// The full response as received.
    pub raw: Value,
}

impl VenueResponse {
    /// Whether the venue accepted the order.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.ret_code == 0
    }
}

/// Venue port error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum VenueError {
    /// The request never produced a response.
    #[error("Venue connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// The response could not be read as a venue response.
    #[error("Unreadable venue response: {message}")]
    InvalidResponse {
        /// Error details.
        message: String,
    },

    /// The venue has no usable price for the symbol.
    #[error("Price unavailable for {symbol}: {message}")]
    PriceUnavailable {
        /// The symbol queried.
        symbol: String,
        /// Error details.
        message: String,
    },
}

/// Port for venue interactions.
#[async_trait]
pub trait VenuePort: Send + Sync {
    /// Latest traded price for `symbol` in `category`.
    async fn last_price(
        &self,
        category: MarketCategory,
        symbol: &Symbol,
    ) -> Result<Decimal, VenueError>;

    /// Submit a signed order.
    ///
    /// A readable response is `Ok` whatever its return code; the caller
    /// decides what a non-zero code means.
    async fn create_order(&self, order: &SignedOrder) -> Result<VenueResponse, VenueError>;
}
