//! Venue order representation and its canonical body.
//!
//! The body is signed verbatim and sent verbatim, so it is produced once, from
//! a struct whose field order fixes the JSON key order, and never re-encoded.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

use super::order_intent::{OrderIntent, Side};
use super::policy::OrderPolicy;

/// Venue product category (market segment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCategory {
    /// Spot market.
    #[default]
    Spot,
    /// USDT/USDC perpetuals and futures.
    Linear,
}

impl MarketCategory {
    /// Get the venue spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Spot => "spot",
            Self::Linear => "linear",
        }
    }
}

impl fmt::Display for MarketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const MARKET_ORDER: &str = "Market";
const GOOD_TILL_CANCELLED: &str = "GTC";
const QUOTE_COIN: &str = "quoteCoin";

/// A market order as the venue's order-create endpoint expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueOrder {
    category: MarketCategory,
    symbol: String,
    side: Side,
    order_type: &'static str,
    qty: String,
    time_in_force: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    market_unit: Option<&'static str>,
}

impl VenueOrder {
    /// Build a market order from a validated intent.
    ///
    /// The quantity travels as a string. Buys carry `marketUnit: quoteCoin`
    /// when the policy denominates buy quantities in quote currency.
    #[must_use]
    pub fn market(intent: &OrderIntent, category: MarketCategory, policy: &OrderPolicy) -> Self {
        let market_unit = policy
            .is_quote_denominated(intent.side())
            .then_some(QUOTE_COIN);

        Self {
            category,
            symbol: intent.symbol().as_str().to_string(),
            side: intent.side(),
            order_type: MARKET_ORDER,
            qty: intent.quantity().to_string(),
            time_in_force: GOOD_TILL_CANCELLED,
            market_unit,
        }
    }

    /// Get the quantity as sent.
    #[must_use]
    pub fn qty(&self) -> &str {
        &self.qty
    }

    /// Serialise to the canonical body.
    ///
    /// # Errors
    ///
    /// `Internal` if serialisation fails.
    pub fn canonical_body(&self) -> Result<CanonicalBody, GatewayError> {
        serde_json::to_string(self)
            .map(CanonicalBody)
            .map_err(|e| GatewayError::internal(format!("order serialization failed: {e}")))
    }
}

/// The exact bytes of an order, shared by the signer and the HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalBody(pub(crate) String);

impl CanonicalBody {
    /// Get the body text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
