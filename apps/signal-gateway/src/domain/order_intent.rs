//! Order intent: what a signal asks the gateway to do.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::credentials::Credentials;

/// Order side, in the venue's capitalised form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl Side {
    /// Normalise a side case-insensitively. Anything but buy/sell is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "buy" => Some(Self::Buy),
            "sell" => Some(Self::Sell),
            _ => None,
        }
    }

    /// Get the venue spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Sell => "Sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A venue trading pair, normalised to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Trim and upper-case a raw symbol. Empty results are `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signal fields as they arrived, before any validation.
///
/// `qty` is kept textual so JSON numbers and strings take the same parse
/// path.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawIntent {
    /// Trading pair.
    pub symbol: Option<String>,
    /// Side, any case.
    pub side: Option<String>,
    /// Quantity text.
    pub qty: Option<String>,
    /// Request-supplied API key.
    pub api_key: Option<String>,
    /// Request-supplied API secret.
    pub secret: Option<String>,
}

impl fmt::Debug for RawIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawIntent")
            .field("symbol", &self.symbol)
            .field("side", &self.side)
            .field("qty", &self.qty)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// A validated order intent. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderIntent {
    symbol: Symbol,
    side: Side,
    quantity: Decimal,
    credentials: Credentials,
}

impl OrderIntent {
    /// Create a validated intent.
    #[must_use]
    pub const fn new(
        symbol: Symbol,
        side: Side,
        quantity: Decimal,
        credentials: Credentials,
    ) -> Self {
        Self {
            symbol,
            side,
            quantity,
            credentials,
        }
    }

    /// Get the symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Get the side.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Get the quantity.
    #[must_use]
    pub const fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Get the credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}
