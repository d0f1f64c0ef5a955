//! Order size policy.
//!
//! A deployment checks order size one way only: either a quantity floor
//! (default plus per-symbol overrides) or a minimum order value against the
//! venue's last traded price. The two are never stacked.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::order_intent::{Side, Symbol};

/// Order size check active for this deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationMode {
    /// Reject quantities under a floor, checked locally.
    QuantityFloor {
        /// Floor when the symbol has no override.
        default_min: Decimal,
        /// Per-symbol floors, keyed by upper-case symbol.
        by_symbol: HashMap<String, Decimal>,
    },
    /// Reject orders whose value is under a minimum, using the venue price.
    NotionalFloor {
        /// Minimum order value in quote currency.
        min_order_value: Decimal,
    },
}

impl Default for ValidationMode {
    fn default() -> Self {
        Self::NotionalFloor {
            min_order_value: Decimal::new(15, 0),
        }
    }
}

/// Unit a Buy quantity is denominated in.
///
/// Sell quantities are always base-asset units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyQuantityUnit {
    /// Base-asset units, no marker on the order.
    #[default]
    Base,
    /// Quote-currency value; Buy orders carry `marketUnit: quoteCoin`.
    Quote,
}

/// Process-wide order policy, read-only after startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPolicy {
    /// Active size check.
    pub validation: ValidationMode,
    /// Buy quantity convention.
    pub buy_quantity_unit: BuyQuantityUnit,
}

impl OrderPolicy {
    /// Quantity-floor policy.
    #[must_use]
    pub fn quantity_floor(default_min: Decimal, by_symbol: HashMap<String, Decimal>) -> Self {
        let by_symbol = by_symbol
            .into_iter()
            .map(|(symbol, min)| (symbol.trim().to_uppercase(), min))
            .collect();
        Self {
            validation: ValidationMode::QuantityFloor {
                default_min,
                by_symbol,
            },
            buy_quantity_unit: BuyQuantityUnit::Base,
        }
    }

    /// Minimum-order-value policy.
    #[must_use]
    pub const fn notional_floor(min_order_value: Decimal) -> Self {
        Self {
            validation: ValidationMode::NotionalFloor { min_order_value },
            buy_quantity_unit: BuyQuantityUnit::Base,
        }
    }

    /// Set the Buy quantity convention.
    #[must_use]
    pub const fn with_buy_quantity_unit(mut self, unit: BuyQuantityUnit) -> Self {
        self.buy_quantity_unit = unit;
        self
    }

    /// Floor for `symbol`, or `None` when the notional check is active.
    #[must_use]
    pub fn min_quantity_for(&self, symbol: &Symbol) -> Option<Decimal> {
        match &self.validation {
            ValidationMode::QuantityFloor {
                default_min,
                by_symbol,
            } => Some(by_symbol.get(symbol.as_str()).copied().unwrap_or(*default_min)),
            ValidationMode::NotionalFloor { .. } => None,
        }
    }

    /// Minimum order value, or `None` when the quantity floor is active.
    #[must_use]
    pub const fn min_order_value(&self) -> Option<Decimal> {
        match &self.validation {
            ValidationMode::NotionalFloor { min_order_value } => Some(*min_order_value),
            ValidationMode::QuantityFloor { .. } => None,
        }
    }

    /// Whether a quantity on `side` is quote-currency value.
    #[must_use]
    pub fn is_quote_denominated(&self, side: Side) -> bool {
        side == Side::Buy && self.buy_quantity_unit == BuyQuantityUnit::Quote
    }
}
