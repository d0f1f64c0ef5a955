//! Order policy settings.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{BuyQuantityUnit, OrderPolicy};

/// Order policy configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Validation strategy.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Unit of Buy quantities.
    #[serde(default)]
    pub buy_quantity_unit: BuyQuantityUnit,
}

/// Validation strategy, selected by `mode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ValidationConfig {
    /// Minimum base quantity, optionally per symbol.
    QuantityFloor {
        /// Floor for symbols without an override.
        #[serde(default)]
        min_qty_default: Decimal,
        /// Per-symbol floors.
        #[serde(default)]
        min_qty_by_symbol: HashMap<String, Decimal>,
    },
    /// Minimum order value in quote currency.
    NotionalFloor {
        /// Minimum `qty * price`.
        #[serde(default = "default_min_order_value")]
        min_order_value: Decimal,
    },
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::NotionalFloor {
            min_order_value: default_min_order_value(),
        }
    }
}

fn default_min_order_value() -> Decimal {
    Decimal::new(15, 0)
}

impl PolicyConfig {
    /// Build the runtime policy.
    #[must_use]
    pub fn order_policy(&self) -> OrderPolicy {
        let policy = match &self.validation {
            ValidationConfig::QuantityFloor {
                min_qty_default,
                min_qty_by_symbol,
            } => OrderPolicy::quantity_floor(*min_qty_default, min_qty_by_symbol.clone()),
            ValidationConfig::NotionalFloor { min_order_value } => {
                OrderPolicy::notional_floor(*min_order_value)
            }
        };
        policy.with_buy_quantity_unit(self.buy_quantity_unit)
    }

    /// Every configured threshold with a name for error messages.
    pub(super) fn thresholds(&self) -> Vec<(String, Decimal)> {
        match &self.validation {
            ValidationConfig::QuantityFloor {
                min_qty_default,
                min_qty_by_symbol,
            } => std::iter::once(("min_qty_default".to_string(), *min_qty_default))
                .chain(
                    min_qty_by_symbol
                        .iter()
                        .map(|(symbol, min)| (format!("min_qty_by_symbol.{symbol}"), *min)),
                )
                .collect(),
            ValidationConfig::NotionalFloor { min_order_value } => {
                vec![("min_order_value".to_string(), *min_order_value)]
            }
        }
    }
}
