//! Minimum order value arithmetic.

use rust_decimal::Decimal;

use crate::error::GatewayError;

/// Check a base-unit quantity against the minimum order value at `price`.
///
/// Returns the computed order value when it clears the minimum. A product
/// too large for `Decimal` saturates to `Decimal::MAX`.
///
/// # Errors
///
/// `BelowMinimumNotional` when `quantity * price < minimum`.
pub fn check_notional(
    quantity: Decimal,
    price: Decimal,
    minimum: Decimal,
) -> Result<Decimal, GatewayError> {
    let notional = quantity.checked_mul(price).unwrap_or(Decimal::MAX);
    if notional < minimum {
        return Err(GatewayError::BelowMinimumNotional {
            notional,
            price: Some(price),
            minimum,
            received_qty: quantity,
        });
    }
    Ok(notional)
}

/// Check a quantity that is already quote-currency value.
///
/// # Errors
///
/// `BelowMinimumNotional` when `quantity < minimum`.
pub fn check_quote_notional(quantity: Decimal, minimum: Decimal) -> Result<Decimal, GatewayError> {
    if quantity < minimum {
        return Err(GatewayError::BelowMinimumNotional {
            notional: quantity,
            price: None,
            minimum,
            received_qty: quantity,
        });
    }
    Ok(quantity)
}
