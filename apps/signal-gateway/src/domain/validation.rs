//! Signal validation.
//!
//! Runs synchronously and before any network call. Checks run in a fixed
//! order (side, symbol, quantity, quantity floor, credentials) and the first
//! failure wins.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::GatewayError;

use super::credentials::{CredentialConfig, Credentials};
use super::order_intent::{OrderIntent, RawIntent, Side, Symbol};
use super::policy::OrderPolicy;

/// Validate and normalise a raw signal into an [`OrderIntent`].
///
/// # Errors
///
/// `InvalidSide`, `InvalidSymbol`, `InvalidQuantity`, `BelowMinimumQuantity`
/// or `MissingCredentials`.
pub fn validate_intent(
    raw: RawIntent,
    policy: &OrderPolicy,
    credentials: &CredentialConfig,
) -> Result<OrderIntent, GatewayError> {
    let raw_side = raw.side.unwrap_or_default();
    let side = Side::parse(&raw_side).ok_or(GatewayError::InvalidSide { received: raw_side })?;

    let raw_symbol = raw.symbol.unwrap_or_default();
    let symbol = Symbol::parse(&raw_symbol).ok_or(GatewayError::InvalidSymbol {
        received: raw_symbol,
    })?;

    let raw_qty = raw.qty.unwrap_or_default();
    let quantity = parse_quantity(&raw_qty).ok_or(GatewayError::InvalidQuantity {
        received: raw_qty,
    })?;

    if let Some(minimum) = policy.min_quantity_for(&symbol)
        && quantity < minimum
    {
        return Err(GatewayError::BelowMinimumQuantity {
            symbol: symbol.as_str().to_string(),
            minimum,
            received: quantity,
        });
    }

    let from_request = Credentials::from_parts(raw.api_key.as_deref(), raw.secret.as_deref());
    let credentials = credentials
        .resolve(from_request)
        .ok_or(GatewayError::MissingCredentials)?;

    Ok(OrderIntent::new(symbol, side, quantity, credentials))
}

/// Parse a strictly positive decimal quantity.
///
/// Accepts plain (`"0.25"`) and scientific (`"2.5e-1"`) notation. NaN,
/// infinities and anything non-numeric fail to parse.
fn parse_quantity(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let quantity = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()?;
    (quantity > Decimal::ZERO).then_some(quantity)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::credentials::CredentialSource;
    use crate::error::ErrorCode;

    fn raw(side: &str, symbol: &str, qty: &str) -> RawIntent {
        RawIntent {
            symbol: Some(symbol.to_string()),
            side: Some(side.to_string()),
            qty: Some(qty.to_string()),
            api_key: Some("key".to_string()),
            secret: Some("secret".to_string()),
        }
    }

    fn request_creds() -> CredentialConfig {
        CredentialConfig::new(CredentialSource::Request, None)
    }

    fn floor_policy() -> OrderPolicy {
        let mut overrides = HashMap::new();
        overrides.insert("BTCUSDT".to_string(), Decimal::new(1, 3));
        OrderPolicy::quantity_floor(Decimal::new(1, 1), overrides)
    }

    #[test]
    fn valid_signal_is_normalized() {
        let intent =
            validate_intent(raw("buy", "btcusdt", "0.01"), &floor_policy(), &request_creds())
                .unwrap();

        assert_eq!(intent.side(), Side::Buy);
        assert_eq!(intent.symbol().as_str(), "BTCUSDT");
        assert_eq!(intent.quantity(), Decimal::new(1, 2));
        assert_eq!(intent.credentials().api_key(), "key");
    }

    #[test]
    fn side_variants_all_normalize_to_buy() {
        for side in ["buy", "BUY", "Buy"] {
            let intent =
                validate_intent(raw(side, "ETHUSDT", "1"), &floor_policy(), &request_creds())
                    .unwrap();
            assert_eq!(intent.side(), Side::Buy);
        }
    }

    #[test]
    fn hold_is_invalid_side() {
        let err = validate_intent(raw("hold", "ETHUSDT", "1"), &floor_policy(), &request_creds())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidSide);
    }

    #[test]
    fn missing_symbol_is_invalid() {
        let mut signal = raw("sell", "", "1");
        let err = validate_intent(signal.clone(), &floor_policy(), &request_creds()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidSymbol);

        signal.symbol = None;
        let err = validate_intent(signal, &floor_policy(), &request_creds()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidSymbol);
    }

    #[test]
    fn non_positive_or_garbage_quantity_is_invalid() {
        for qty in ["0", "-1", "abc", "", "NaN", "inf", "{{strategy.order.contracts}}"] {
            let err = validate_intent(raw("buy", "ETHUSDT", qty), &floor_policy(), &request_creds())
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidQuantity, "qty {qty:?}");
        }
    }

    #[test]
    fn scientific_quantity_is_accepted() {
        let intent =
            validate_intent(raw("sell", "ETHUSDT", "2.5e-1"), &floor_policy(), &request_creds())
                .unwrap();
        assert_eq!(intent.quantity(), Decimal::new(25, 2));
    }

    #[test]
    fn quantity_equal_to_floor_is_accepted() {
        let result =
            validate_intent(raw("buy", "ETHUSDT", "0.1"), &floor_policy(), &request_creds());
        assert!(result.is_ok());
    }

    #[test]
    fn quantity_just_below_floor_is_rejected() {
        let err = validate_intent(
            raw("buy", "ETHUSDT", "0.0999999"),
            &floor_policy(),
            &request_creds(),
        )
        .unwrap_err();

        match err {
            GatewayError::BelowMinimumQuantity {
                symbol,
                minimum,
                received,
            } => {
                assert_eq!(symbol, "ETHUSDT");
                assert_eq!(minimum, Decimal::new(1, 1));
                assert_eq!(received, Decimal::new(999_999, 7));
            }
            other => panic!("expected BelowMinimumQuantity, got {other:?}"),
        }
    }

    #[test]
    fn symbol_override_floor_applies() {
        // 0.005 is under the 0.1 default but over the 0.001 BTC override
        let result =
            validate_intent(raw("buy", "btcusdt", "0.005"), &floor_policy(), &request_creds());
        assert!(result.is_ok());
    }

    #[test]
    fn notional_policy_skips_quantity_floor() {
        let policy = OrderPolicy::notional_floor(Decimal::new(15, 0));
        let result = validate_intent(raw("buy", "ETHUSDT", "0.0000001"), &policy, &request_creds());
        assert!(result.is_ok());
    }

    #[test]
    fn missing_credentials_rejected() {
        let mut signal = raw("buy", "ETHUSDT", "1");
        signal.secret = None;
        let err = validate_intent(signal, &floor_policy(), &request_creds()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingCredentials);
    }

    #[test]
    fn configured_credentials_fill_in() {
        let mut signal = raw("buy", "ETHUSDT", "1");
        signal.api_key = None;
        signal.secret = None;
        let creds = CredentialConfig::new(
            CredentialSource::RequestOrConfigured,
            Some(Credentials::new("cfg".to_string(), "cfg-secret".to_string())),
        );

        let intent = validate_intent(signal, &floor_policy(), &creds).unwrap();
        assert_eq!(intent.credentials().api_key(), "cfg");
    }

    #[test]
    fn side_is_checked_before_quantity() {
        let err = validate_intent(raw("hold", "", "-5"), &floor_policy(), &request_creds())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidSide);
    }
}
