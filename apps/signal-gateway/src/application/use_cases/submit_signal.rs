//! Submit Signal Use Case
//!
//! The per-request pipeline: Validator → Notional Guard → Order Builder →
//! Signer → Submitter. It holds no state between calls, so one instance is
//! shared by every concurrent request.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::application::ports::VenuePort;
use crate::domain::notional::{check_notional, check_quote_notional};
use crate::domain::{
    CredentialConfig, MarketCategory, OrderIntent, OrderPolicy, RawIntent, SignedOrder,
    VenueOrder, validate_intent,
};
use crate::error::GatewayError;

/// Read-only settings the pipeline runs with.
#[derive(Debug, Clone, Default)]
pub struct PipelineSettings {
    /// Order size policy.
    pub policy: OrderPolicy,
    /// Credential strategy and configured pair.
    pub credentials: CredentialConfig,
    /// Market segment orders are placed in.
    pub category: MarketCategory,
}

/// A signal the venue accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalAccepted {
    /// Venue order ID.
    pub order_id: Option<String>,
    /// Full venue response.
    pub response: Value,
}

/// Use case for turning one signal into one venue order.
pub struct SubmitSignalUseCase<V>
where
    V: VenuePort,
{
    venue: Arc<V>,
    settings: PipelineSettings,
    clock: fn() -> i64,
}

impl<V> SubmitSignalUseCase<V>
where
    V: VenuePort,
{
    /// Create a new SubmitSignalUseCase.
    pub fn new(venue: Arc<V>, settings: PipelineSettings) -> Self {
        Self {
            venue,
            settings,
            clock: system_time_millis,
        }
    }

    /// Replace the millisecond clock used for request timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Execute the use case.
    pub async fn execute(&self, raw: RawIntent) -> Result<SignalAccepted, GatewayError> {
        // 1. Validate locally, before any network call
        let intent = validate_intent(raw, &self.settings.policy, &self.settings.credentials)
            .inspect_err(|e| {
                tracing::warn!(code = %e.code(), error = %e, "Signal rejected by validator");
            })?;

        // 2. Minimum order value (best effort)
        self.enforce_min_order_value(&intent).await?;

        // 3. Build, then sign the exact bytes that will be sent
        let order = VenueOrder::market(&intent, self.settings.category, &self.settings.policy);
        let body = order.canonical_body()?;
        let signed = SignedOrder::sign(body, intent.credentials(), (self.clock)())?;

        tracing::info!(
            symbol = %intent.symbol(),
            side = %intent.side(),
            qty = %order.qty(),
            category = %self.settings.category,
            "Submitting market order"
        );

        // 4. One attempt, no retry
        let response = self.venue.create_order(&signed).await.map_err(|e| {
            tracing::error!(error = %e, symbol = %intent.symbol(), "Venue unreachable");
            GatewayError::unreachable(e.to_string())
        })?;

        tracing::info!(
            ret_code = response.ret_code,
            ret_msg = %response.ret_msg,
            order_id = ?response.order_id,
            "Venue response"
        );

        if response.is_success() {
            Ok(SignalAccepted {
                order_id: response.order_id,
                response: response.raw,
            })
        } else {
            Err(GatewayError::UpstreamRejected {
                ret_code: response.ret_code,
                ret_msg: response.ret_msg,
                response: response.raw,
            })
        }
    }

    /// Reject orders under the minimum order value.
    ///
    /// A failed or non-positive price lookup skips the check instead of
    /// blocking the signal.
    async fn enforce_min_order_value(&self, intent: &OrderIntent) -> Result<(), GatewayError> {
        let policy = &self.settings.policy;
        let Some(minimum) = policy.min_order_value() else {
            return Ok(());
        };
        if minimum <= Decimal::ZERO {
            return Ok(());
        }

        if policy.is_quote_denominated(intent.side()) {
            check_quote_notional(intent.quantity(), minimum)?;
            return Ok(());
        }

        match self
            .venue
            .last_price(self.settings.category, intent.symbol())
            .await
        {
            Ok(price) if price > Decimal::ZERO => {
                let notional =
                    check_notional(intent.quantity(), price, minimum).inspect_err(|e| {
                        tracing::warn!(
                            symbol = %intent.symbol(),
                            error = %e,
                            "Order value below minimum"
                        );
                    })?;
                tracing::debug!(
                    symbol = %intent.symbol(),
                    %price,
                    %notional,
                    "Order value check passed"
                );
            }
            Ok(price) => {
                tracing::warn!(
                    symbol = %intent.symbol(),
                    %price,
                    "Non-positive last price, skipping order value check"
                );
            }
            Err(e) => {
                tracing::warn!(
                    symbol = %intent.symbol(),
                    error = %e,
                    "Price lookup failed, skipping order value check"
                );
            }
        }

        Ok(())
    }
}

fn system_time_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::application::ports::{VenueError, VenueResponse};
    use crate::domain::signing::sign;
    use crate::domain::{BuyQuantityUnit, CredentialSource, Credentials, Symbol};
    use crate::error::ErrorCode;

    /// Scripted venue that records what it was asked.
    struct StubVenue {
        price: Result<Decimal, VenueError>,
        response: Result<VenueResponse, VenueError>,
        price_calls: Mutex<Vec<String>>,
        orders: Mutex<Vec<SignedOrder>>,
    }

    impl StubVenue {
        fn new(price: Result<Decimal, VenueError>) -> Self {
            Self {
                price,
                response: Ok(accepted("order-1")),
                price_calls: Mutex::new(Vec::new()),
                orders: Mutex::new(Vec::new()),
            }
        }

        fn with_response(mut self, response: Result<VenueResponse, VenueError>) -> Self {
            self.response = response;
            self
        }

        fn price_calls(&self) -> usize {
            self.price_calls.lock().unwrap().len()
        }

        fn orders(&self) -> Vec<SignedOrder> {
            self.orders.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VenuePort for StubVenue {
        async fn last_price(
            &self,
            _category: MarketCategory,
            symbol: &Symbol,
        ) -> Result<Decimal, VenueError> {
            self.price_calls
                .lock()
                .unwrap()
                .push(symbol.as_str().to_string());
            self.price.clone()
        }

        async fn create_order(&self, order: &SignedOrder) -> Result<VenueResponse, VenueError> {
            self.orders.lock().unwrap().push(order.clone());
            self.response.clone()
        }
    }

    fn accepted(order_id: &str) -> VenueResponse {
        let raw = json!({"retCode": 0, "retMsg": "OK", "result": {"orderId": order_id}});
        VenueResponse {
            ret_code: 0,
            ret_msg: "OK".to_string(),
            order_id: Some(order_id.to_string()),
            raw,
        }
    }

    fn signal(side: &str, qty: &str) -> RawIntent {
        RawIntent {
            symbol: Some("btcusdt".to_string()),
            side: Some(side.to_string()),
            qty: Some(qty.to_string()),
            api_key: Some("key".to_string()),
            secret: Some("secret".to_string()),
        }
    }

    fn settings(policy: OrderPolicy) -> PipelineSettings {
        PipelineSettings {
            policy,
            credentials: CredentialConfig::new(CredentialSource::Request, None),
            category: MarketCategory::Spot,
        }
    }

    fn fixed_clock() -> i64 {
        1_700_000_000_000
    }

    fn use_case(venue: &Arc<StubVenue>, policy: OrderPolicy) -> SubmitSignalUseCase<StubVenue> {
        SubmitSignalUseCase::new(Arc::clone(venue), settings(policy)).with_clock(fixed_clock)
    }

    #[tokio::test]
    async fn notional_below_minimum_is_rejected_before_submission() {
        let venue = Arc::new(StubVenue::new(Ok(Decimal::new(100, 0))));
        let uc = use_case(&venue, OrderPolicy::notional_floor(Decimal::new(15, 0)));

        let err = uc.execute(signal("buy", "0.1")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::BelowMinimumNotional);
        assert!(venue.orders().is_empty());
    }

    #[tokio::test]
    async fn notional_above_minimum_is_submitted() {
        let venue = Arc::new(StubVenue::new(Ok(Decimal::new(100, 0))));
        let uc = use_case(&venue, OrderPolicy::notional_floor(Decimal::new(15, 0)));

        let accepted = uc.execute(signal("buy", "0.2")).await.unwrap();

        assert_eq!(accepted.order_id.as_deref(), Some("order-1"));
        assert_eq!(venue.price_calls(), 1);
        assert_eq!(venue.orders().len(), 1);
    }

    #[tokio::test]
    async fn huge_quantity_clears_minimum_without_overflow() {
        let venue = Arc::new(StubVenue::new(Ok(Decimal::new(100, 0))));
        let uc = use_case(&venue, OrderPolicy::notional_floor(Decimal::new(15, 0)));

        let accepted = uc
            .execute(signal("buy", "79228162514264337593543950335"))
            .await
            .unwrap();

        assert_eq!(accepted.order_id.as_deref(), Some("order-1"));
        assert_eq!(venue.orders().len(), 1);
    }

    #[tokio::test]
    async fn failed_price_lookup_degrades_to_submission() {
        let venue = Arc::new(StubVenue::new(Err(VenueError::ConnectionError {
            message: "timeout".to_string(),
        })));
        let uc = use_case(&venue, OrderPolicy::notional_floor(Decimal::new(15, 0)));

        let result = uc.execute(signal("buy", "0.0001")).await;

        assert!(result.is_ok());
        assert_eq!(venue.orders().len(), 1);
    }

    #[tokio::test]
    async fn zero_price_degrades_to_submission() {
        let venue = Arc::new(StubVenue::new(Ok(Decimal::ZERO)));
        let uc = use_case(&venue, OrderPolicy::notional_floor(Decimal::new(15, 0)));

        assert!(uc.execute(signal("sell", "0.0001")).await.is_ok());
        assert_eq!(venue.orders().len(), 1);
    }

    #[tokio::test]
    async fn quantity_floor_mode_never_reads_price() {
        let venue = Arc::new(StubVenue::new(Ok(Decimal::new(100, 0))));
        let policy = OrderPolicy::quantity_floor(Decimal::new(1, 3), Default::default());
        let uc = use_case(&venue, policy);

        uc.execute(signal("sell", "0.001")).await.unwrap();

        assert_eq!(venue.price_calls(), 0);
    }

    #[tokio::test]
    async fn validation_failure_makes_no_venue_call() {
        let venue = Arc::new(StubVenue::new(Ok(Decimal::new(100, 0))));
        let uc = use_case(&venue, OrderPolicy::default());

        let err = uc.execute(signal("hold", "1")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidSide);
        assert_eq!(venue.price_calls(), 0);
        assert!(venue.orders().is_empty());
    }

    #[tokio::test]
    async fn quote_denominated_buy_skips_price_lookup() {
        let venue = Arc::new(StubVenue::new(Ok(Decimal::new(100, 0))));
        let policy = OrderPolicy::notional_floor(Decimal::new(15, 0))
            .with_buy_quantity_unit(BuyQuantityUnit::Quote);
        let uc = use_case(&venue, policy);

        let err = uc.execute(signal("buy", "10")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BelowMinimumNotional);

        uc.execute(signal("buy", "20")).await.unwrap();
        assert_eq!(venue.price_calls(), 0);

        let sent = venue.orders();
        assert!(sent[0].body().as_str().contains(r#""marketUnit":"quoteCoin""#));
    }

    #[tokio::test]
    async fn submitted_order_is_signed_over_sent_body() {
        let venue = Arc::new(StubVenue::new(Ok(Decimal::new(100, 0))));
        let uc = use_case(&venue, OrderPolicy::default());

        uc.execute(signal("Sell", "1")).await.unwrap();

        let sent = venue.orders().remove(0);
        assert_eq!(sent.timestamp(), "1700000000000");
        assert_eq!(
            sent.body().as_str(),
            r#"{"category":"spot","symbol":"BTCUSDT","side":"Sell","orderType":"Market","qty":"1","timeInForce":"GTC"}"#
        );
        let expected =
            sign("secret", "1700000000000", "key", "5000", sent.body().as_str()).unwrap();
        assert_eq!(sent.signature(), expected);
    }

    #[tokio::test]
    async fn non_zero_ret_code_is_upstream_rejected() {
        let raw = json!({"retCode": 10001, "retMsg": "bad symbol", "result": {}});
        let venue = Arc::new(
            StubVenue::new(Ok(Decimal::new(100, 0))).with_response(Ok(VenueResponse {
                ret_code: 10001,
                ret_msg: "bad symbol".to_string(),
                order_id: None,
                raw: raw.clone(),
            })),
        );
        let uc = use_case(&venue, OrderPolicy::default());

        match uc.execute(signal("buy", "1")).await.unwrap_err() {
            GatewayError::UpstreamRejected {
                ret_code,
                ret_msg,
                response,
            } => {
                assert_eq!(ret_code, 10001);
                assert_eq!(ret_msg, "bad symbol");
                assert_eq!(response, raw);
            }
            other => panic!("expected UpstreamRejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_failure_is_upstream_unreachable() {
        let venue = Arc::new(StubVenue::new(Ok(Decimal::new(100, 0))).with_response(Err(
            VenueError::ConnectionError {
                message: "connection refused".to_string(),
            },
        )));
        let uc = use_case(&venue, OrderPolicy::default());

        let err = uc.execute(signal("buy", "1")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::UpstreamUnreachable);
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn configured_credentials_sign_the_order() {
        let venue = Arc::new(StubVenue::new(Ok(Decimal::new(100, 0))));
        let settings = PipelineSettings {
            policy: OrderPolicy::default(),
            credentials: CredentialConfig::new(
                CredentialSource::Configured,
                Some(Credentials::new("cfg-key".to_string(), "cfg-secret".to_string())),
            ),
            category: MarketCategory::Linear,
        };
        let uc = SubmitSignalUseCase::new(Arc::clone(&venue), settings).with_clock(fixed_clock);

        uc.execute(signal("buy", "1")).await.unwrap();

        let sent = venue.orders().remove(0);
        assert_eq!(sent.api_key(), "cfg-key");
        assert!(sent.body().as_str().starts_with(r#"{"category":"linear""#));
    }
}
