//! Bybit venue adapter implementing VenuePort.

use std::str::FromStr;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::application::ports::{VenueError, VenuePort, VenueResponse};
use crate::domain::{MarketCategory, SignedOrder, Symbol};

use super::api_types::{BybitEnvelope, OrderCreateResult, TickerResult};
use super::config::{BybitConfig, BybitEnvironment};
use super::error::BybitError;
use super::http_client::BybitHttpClient;

const TICKERS_PATH: &str = "/v5/market/tickers";
const ORDER_CREATE_PATH: &str = "/v5/order/create";

/// Bybit v5 venue adapter.
#[derive(Debug, Clone)]
pub struct BybitVenueAdapter {
    client: BybitHttpClient,
    environment: BybitEnvironment,
}

impl BybitVenueAdapter {
    /// Create a new Bybit venue adapter.
    pub fn new(config: &BybitConfig) -> Result<Self, BybitError> {
        let client = BybitHttpClient::new(config)?;
        Ok(Self {
            client,
            environment: config.environment,
        })
    }

    /// Get the configured environment.
    #[must_use]
    pub const fn environment(&self) -> BybitEnvironment {
        self.environment
    }

    /// Get the base URL in use.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Pull the last price out of a ticker response.
    fn parse_last_price(symbol: &Symbol, body: Value) -> Result<Decimal, BybitError> {
        let envelope: BybitEnvelope<TickerResult> =
            serde_json::from_value(body).map_err(|e| BybitError::JsonParse(e.to_string()))?;

        if envelope.ret_code != 0 {
            return Err(BybitError::Api {
                ret_code: envelope.ret_code,
                ret_msg: envelope.ret_msg,
            });
        }

        envelope
            .result
            .unwrap_or_default()
            .list
            .into_iter()
            .next()
            .and_then(|ticker| ticker.last_price)
            .and_then(|price| Decimal::from_str(price.trim()).ok())
            .ok_or_else(|| BybitError::MissingPrice {
                symbol: symbol.as_str().to_string(),
            })
    }

    /// Read an order-create response, keeping the raw body.
    fn parse_order_response(body: Value) -> Result<VenueResponse, BybitError> {
        let envelope: BybitEnvelope<OrderCreateResult> = serde_json::from_value(body.clone())
            .map_err(|e| BybitError::JsonParse(e.to_string()))?;

        Ok(VenueResponse {
            ret_code: envelope.ret_code,
            ret_msg: envelope.ret_msg,
            order_id: envelope.result.and_then(|r| r.order_id),
            raw: body,
        })
    }
}

#[async_trait]
impl VenuePort for BybitVenueAdapter {
    async fn last_price(
        &self,
        category: MarketCategory,
        symbol: &Symbol,
    ) -> Result<Decimal, VenueError> {
        let body = self
            .client
            .get_public(
                TICKERS_PATH,
                &[("category", category.as_str()), ("symbol", symbol.as_str())],
            )
            .await?;

        let price = Self::parse_last_price(symbol, body)?;
        tracing::debug!(%symbol, %price, "Fetched last price");
        Ok(price)
    }

    async fn create_order(&self, order: &SignedOrder) -> Result<VenueResponse, VenueError> {
        let body = self.client.post_signed(ORDER_CREATE_PATH, order).await?;
        Ok(Self::parse_order_response(body)?)
    }
}
