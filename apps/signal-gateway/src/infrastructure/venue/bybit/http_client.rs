//! HTTP client wrapper for the v5 REST API.
//!
//! One attempt per call. Order bodies are sent as the exact signed string.

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::domain::SignedOrder;

use super::config::BybitConfig;
use super::error::BybitError;

const HEADER_API_KEY: &str = "X-BAPI-API-KEY";
const HEADER_TIMESTAMP: &str = "X-BAPI-TIMESTAMP";
const HEADER_RECV_WINDOW: &str = "X-BAPI-RECV-WINDOW";
const HEADER_SIGN: &str = "X-BAPI-SIGN";

/// Longest response excerpt carried in a parse error.
const MAX_BODY_EXCERPT: usize = 200;

/// HTTP client for the Bybit API.
#[derive(Debug, Clone)]
pub struct BybitHttpClient {
    client: Client,
    base_url: String,
}

impl BybitHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &BybitConfig) -> Result<Self, BybitError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BybitError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    /// Get the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an unauthenticated GET request.
    pub async fn get_public(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, BybitError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| BybitError::Network(e.to_string()))?;

        Self::read_json(response).await
    }

    /// Make a signed POST request carrying `order`'s body.
    pub async fn post_signed(&self, path: &str, order: &SignedOrder) -> Result<Value, BybitError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(HEADER_API_KEY, order.api_key())
            .header(HEADER_TIMESTAMP, order.timestamp())
            .header(HEADER_SIGN, order.signature())
            .header(HEADER_RECV_WINDOW, order.recv_window())
            .body(order.body().as_str().to_owned())
            .send()
            .await
            .map_err(|e| BybitError::Network(e.to_string()))?;

        Self::read_json(response).await
    }

    /// Read the body as JSON whatever the HTTP status.
    async fn read_json(response: reqwest::Response) -> Result<Value, BybitError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BybitError::Network(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| {
            let excerpt: String = text.chars().take(MAX_BODY_EXCERPT).collect();
            BybitError::JsonParse(format!("HTTP {status}: {e}: {excerpt}"))
        })
    }
}
