//! Bybit-specific error types.

use thiserror::Error;

use crate::application::ports::VenueError;

/// Errors from the Bybit adapter.
#[derive(Debug, Error, Clone)]
pub enum BybitError {
    /// The HTTP client could not be built or the request failed in transit.
    #[error("Network error: {0}")]
    Network(String),

    /// The body was not the JSON envelope the venue returns.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// The venue answered a public read with a non-zero return code.
    #[error("API error: {ret_code} - {ret_msg}")]
    Api {
        /// Venue return code.
        ret_code: i64,
        /// Venue message.
        ret_msg: String,
    },

    /// The ticker response had no usable price.
    #[error("No last price for {symbol}")]
    MissingPrice {
        /// The symbol queried.
        symbol: String,
    },
}

impl From<BybitError> for VenueError {
    fn from(err: BybitError) -> Self {
        match err {
            BybitError::Network(message) => Self::ConnectionError { message },
            BybitError::JsonParse(message) => Self::InvalidResponse { message },
            BybitError::Api { ret_code, ret_msg } => Self::InvalidResponse {
                message: format!("{ret_code}: {ret_msg}"),
            },
            BybitError::MissingPrice { symbol } => Self::PriceUnavailable {
                symbol,
                message: "no last price in ticker response".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_maps_to_connection_error() {
        let err: VenueError = BybitError::Network("connection refused".to_string()).into();
        assert!(matches!(err, VenueError::ConnectionError { .. }));
    }

    #[test]
    fn json_maps_to_invalid_response() {
        let err: VenueError = BybitError::JsonParse("expected value".to_string()).into();
        assert!(matches!(err, VenueError::InvalidResponse { .. }));
    }

    #[test]
    fn missing_price_keeps_symbol() {
        let err: VenueError = BybitError::MissingPrice {
            symbol: "BTCUSDT".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            VenueError::PriceUnavailable { ref symbol, .. } if symbol == "BTCUSDT"
        ));
    }
}
