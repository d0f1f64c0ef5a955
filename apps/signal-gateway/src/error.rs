//! Error handling for the signal gateway.
//!
//! Every failure a caller can observe is a [`GatewayError`]. Each variant has a
//! stable [`ErrorCode`] and maps onto one HTTP status:
//!
//! | Code | HTTP | Raised by |
//! |------|------|-----------|
//! | `METHOD_NOT_ALLOWED` | 405 | Webhook router |
//! | `MALFORMED_SIGNAL` | 400 | Signal intake |
//! | `INVALID_SIDE` | 400 | Validator |
//! | `INVALID_SYMBOL` | 400 | Validator |
//! | `INVALID_QUANTITY` | 400 | Validator |
//! | `MISSING_CREDENTIALS` | 400 | Validator |
//! | `BELOW_MINIMUM_QUANTITY` | 400 | Validator |
//! | `BELOW_MINIMUM_NOTIONAL` | 400 | Notional guard |
//! | `UPSTREAM_REJECTED` | 400 | Submitter (venue `retCode != 0`) |
//! | `UPSTREAM_UNREACHABLE` | 500 | Submitter (transport or decode failure) |
//! | `INTERNAL_ERROR` | 500 | Anything unexpected |

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// Error codes for the signal gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Webhook called with a method other than POST.
    MethodNotAllowed,
    /// Body could not be parsed as a signal object.
    MalformedSignal,
    /// Side is not Buy or Sell.
    InvalidSide,
    /// Symbol is empty.
    InvalidSymbol,
    /// Quantity is not a positive number.
    InvalidQuantity,
    /// No credential pair available.
    MissingCredentials,
    /// Quantity below the configured floor.
    BelowMinimumQuantity,
    /// Order value below the configured floor.
    BelowMinimumNotional,
    /// Venue answered with a non-zero return code.
    UpstreamRejected,
    /// Venue could not be reached or answered with something unreadable.
    UpstreamUnreachable,
    /// Unexpected local failure.
    InternalError,
}

impl ErrorCode {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MalformedSignal
            | Self::InvalidSide
            | Self::InvalidSymbol
            | Self::InvalidQuantity
            | Self::MissingCredentials
            | Self::BelowMinimumQuantity
            | Self::BelowMinimumNotional
            | Self::UpstreamRejected => StatusCode::BAD_REQUEST,
            Self::UpstreamUnreachable | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Reason string used in response bodies and logs.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::MalformedSignal => "MALFORMED_SIGNAL",
            Self::InvalidSide => "INVALID_SIDE",
            Self::InvalidSymbol => "INVALID_SYMBOL",
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::MissingCredentials => "MISSING_CREDENTIALS",
            Self::BelowMinimumQuantity => "BELOW_MINIMUM_QUANTITY",
            Self::BelowMinimumNotional => "BELOW_MINIMUM_NOTIONAL",
            Self::UpstreamRejected => "UPSTREAM_REJECTED",
            Self::UpstreamUnreachable => "UPSTREAM_UNREACHABLE",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Whether the error is detected locally, before any network call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MethodNotAllowed
                | Self::MalformedSignal
                | Self::InvalidSide
                | Self::InvalidSymbol
                | Self::InvalidQuantity
                | Self::MissingCredentials
                | Self::BelowMinimumQuantity
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// A failed signal, with enough context to diagnose it without a retry.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Non-POST delivery.
    #[error("Method Not Allowed")]
    MethodNotAllowed {
        /// The method that was used.
        method: String,
    },

    /// Body is neither a JSON object nor a string holding one.
    #[error("Invalid JSON")]
    MalformedSignal {
        /// The raw body as received.
        received: String,
    },

    /// Side did not normalise to Buy or Sell.
    #[error("Invalid side '{received}': expected Buy or Sell")]
    InvalidSide {
        /// The side as received.
        received: String,
    },

    /// Symbol is empty after normalisation.
    #[error("Invalid symbol '{received}': symbol must not be empty")]
    InvalidSymbol {
        /// The symbol as received.
        received: String,
    },

    /// Quantity is missing, unparsable or not positive.
    #[error("Invalid quantity '{received}': expected a positive number")]
    InvalidQuantity {
        /// The quantity as received.
        received: String,
    },

    /// Neither the request nor the configuration supplied a credential pair.
    #[error("Missing API credentials")]
    MissingCredentials,

    /// Quantity is under the per-symbol or default floor.
    #[error("Quantity {received} below minimum {minimum} for {symbol}")]
    BelowMinimumQuantity {
        /// Normalised symbol.
        symbol: String,
        /// Floor that applied.
        minimum: Decimal,
        /// Quantity as parsed.
        received: Decimal,
    },

    /// Order value is under the configured minimum.
    #[error("Order value {notional} below minimum {minimum}")]
    BelowMinimumNotional {
        /// Computed order value.
        notional: Decimal,
        /// Last traded price used, absent for quote-denominated quantities.
        price: Option<Decimal>,
        /// Configured minimum order value.
        minimum: Decimal,
        /// Quantity as parsed.
        received_qty: Decimal,
    },

    /// Venue answered with a non-zero `retCode`.
    #[error("Venue rejected order: {ret_msg}")]
    UpstreamRejected {
        /// Venue return code.
        ret_code: i64,
        /// Venue message, verbatim.
        ret_msg: String,
        /// Full venue response, verbatim.
        response: Value,
    },

    /// Transport failure or unreadable venue response.
    #[error("Venue unreachable: {message}")]
    UpstreamUnreachable {
        /// Underlying failure.
        message: String,
    },

    /// Unexpected local failure.
    #[error("Internal error: {message}")]
    Internal {
        /// Underlying failure.
        message: String,
    },
}

impl GatewayError {
    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MethodNotAllowed { .. } => ErrorCode::MethodNotAllowed,
            Self::MalformedSignal { .. } => ErrorCode::MalformedSignal,
            Self::InvalidSide { .. } => ErrorCode::InvalidSide,
            Self::InvalidSymbol { .. } => ErrorCode::InvalidSymbol,
            Self::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            Self::MissingCredentials => ErrorCode::MissingCredentials,
            Self::BelowMinimumQuantity { .. } => ErrorCode::BelowMinimumQuantity,
            Self::BelowMinimumNotional { .. } => ErrorCode::BelowMinimumNotional,
            Self::UpstreamRejected { .. } => ErrorCode::UpstreamRejected,
            Self::UpstreamUnreachable { .. } => ErrorCode::UpstreamUnreachable,
            Self::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.code().status()
    }

    /// Internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Upstream unreachable.
    #[must_use]
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::UpstreamUnreachable {
            message: message.into(),
        }
    }

    /// Structured context for the `detail` field of the response.
    fn detail(&self) -> Option<Value> {
        match self {
            Self::MethodNotAllowed { method } => Some(json!({ "method": method })),
            Self::InvalidSide { received }
            | Self::InvalidSymbol { received }
            | Self::InvalidQuantity { received } => Some(json!({ "received": received })),
            Self::BelowMinimumQuantity {
                symbol,
                minimum,
                received,
            } => Some(json!({
                "symbol": symbol,
                "minQty": minimum,
                "receivedQty": received,
            })),
            Self::BelowMinimumNotional {
                notional,
                price,
                minimum,
                received_qty,
            } => Some(json!({
                "minOrderValue": minimum,
                "lastPrice": price,
                "notional": notional,
                "receivedQty": received_qty,
            })),
            Self::MalformedSignal { .. }
            | Self::MissingCredentials
            | Self::UpstreamRejected { .. }
            | Self::UpstreamUnreachable { .. }
            | Self::Internal { .. } => None,
        }
    }

    /// Convert to the JSON body returned to the caller.
    #[must_use]
    pub fn to_http_response(&self) -> HttpErrorResponse {
        let code = self.code().reason().to_string();
        match self {
            Self::MalformedSignal { received } => HttpErrorResponse {
                code,
                error: self.to_string(),
                received: Some(received.clone()),
                ..HttpErrorResponse::default()
            },
            Self::UpstreamRejected {
                ret_code,
                ret_msg,
                response,
            } => HttpErrorResponse {
                code,
                message: Some("venue rejected order".to_string()),
                error: ret_msg.clone(),
                ret_code: Some(*ret_code),
                full: Some(response.clone()),
                ..HttpErrorResponse::default()
            },
            _ => HttpErrorResponse {
                code,
                error: self.to_string(),
                detail: self.detail(),
                ..HttpErrorResponse::default()
            },
        }
    }
}

/// HTTP error response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable error, or the venue's own message for rejections.
    pub error: String,
    /// Summary line for venue rejections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Diagnosing context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
    /// Raw body echoed back for malformed signals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
    /// Venue return code.
    #[serde(default, rename = "retCode", skip_serializing_if = "Option::is_none")]
    pub ret_code: Option<i64>,
    /// Full venue response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<Value>,
}
