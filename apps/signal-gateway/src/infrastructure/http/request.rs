//! HTTP request DTOs.
//!
//! Signal sources are inconsistent about encoding: some post a JSON object,
//! some post a JSON string whose contents are the object, and some send it
//! as `text/plain`. Intake therefore reads raw bytes and decodes by hand.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::RawIntent;
use crate::error::GatewayError;

/// Signal body as received.
///
/// Fields stay untyped so that a wrong type is reported by the validator
/// against the field it belongs to rather than as an unreadable body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignalPayload {
    /// Instrument symbol.
    #[serde(default)]
    pub symbol: Option<Value>,
    /// Order side.
    #[serde(default)]
    pub side: Option<Value>,
    /// Quantity, as a string or a number.
    #[serde(default)]
    pub qty: Option<Value>,
    /// Request-supplied API key.
    #[serde(default)]
    pub api_key: Option<Value>,
    /// Request-supplied API secret.
    #[serde(default)]
    pub secret: Option<Value>,
}

impl SignalPayload {
    /// Convert to the validator's input.
    #[must_use]
    pub fn into_raw_intent(self) -> RawIntent {
        RawIntent {
            symbol: self.symbol.as_ref().and_then(scalar_text),
            side: self.side.as_ref().and_then(scalar_text),
            qty: self.qty.as_ref().and_then(scalar_text),
            api_key: self.api_key.as_ref().and_then(scalar_text),
            secret: self.secret.as_ref().and_then(scalar_text),
        }
    }
}

/// Decode a webhook body into a raw intent.
///
/// Accepts a JSON object, or a JSON string containing one.
///
/// # Errors
///
/// `MalformedSignal` carrying the raw input when the body is not UTF-8 JSON,
/// or is JSON but not an object.
pub fn parse_signal(body: &[u8]) -> Result<RawIntent, GatewayError> {
    let text = std::str::from_utf8(body).map_err(|_| GatewayError::MalformedSignal {
        received: String::from_utf8_lossy(body).into_owned(),
    })?;
    let malformed = || GatewayError::MalformedSignal {
        received: text.to_string(),
    };

    let value: Value = serde_json::from_str(text).map_err(|_| malformed())?;

    let object = match value {
        Value::Object(_) => value,
        Value::String(inner) => match serde_json::from_str::<Value>(&inner) {
            Ok(decoded @ Value::Object(_)) => decoded,
            _ => return Err(GatewayError::MalformedSignal { received: inner }),
        },
        _ => return Err(malformed()),
    };

    let payload: SignalPayload = serde_json::from_value(object).map_err(|_| malformed())?;
    Ok(payload.into_raw_intent())
}

/// Text form of a scalar JSON value. `null` reads as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
