//! Venue request signing (HMAC-SHA256).
//!
//! `signature = hex(HMAC_SHA256(secret, timestamp || api_key || recv_window || body))`
//!
//! The venue recomputes the signature over the bytes it receives, so the body
//! signed here is the same [`CanonicalBody`] the submitter sends.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::GatewayError;

use super::credentials::Credentials;
use super::order::CanonicalBody;

type HmacSha256 = Hmac<Sha256>;

/// Receive window sent with every request, in milliseconds.
pub const RECV_WINDOW: &str = "5000";

/// Compute the lowercase hex signature for one request.
///
/// # Errors
///
/// `Internal` if the MAC cannot be keyed.
pub fn sign(
    secret: &str,
    timestamp: &str,
    api_key: &str,
    recv_window: &str,
    body: &str,
) -> Result<String, GatewayError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| GatewayError::internal(format!("invalid signing key: {e}")))?;
    mac.update(timestamp.as_bytes());
    mac.update(api_key.as_bytes());
    mac.update(recv_window.as_bytes());
    mac.update(body.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// An order ready to send: body, auth headers and signature.
///
/// The secret is consumed by signing and not retained.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedOrder {
    api_key: String,
    timestamp: String,
    recv_window: &'static str,
    body: CanonicalBody,
    signature: String,
}

impl SignedOrder {
    /// Sign `body` with `credentials` at `timestamp_ms`.
    ///
    /// # Errors
    ///
    /// `Internal` if the MAC cannot be keyed.
    pub fn sign(
        body: CanonicalBody,
        credentials: &Credentials,
        timestamp_ms: i64,
    ) -> Result<Self, GatewayError> {
        let timestamp = timestamp_ms.to_string();
        let signature = sign(
            credentials.api_secret(),
            &timestamp,
            credentials.api_key(),
            RECV_WINDOW,
            body.as_str(),
        )?;

        Ok(Self {
            api_key: credentials.api_key().to_string(),
            timestamp,
            recv_window: RECV_WINDOW,
            body,
            signature,
        })
    }

    /// Value for `X-BAPI-API-KEY`.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Value for `X-BAPI-TIMESTAMP`.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Value for `X-BAPI-RECV-WINDOW`.
    #[must_use]
    pub const fn recv_window(&self) -> &'static str {
        self.recv_window
    }

    /// Value for `X-BAPI-SIGN`.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The signed body.
    #[must_use]
    pub const fn body(&self) -> &CanonicalBody {
        &self.body
    }
}

impl fmt::Debug for SignedOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedOrder")
            .field("api_key", &"[REDACTED]")
            .field("timestamp", &self.timestamp)
            .field("recv_window", &self.recv_window)
            .field("body", &self.body)
            .field("signature", &self.signature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{"category":"spot","symbol":"BTCUSDT","side":"Buy","orderType":"Market","qty":"0.001","timeInForce":"GTC"}"#;

    #[test]
    fn matches_rfc4231_vector() {
        // RFC 4231 test case 2, with the message split across the four parts
        let signature = sign("Jefe", "what do ya ", "want ", "for ", "nothing?").unwrap();
        assert_eq!(
            signature,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn signature_is_lowercase_hex() {
        let signature = sign("secret", "1700000000000", "key", RECV_WINDOW, BODY).unwrap();
        assert_eq!(signature.len(), 64);
        assert!(
            signature
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn signature_is_deterministic() {
        let a = sign("secret", "1700000000000", "key", RECV_WINDOW, BODY).unwrap();
        let b = sign("secret", "1700000000000", "key", RECV_WINDOW, BODY).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn every_input_changes_the_signature() {
        let base = sign("secret", "1700000000000", "key", RECV_WINDOW, BODY).unwrap();

        let variants = [
            sign("secret", "1700000000001", "key", RECV_WINDOW, BODY).unwrap(),
            sign("secret", "1700000000000", "key2", RECV_WINDOW, BODY).unwrap(),
            sign("secret", "1700000000000", "key", "10000", BODY).unwrap(),
            sign("secret", "1700000000000", "key", RECV_WINDOW, &BODY.replace("0.001", "0.002"))
                .unwrap(),
            sign("other", "1700000000000", "key", RECV_WINDOW, BODY).unwrap(),
        ];

        for variant in variants {
            assert_ne!(variant, base);
        }
    }

    #[test]
    fn signed_order_signs_its_own_body() {
        let creds = Credentials::new("key".to_string(), "secret".to_string());
        let body = crate::domain::order::CanonicalBody(BODY.to_string());
        let signed = SignedOrder::sign(body, &creds, 1_700_000_000_000).unwrap();

        let expected = sign("secret", "1700000000000", "key", "5000", BODY).unwrap();
        assert_eq!(signed.signature(), expected);
        assert_eq!(signed.timestamp(), "1700000000000");
        assert_eq!(signed.recv_window(), "5000");
        assert_eq!(signed.api_key(), "key");
        assert_eq!(signed.body().as_str(), BODY);
    }

    #[test]
    fn debug_hides_api_key() {
        let creds = Credentials::new("visible-key".to_string(), "secret".to_string());
        let body = crate::domain::order::CanonicalBody("{}".to_string());
        let signed = SignedOrder::sign(body, &creds, 1).unwrap();
        assert!(!format!("{signed:?}").contains("visible-key"));
    }
}
