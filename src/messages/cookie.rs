//! Signed cookie storage for pending messages.
//!
//! Cookie value format: `base64url(json(messages)) "." base64url(hmac_sha256(payload))`.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::{HeaderMap, HeaderValue, COOKIE};
use axum::http::request::Parts;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use crate::messages::Message;

type HmacSha256 = Hmac<Sha256>;

/// Name of the cookie carrying pending messages.
pub const COOKIE_NAME: &str = "messages";

/// Browsers cap a cookie at about 4 KiB; stay under it.
pub const MAX_COOKIE_VALUE_LEN: usize = 3072;

const CLEAR_COOKIE: &str = "messages=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

/// Errors decoding or encoding the message cookie.
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Malformed message cookie")]
    Malformed,

    #[error("Message cookie signature mismatch")]
    BadSignature,

    #[error("Message cookie payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Invalid signing key")]
    Key,
}

/// Signs and verifies the message cookie.
#[derive(Clone)]
pub struct MessageSigner {
    key: Arc<[u8]>,
}

impl std::fmt::Debug for MessageSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageSigner").finish_non_exhaustive()
    }
}

impl MessageSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            key: Arc::from(secret.as_bytes()),
        }
    }

    fn mac(&self) -> Result<HmacSha256, MessageError> {
        HmacSha256::new_from_slice(&self.key).map_err(|_| MessageError::Key)
    }

    /// Serialize and sign `messages` into a cookie value.
    pub fn encode(&self, messages: &[Message]) -> Result<String, MessageError> {
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(messages)?);
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{payload}.{signature}"))
    }

    /// Verify and deserialize a cookie value.
    pub fn decode(&self, value: &str) -> Result<Vec<Message>, MessageError> {
        let (payload, signature) = value.split_once('.').ok_or(MessageError::Malformed)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| MessageError::Malformed)?;

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| MessageError::BadSignature)?;

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| MessageError::Malformed)?;
        Ok(serde_json::from_slice(&json)?)
    }

    /// Read pending messages from request headers.
    ///
    /// A missing, malformed or forged cookie yields no messages.
    pub fn read(&self, headers: &HeaderMap) -> PendingMessages {
        let Some(value) = find_cookie(headers, COOKIE_NAME) else {
            return PendingMessages::default();
        };
        let messages = match self.decode(value) {
            Ok(messages) => messages,
            Err(e) => {
                tracing::debug!(error = %e, "Discarding message cookie");
                Vec::new()
            }
        };
        PendingMessages {
            messages,
            cookie_present: true,
        }
    }

    /// `Set-Cookie` value storing `messages`.
    ///
    /// Oldest messages are dropped until the cookie fits.
    pub fn set_cookie(&self, messages: &[Message]) -> Result<HeaderValue, MessageError> {
        let mut start = 0;
        loop {
            let value = self.encode(&messages[start..])?;
            if value.len() <= MAX_COOKIE_VALUE_LEN || start == messages.len() {
                if start > 0 {
                    tracing::warn!(dropped = start, "Message cookie too large, dropped oldest messages");
                }
                return HeaderValue::try_from(format!(
                    "{COOKIE_NAME}={value}; Path=/; HttpOnly; SameSite=Lax"
                ))
                .map_err(|_| MessageError::Malformed);
            }
            start += 1;
        }
    }

    /// `Set-Cookie` value deleting the message cookie.
    pub fn clear_cookie() -> HeaderValue {
        HeaderValue::from_static(CLEAR_COOKIE)
    }
}

/// Messages carried over from an earlier response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingMessages {
    messages: Vec<Message>,
    cookie_present: bool,
}

impl PendingMessages {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            cookie_present: !messages.is_empty(),
            messages,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True when the request sent a message cookie, valid or not.
    pub fn cookie_present(&self) -> bool {
        self.cookie_present
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl<S> FromRequestParts<S> for PendingMessages
where
    MessageSigner: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(MessageSigner::from_ref(state).read(&parts.headers))
    }
}

/// Value of cookie `name` from the `Cookie` headers.
fn find_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> MessageSigner {
        MessageSigner::new("test-secret-key-0123456789")
    }

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_signed_cookie_is_read_back() {
        let signer = signer();
        let messages = vec![
            Message::success("Success reservation for Sarah Connor!"),
            Message::error("Menu item with id 999 not found."),
        ];
        let value = signer.encode(&messages).unwrap();

        let pending = signer.read(&headers_with_cookie(&format!("theme=dark; messages={value}")));
        assert!(pending.cookie_present());
        assert_eq!(pending.messages(), messages.as_slice());
    }

    #[test]
    fn test_tampered_payload_is_discarded() {
        let signer = signer();
        let value = signer.encode(&[Message::info("original")]).unwrap();
        let (_, signature) = value.split_once('.').unwrap();
        let forged_payload = URL_SAFE_NO_PAD
            .encode(serde_json::to_vec(&[Message::info("forged")]).unwrap());
        let forged = format!("{forged_payload}.{signature}");

        assert!(matches!(
            signer.decode(&forged),
            Err(MessageError::BadSignature)
        ));
        let pending = signer.read(&headers_with_cookie(&format!("messages={forged}")));
        assert!(pending.cookie_present());
        assert!(pending.messages().is_empty());
    }

    #[test]
    fn test_other_secret_cannot_read() {
        let value = signer().encode(&[Message::info("hi")]).unwrap();
        let other = MessageSigner::new("a-completely-different-secret");
        assert!(other.decode(&value).is_err());
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(
            signer().decode("no-dot-here"),
            Err(MessageError::Malformed)
        ));
    }

    #[test]
    fn test_no_cookie_means_nothing_pending() {
        let pending = signer().read(&headers_with_cookie("theme=dark"));
        assert!(!pending.cookie_present());
        assert!(pending.messages().is_empty());
    }

    #[test]
    fn test_oversized_cookie_drops_oldest() {
        let signer = signer();
        let messages: Vec<_> = (0..40)
            .map(|i| Message::info(format!("{i:02} {}", "x".repeat(100))))
            .collect();
        let header = signer.set_cookie(&messages).unwrap();
        let header = header.to_str().unwrap();
        assert!(header.len() < 4096);

        let value = header
            .strip_prefix("messages=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        let kept = signer.decode(value).unwrap();
        assert!(!kept.is_empty() && kept.len() < messages.len());
        assert_eq!(kept.last(), messages.last());
    }
}
