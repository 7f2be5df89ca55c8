//! Tamper-evident, expiring, encrypted cookie values.
//!
//! ## Envelope
//! ```text
//! <expires>|<tag>|<payload>
//! ```
//! - `expires`: epoch seconds, `0` for no expiry
//! - `payload`: base64 of the ciphertext
//! - `tag`: hex HMAC-SHA256 keyed with the secret over `payload + expires + secret`
//!
//! The key is the secret itself (fitted to the cipher's key length). The IV is
//! fixed per secret unless overridden with [`SecureCookieCodec::with_iv`].
//!
//! Decoding verifies the tag before looking at the expiry. Every rejection is
//! reported as [`CodecError::InvalidSecureCookie`]; the reason is only logged.

use crate::base::error::CodecError;
use crate::cookies::cipher::{CipherAlgorithm, CipherEngine, CipherMode};
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use time::OffsetDateTime;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

const SEPARATOR: char = '|';

/// Why an envelope was rejected. Never leaves this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Malformed,
    Tampered,
    Expired,
    Undecryptable,
}

/// Encodes and decodes secure cookie envelopes for one secret and cipher.
#[derive(Clone)]
pub struct SecureCookieCodec {
    engine: CipherEngine,
    secret: Zeroizing<Vec<u8>>,
    iv: Zeroizing<Vec<u8>>,
}

impl std::fmt::Debug for SecureCookieCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureCookieCodec")
            .field("engine", &self.engine)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl SecureCookieCodec {
    pub fn new(secret: impl AsRef<[u8]>, algorithm: CipherAlgorithm, mode: CipherMode) -> Self {
        let secret = secret.as_ref();
        Self {
            engine: CipherEngine::new(algorithm, mode),
            secret: Zeroizing::new(secret.to_vec()),
            iv: Zeroizing::new(derive_iv(secret)),
        }
    }

    /// Use a caller-supplied IV instead of the one derived from the secret.
    pub fn with_iv(mut self, iv: impl AsRef<[u8]>) -> Self {
        self.iv = Zeroizing::new(iv.as_ref().to_vec());
        self
    }

    pub fn engine(&self) -> CipherEngine {
        self.engine
    }

    /// Build the envelope for `value`. An empty value encodes to `""`.
    pub fn encode(&self, value: &str, expires_at: i64) -> Result<String, CodecError> {
        if value.is_empty() {
            return Ok(String::new());
        }

        let ciphertext = self.engine.encrypt(value.as_bytes(), &self.secret, &self.iv)?;
        let payload = general_purpose::STANDARD.encode(ciphertext);
        let expires = expires_at.to_string();
        let tag = hex::encode(self.tag(&payload, &expires)?);

        Ok(format!("{expires}{SEPARATOR}{tag}{SEPARATOR}{payload}"))
    }

    /// Verify and open an envelope against the current time.
    pub fn decode(&self, envelope: &str) -> Result<String, CodecError> {
        self.decode_at(envelope, OffsetDateTime::now_utc().unix_timestamp())
    }

    /// Verify and open an envelope against `now` (epoch seconds).
    pub fn decode_at(&self, envelope: &str, now: i64) -> Result<String, CodecError> {
        if envelope.is_empty() {
            return Ok(String::new());
        }

        self.open(envelope, now).map_err(|reason| {
            tracing::debug!(reason = ?reason, "rejected secure cookie");
            CodecError::InvalidSecureCookie
        })
    }

    fn open(&self, envelope: &str, now: i64) -> Result<String, Rejection> {
        let parts: Vec<&str> = envelope.split(SEPARATOR).collect();
        let [expires, tag, payload] = parts.as_slice() else {
            return Err(Rejection::Malformed);
        };

        let received = hex::decode(tag).map_err(|_| Rejection::Tampered)?;
        let expected = self
            .tag(payload, expires)
            .map_err(|_| Rejection::Malformed)?;
        if received.len() != expected.len() || !bool::from(expected.ct_eq(&received)) {
            return Err(Rejection::Tampered);
        }

        let expires_at: i64 = expires.parse().map_err(|_| Rejection::Malformed)?;
        if expires_at != 0 && expires_at < now {
            return Err(Rejection::Expired);
        }

        let ciphertext = general_purpose::STANDARD
            .decode(payload)
            .map_err(|_| Rejection::Malformed)?;
        let plaintext = self
            .engine
            .decrypt(&ciphertext, &self.secret, &self.iv)
            .map_err(|_| Rejection::Undecryptable)?;

        String::from_utf8(plaintext).map_err(|_| Rejection::Undecryptable)
    }

    fn tag(&self, payload: &str, expires: &str) -> Result<Vec<u8>, CodecError> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_| CodecError::InvalidHashKey)?;
        mac.update(payload.as_bytes());
        mac.update(expires.as_bytes());
        mac.update(&self.secret);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// Fixed IV for a secret: hex SHA-256 of the secret, fitted by the engine.
fn derive_iv(secret: &[u8]) -> Vec<u8> {
    hex::encode(Sha256::digest(secret)).into_bytes()
}

/// One-shot [`SecureCookieCodec::encode`].
pub fn encode_secure_cookie(
    value: &str,
    expires_at: i64,
    secret: &str,
    algorithm: CipherAlgorithm,
    mode: CipherMode,
) -> Result<String, CodecError> {
    SecureCookieCodec::new(secret, algorithm, mode).encode(value, expires_at)
}

/// One-shot [`SecureCookieCodec::decode`].
pub fn decode_secure_cookie(
    envelope: &str,
    secret: &str,
    algorithm: CipherAlgorithm,
    mode: CipherMode,
) -> Result<String, CodecError> {
    SecureCookieCodec::new(secret, algorithm, mode).decode(envelope)
}
