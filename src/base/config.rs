//! Cookie settings supplied by the host framework.
//!
//! Settings deserialize from JSON with every field optional:
//!
//! ```rust
//! use cookieseal::base::config::CookieSettings;
//!
//! let settings = CookieSettings::from_json(r#"{
//!     "encrypt": true,
//!     "secret_key": "s3cr3t",
//!     "cipher": "aes128",
//!     "cipher_mode": "cbc",
//!     "lifetime": "2 days"
//! }"#)?;
//! assert!(settings.encrypt);
//! assert_eq!(settings.path, "/");
//! # Ok::<(), cookieseal::base::error::CodecError>(())
//! ```

use crate::base::error::CodecError;
use crate::cookies::cipher::{CipherAlgorithm, CipherMode};
use crate::cookies::expiry::Expiry;
use crate::cookies::options::CookieOptions;
use crate::cookies::secure::SecureCookieCodec;
use serde::{Deserialize, Deserializer};
use zeroize::Zeroizing;

const DEFAULT_SECRET: &str = "CHANGE_ME";
const DEFAULT_LIFETIME: &str = "20 minutes";

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct CookieSettings {
    /// Encrypt and sign outgoing cookie values.
    pub encrypt: bool,
    #[serde(deserialize_with = "deserialize_secret")]
    pub secret_key: Zeroizing<String>,
    pub cipher: CipherAlgorithm,
    pub cipher_mode: CipherMode,
    /// Expiry applied by [`default_options`](Self::default_options).
    pub lifetime: String,
    pub path: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub http_only: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            encrypt: false,
            secret_key: Zeroizing::new(DEFAULT_SECRET.to_string()),
            cipher: CipherAlgorithm::default(),
            cipher_mode: CipherMode::default(),
            lifetime: DEFAULT_LIFETIME.to_string(),
            path: "/".to_string(),
            domain: None,
            secure: false,
            http_only: false,
        }
    }
}

impl std::fmt::Debug for CookieSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieSettings")
            .field("encrypt", &self.encrypt)
            .field("secret_key", &"<redacted>")
            .field("cipher", &self.cipher)
            .field("cipher_mode", &self.cipher_mode)
            .field("lifetime", &self.lifetime)
            .field("path", &self.path)
            .field("domain", &self.domain)
            .field("secure", &self.secure)
            .field("http_only", &self.http_only)
            .finish()
    }
}

impl CookieSettings {
    /// Load from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| CodecError::invalid_settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CodecError> {
        if self.encrypt && self.secret_key.is_empty() {
            return Err(CodecError::invalid_settings(
                "secret_key must not be empty when encrypt is enabled",
            ));
        }
        if self.encrypt && self.secret_key.as_str() == DEFAULT_SECRET {
            tracing::warn!("cookie encryption is using the default secret_key");
        }
        Expiry::parse(&self.lifetime)?;
        Ok(())
    }

    /// Codec for the configured secret and cipher.
    pub fn codec(&self) -> SecureCookieCodec {
        SecureCookieCodec::new(self.secret_key.as_bytes(), self.cipher, self.cipher_mode)
    }

    /// Directive set for a new cookie carrying the configured defaults.
    pub fn default_options(&self, value: impl Into<String>) -> Result<CookieOptions, CodecError> {
        let mut options = CookieOptions::new(value)
            .secure(self.secure)
            .http_only(self.http_only)
            .expires_in(&self.lifetime)?;
        if !self.path.is_empty() {
            options = options.path(self.path.as_str());
        }
        if let Some(domain) = &self.domain {
            options = options.domain(domain.as_str());
        }
        Ok(options)
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Zeroizing<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Zeroizing::new)
}
