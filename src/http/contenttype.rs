//! Request body decoding by `Content-Type`.
//!
//! Dispatch uses the media type essence (everything before the first `;`,
//! lowercased), so parameters like `charset` never change which decoder runs.
//!
//! | Media type | Decoder |
//! |------------|---------|
//! | `application/json`, `*/*+json` | [`JsonDecoder`] |
//! | `application/xml`, `text/xml`, `*/*+xml` | [`XmlDecoder`] |
//! | `text/csv` | [`CsvDecoder`] |
//! | anything else | raw body |
//!
//! A body that fails to decode is returned as [`BodyValue::Raw`], byte for byte.
//!
//! ```rust
//! use cookieseal::http::contenttype::ContentTypes;
//!
//! let types = ContentTypes::new();
//! let body = types.decode("application/json; charset=utf-8", br#"{"foo":"bar"}"#);
//! assert_eq!(body.as_json().unwrap()["foo"], "bar");
//!
//! let body = types.decode("application/json", br#"{"foo":"bar""#);
//! assert_eq!(body.as_str(), Some(r#"{"foo":"bar""#));
//! ```

use crate::http::bodydecoder::{BodyDecoder, BodyValue, CsvDecoder, JsonDecoder, XmlDecoder};
use http::header::CONTENT_TYPE;
use http::HeaderMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Media type families with a built-in decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    Json,
    Xml,
    Csv,
    Other(String),
}

impl MediaType {
    /// Classify a `Content-Type` header value.
    pub fn parse(content_type: &str) -> Self {
        let essence = essence(content_type);
        match essence.as_str() {
            "application/json" => MediaType::Json,
            "application/xml" | "text/xml" => MediaType::Xml,
            "text/csv" => MediaType::Csv,
            e if e.ends_with("+json") => MediaType::Json,
            e if e.ends_with("+xml") => MediaType::Xml,
            _ => MediaType::Other(essence),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            MediaType::Json => "json",
            MediaType::Xml => "xml",
            MediaType::Csv => "csv",
            MediaType::Other(essence) => essence,
        }
    }
}

/// Media type without parameters, trimmed and lowercased.
pub fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Decoder registry keyed by media type.
///
/// Registered decoders take precedence over the built-in families for the
/// exact media type they were registered under.
#[derive(Clone, Default)]
pub struct ContentTypes {
    custom: HashMap<String, Arc<dyn BodyDecoder>>,
}

impl std::fmt::Debug for ContentTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut registered: Vec<_> = self.custom.keys().collect();
        registered.sort();
        f.debug_struct("ContentTypes")
            .field("custom", &registered)
            .finish()
    }
}

impl ContentTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or override the decoder for one media type.
    pub fn register(mut self, media_type: &str, decoder: impl BodyDecoder + 'static) -> Self {
        self.custom.insert(essence(media_type), Arc::new(decoder));
        self
    }

    /// Decode `body` according to `content_type`.
    pub fn decode(&self, content_type: &str, body: &[u8]) -> BodyValue {
        let media_type = MediaType::parse(content_type);

        let decoded = if let Some(decoder) = self.custom.get(&essence(content_type)) {
            decoder.decode(body)
        } else {
            match &media_type {
                MediaType::Json => JsonDecoder.decode(body),
                MediaType::Xml => XmlDecoder.decode(body),
                MediaType::Csv => CsvDecoder.decode(body),
                MediaType::Other(_) => return BodyValue::raw(body),
            }
        };

        decoded.unwrap_or_else(|e| {
            tracing::debug!(
                media_type = %media_type.name(),
                error = %e,
                "body decode failed, keeping raw body"
            );
            BodyValue::raw(body)
        })
    }

    /// Decode using the request's `Content-Type` header; raw when absent.
    pub fn decode_request(&self, headers: &HeaderMap, body: &[u8]) -> BodyValue {
        match headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
            Some(content_type) => self.decode(content_type, body),
            None => BodyValue::raw(body),
        }
    }
}

/// Decode with the built-in decoders only.
pub fn decode_body(content_type: &str, body: &[u8]) -> BodyValue {
    ContentTypes::new().decode(content_type, body)
}
