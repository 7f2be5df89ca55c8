//! # cookieseal
//!
//! Cookie and request-body plumbing for Rust web servers.
//!
//! `cookieseal` sits between a web framework and the wire. It seals cookie
//! values, builds and parses cookie headers, and decodes request bodies by
//! content type. Routing, middleware, and request/response objects stay with
//! the host framework.
//!
//! ## Features
//!
//! - **Secure cookies**: encrypted, HMAC-tagged, expiring cookie values
//! - **Configurable ciphers**: AES-128/256 in ECB, CBC, CTR, or OFB mode
//! - **Set-Cookie building**: fixed directive order, relative expiry strings
//! - **Cookie parsing**: `;` or `,` separators, leftmost duplicate wins
//! - **Body decoding**: JSON, XML, and CSV with raw-body fallback
//!
//! ## Quick Start
//!
//! ```rust
//! use cookieseal::base::config::CookieSettings;
//! use cookieseal::cookies::{serialize_cookies, CookieOptions, ResponseCookies};
//! use cookieseal::http::headers::HeaderCollection;
//!
//! let settings = CookieSettings::from_json(r#"{"encrypt": true, "secret_key": "s3cr3t"}"#)?;
//!
//! let mut cookies = ResponseCookies::new();
//! cookies.set("user", CookieOptions::new("42").path("/").http_only(true));
//!
//! let mut headers = HeaderCollection::new();
//! serialize_cookies(&mut headers, &cookies, &settings)?;
//! let map = headers.to_header_map()?;
//! assert_eq!(map.get_all("set-cookie").iter().count(), 1);
//! # Ok::<(), cookieseal::base::error::CodecError>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error type and settings
//! - [`cookies`] - Cipher, secure envelope, expiry, and cookie headers
//! - [`http`] - Header collection and content-type body decoding
//!
//! ## Security
//!
//! - Secure cookie rejections are opaque: tampered, expired, and malformed
//!   envelopes all produce the same error
//! - Tags are compared in constant time
//! - `domain` and `path` values that could split a `Set-Cookie` line are rejected
//! - Secrets are zeroized on drop
//! - XML bodies with DTDs are rejected

pub mod base;
pub mod cookies;
pub mod http;

pub use base::config::CookieSettings;
pub use base::error::CodecError;
