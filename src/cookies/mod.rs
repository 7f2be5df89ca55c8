//! Cookie encoding, encryption, and header handling.
//!
//! This module covers both directions of a cookie's trip through a server:
//!
//! - **Outbound**: [`CookieOptions`](options::CookieOptions) → optional
//!   [`SecureCookieCodec`](secure::SecureCookieCodec) envelope →
//!   [`build_set_cookie_line`](header::build_set_cookie_line) →
//!   [`HeaderCollection`](crate::http::headers::HeaderCollection)
//! - **Inbound**: `Cookie` header →
//!   [`parse_cookie_header`](header::parse_cookie_header) →
//!   [`decode_request_cookies`](jar::decode_request_cookies)
//!
//! # Architecture
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`cipher`] | Symmetric encrypt/decrypt with key/IV fitting |
//! | [`secure`] | `expires\|tag\|payload` envelope |
//! | [`expiry`] | Expiry resolution and cookie date formatting |
//! | [`options`] | Typed cookie directives |
//! | [`header`] | `Set-Cookie` lines and `Cookie` header parsing |
//! | [`jar`] | Response cookie set and (de)serialization with settings |
//!
//! # Example
//!
//! ```rust
//! use cookieseal::cookies::header::parse_cookie_header;
//! use cookieseal::cookies::options::CookieOptions;
//! use cookieseal::http::headers::{HeaderCollection, SET_COOKIE};
//!
//! let mut headers = HeaderCollection::new();
//! headers.set_cookie("foo", &CookieOptions::new("bar").domain("foo.com").path("/foo"))?;
//! assert_eq!(headers.get(SET_COOKIE), Some("foo=bar; domain=foo.com; path=/foo"));
//!
//! let cookies = parse_cookie_header("foo=bar; foo=beer");
//! assert_eq!(cookies["foo"], "bar");
//! # Ok::<(), cookieseal::CodecError>(())
//! ```
//!
//! # Security
//!
//! The envelope is a legacy encrypt-then-tag scheme kept for compatibility
//! with existing deployments. It is not an AEAD.

pub mod cipher;
pub mod expiry;
pub mod header;
pub mod jar;
pub mod options;
pub mod secure;

pub use cipher::{CipherAlgorithm, CipherEngine, CipherMode};
pub use expiry::Expiry;
pub use header::{build_delete_line, build_set_cookie_line, parse_cookie_header};
pub use jar::{decode_request_cookies, serialize_cookies, ResponseCookies};
pub use options::CookieOptions;
pub use secure::{decode_secure_cookie, encode_secure_cookie, SecureCookieCodec};
