//! `Set-Cookie` line building and `Cookie` header parsing.
//!
//! Directive order is fixed: `domain`, `path`, `expires`, `secure`, `HttpOnly`.
//! Names and values are percent-encoded on the way out and decoded on the way in.

use crate::base::error::CodecError;
use crate::cookies::expiry::format_cookie_date;
use crate::cookies::options::CookieOptions;
use cookie::Cookie;
use std::collections::HashMap;
use time::{Duration, OffsetDateTime};

/// How far in the past a deletion cookie's expiry is placed.
const DELETE_OFFSET: Duration = Duration::seconds(100_000);

/// Build the `Set-Cookie` value for one cookie.
///
/// Fails with [`CodecError::InvalidDirective`] when `domain` or `path` holds
/// a `;` or a control character.
pub fn build_set_cookie_line(name: &str, options: &CookieOptions) -> Result<String, CodecError> {
    let mut line = encode_pair(name, &options.value);

    if let Some(domain) = options.domain_directive() {
        line.push_str("; domain=");
        line.push_str(check_directive("domain", domain)?);
    }
    if let Some(path) = options.path_directive() {
        line.push_str("; path=");
        line.push_str(check_directive("path", path)?);
    }
    if let Some(expires) = options.expires.to_cookie_date() {
        line.push_str("; expires=");
        line.push_str(&expires);
    }
    if options.secure {
        line.push_str("; secure");
    }
    if options.http_only {
        line.push_str("; HttpOnly");
    }

    Ok(line)
}

/// Build a `Set-Cookie` value that makes the client drop the cookie.
///
/// The value is emptied and the expiry moved into the past; `domain` and
/// `path` are kept so the deletion hits the same scope that set the cookie.
pub fn build_delete_line(name: &str, options: &CookieOptions) -> Result<String, CodecError> {
    let expired = CookieOptions {
        value: String::new(),
        expires: (OffsetDateTime::now_utc() - DELETE_OFFSET).into(),
        ..options.clone()
    };
    build_set_cookie_line(name, &expired)
}

fn check_directive<'a>(directive: &'static str, value: &'a str) -> Result<&'a str, CodecError> {
    if value.chars().any(|c| c == ';' || c.is_control()) {
        tracing::debug!(directive, value = ?value, "rejecting cookie directive");
        return Err(CodecError::invalid_directive(directive, value));
    }
    Ok(value)
}

/// Parse an inbound `Cookie` header into name → value.
///
/// Both `;` and `,` separate cookies. Each pair splits on its first `=`, so
/// values may contain `=`. The leftmost cookie wins when a name repeats.
pub fn parse_cookie_header(header: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();

    for segment in header.trim_end_matches(['\r', '\n']).split([';', ',']) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        // Escapes that decode to invalid UTF-8 keep the pair as sent.
        let parsed = Cookie::parse_encoded(segment).or_else(|_| Cookie::parse(segment));
        match parsed {
            Ok(parsed) => {
                cookies
                    .entry(parsed.name().to_string())
                    .or_insert_with(|| parsed.value().to_string());
            }
            Err(e) => {
                tracing::trace!(segment = %segment, error = %e, "skipping cookie pair");
            }
        }
    }

    cookies
}

/// Name of the cookie a `Set-Cookie` line sets, percent-decoded.
pub fn set_cookie_name(line: &str) -> Option<String> {
    let pair = line.split(';').next()?;
    Cookie::parse_encoded(pair)
        .ok()
        .map(|parsed| parsed.name().to_string())
}

/// Value of the `domain` directive on a `Set-Cookie` line.
pub fn set_cookie_domain(line: &str) -> Option<&str> {
    line.split(';').skip(1).find_map(|directive| {
        let (key, value) = directive.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("domain")
            .then(|| value.trim())
    })
}

fn encode_pair(name: &str, value: &str) -> String {
    Cookie::new(name, value).encoded().to_string()
}
