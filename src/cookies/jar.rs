use crate::base::config::CookieSettings;
use crate::base::error::CodecError;
use crate::cookies::options::CookieOptions;
use crate::http::headers::HeaderCollection;
use std::collections::HashMap;

/// Cookies queued for the current response, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseCookies {
    cookies: Vec<(String, CookieOptions)>,
}

impl ResponseCookies {
    pub fn new() -> Self {
        Self {
            cookies: Vec::new(),
        }
    }

    /// Queue a cookie, replacing one with the same name in place.
    pub fn set(&mut self, name: impl Into<String>, options: impl Into<CookieOptions>) {
        let name = name.into();
        let options = options.into();

        if let Some((_, existing)) = self.cookies.iter_mut().find(|(n, _)| *n == name) {
            *existing = options;
        } else {
            self.cookies.push((name, options));
        }
    }

    pub fn get(&self, name: &str) -> Option<&CookieOptions> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, options)| options)
    }

    pub fn remove(&mut self, name: &str) -> Option<CookieOptions> {
        let idx = self.cookies.iter().position(|(n, _)| n == name)?;
        Some(self.cookies.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CookieOptions)> {
        self.cookies.iter().map(|(n, o)| (n.as_str(), o))
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

/// Write every queued cookie into `headers` as a `Set-Cookie` line.
///
/// With `settings.encrypt`, each value is replaced by its secure envelope,
/// bound to the cookie's own expiry (`0` for session cookies).
pub fn serialize_cookies(
    headers: &mut HeaderCollection,
    cookies: &ResponseCookies,
    settings: &CookieSettings,
) -> Result<(), CodecError> {
    if !settings.encrypt {
        for (name, options) in cookies.iter() {
            headers.set_cookie(name, options)?;
        }
        return Ok(());
    }

    let codec = settings.codec();
    for (name, options) in cookies.iter() {
        let sealed = CookieOptions {
            value: codec.encode(&options.value, options.expires.timestamp())?,
            ..options.clone()
        };
        headers.set_cookie(name, &sealed)?;
    }

    tracing::trace!(count = cookies.len(), "serialized encrypted cookies");
    Ok(())
}

/// Open secure envelopes in a parsed `Cookie` header.
///
/// Values that fail verification are dropped, so callers see them as absent.
/// With encryption disabled the map is returned untouched.
pub fn decode_request_cookies(
    cookies: HashMap<String, String>,
    settings: &CookieSettings,
) -> HashMap<String, String> {
    if !settings.encrypt {
        return cookies;
    }

    let codec = settings.codec();
    cookies
        .into_iter()
        .filter_map(|(name, envelope)| match codec.decode(&envelope) {
            Ok(value) => Some((name, value)),
            Err(_) => {
                tracing::debug!(name = %name, "dropping invalid secure cookie");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::header::parse_cookie_header;
    use crate::http::headers::SET_COOKIE;

    fn encrypting() -> CookieSettings {
        CookieSettings {
            encrypt: true,
            secret_key: zeroize::Zeroizing::new("secret".to_string()),
            ..CookieSettings::default()
        }
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut cookies = ResponseCookies::new();
        cookies.set("a", "1");
        cookies.set("b", "2");
        cookies.set("a", "3");

        let names: Vec<_> = cookies.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(cookies.get("a").unwrap().value, "3");
    }

    #[test]
    fn test_remove() {
        let mut cookies = ResponseCookies::new();
        cookies.set("a", "1");
        assert_eq!(cookies.remove("a").unwrap().value, "1");
        assert!(cookies.is_empty());
        assert!(cookies.remove("a").is_none());
    }

    #[test]
    fn test_serialize_plain() {
        let mut cookies = ResponseCookies::new();
        cookies.set("foo", CookieOptions::new("bar").path("/"));
        cookies.set("one", "two");

        let mut headers = HeaderCollection::new();
        serialize_cookies(&mut headers, &cookies, &CookieSettings::default()).unwrap();
        assert_eq!(headers.get(SET_COOKIE), Some("foo=bar; path=/\none=two"));
    }

    #[test]
    fn test_serialize_encrypted_roundtrip() {
        let settings = encrypting();
        let mut cookies = ResponseCookies::new();
        cookies.set("foo", CookieOptions::new("bar").expires_in("1 hour").unwrap());

        let mut headers = HeaderCollection::new();
        serialize_cookies(&mut headers, &cookies, &settings).unwrap();

        let line = headers.get(SET_COOKIE).unwrap();
        assert!(!line.starts_with("foo=bar"));
        let pair = line.split(';').next().unwrap();
        let parsed = parse_cookie_header(pair);
        let decoded = decode_request_cookies(parsed, &settings);
        assert_eq!(decoded["foo"], "bar");
    }

    #[test]
    fn test_serialize_encrypted_empty_value_stays_empty() {
        let mut cookies = ResponseCookies::new();
        cookies.set("foo", "");
        let mut headers = HeaderCollection::new();
        serialize_cookies(&mut headers, &cookies, &encrypting()).unwrap();
        assert_eq!(headers.get(SET_COOKIE), Some("foo="));
    }

    #[test]
    fn test_decode_drops_invalid() {
        let settings = encrypting();
        let envelope = settings.codec().encode("bar", 0).unwrap();
        let mut cookies = HashMap::new();
        cookies.insert("good".to_string(), envelope);
        cookies.insert("bad".to_string(), "0|deadbeef|AAAA".to_string());

        let decoded = decode_request_cookies(cookies, &settings);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded["good"], "bar");
    }

    #[test]
    fn test_decode_passthrough_when_disabled() {
        let mut cookies = HashMap::new();
        cookies.insert("foo".to_string(), "bar".to_string());
        let decoded = decode_request_cookies(cookies.clone(), &CookieSettings::default());
        assert_eq!(decoded, cookies);
    }
}
