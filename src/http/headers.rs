use crate::base::error::CodecError;
use crate::cookies::header::{build_delete_line, build_set_cookie_line, set_cookie_domain, set_cookie_name};
use crate::cookies::options::CookieOptions;
use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use std::str::FromStr;

/// Header name holding outgoing cookies.
pub const SET_COOKIE: &str = "Set-Cookie";

/// Separator between logical cookies inside the `Set-Cookie` entry.
const COOKIE_LINE_SEPARATOR: char = '\n';

/// Response headers under assembly.
///
/// Preserves insertion order and original casing; lookups are
/// case-insensitive. `Set-Cookie` holds every outgoing cookie joined by `\n`
/// until [`to_header_map`](Self::to_header_map) splits them into separate
/// header lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderCollection {
    headers: Vec<(String, String)>,
}

impl HeaderCollection {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
        }
    }

    /// Set a header, replacing any existing value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        if let Some((_, v)) = self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            *v = value;
        } else {
            self.headers.push((name, value));
        }
    }

    /// Get header value (case-insensitive lookup).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self
            .headers
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))?;
        Some(self.headers.remove(idx).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get all headers as-is with original casing.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Append a `Set-Cookie` line after any existing ones.
    pub fn append_set_cookie(&mut self, line: impl Into<String>) {
        let line = line.into();
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(SET_COOKIE))
        {
            Some((_, existing)) if !existing.is_empty() => {
                existing.push(COOKIE_LINE_SEPARATOR);
                existing.push_str(&line);
            }
            Some((_, existing)) => *existing = line,
            None => self.headers.push((SET_COOKIE.to_string(), line)),
        }
    }

    /// Format and append a cookie.
    pub fn set_cookie(&mut self, name: &str, options: &CookieOptions) -> Result<(), CodecError> {
        self.append_set_cookie(build_set_cookie_line(name, options)?);
        Ok(())
    }

    /// Drop pending lines for `name` and append a deletion line.
    ///
    /// With a domain in `options`, only lines for `name` on that same domain
    /// are dropped; cookies of that name on other domains stay.
    ///
    /// Nothing changes when the deletion line cannot be built.
    pub fn delete_cookie(&mut self, name: &str, options: &CookieOptions) -> Result<(), CodecError> {
        let delete_line = build_delete_line(name, options)?;
        let domain = options.domain_directive();
        let survivors: Vec<String> = self
            .set_cookie_lines()
            .filter(|line| {
                let same_name = set_cookie_name(line).as_deref() == Some(name);
                let same_scope = match domain {
                    Some(domain) => set_cookie_domain(line)
                        .is_some_and(|d| d.eq_ignore_ascii_case(domain)),
                    None => true,
                };
                !(same_name && same_scope)
            })
            .map(String::from)
            .collect();

        if survivors.is_empty() {
            self.remove(SET_COOKIE);
        } else {
            self.insert(SET_COOKIE, survivors.join("\n"));
        }

        self.append_set_cookie(delete_line);
        Ok(())
    }

    /// Individual `Set-Cookie` lines in order.
    pub fn set_cookie_lines(&self) -> impl Iterator<Item = &str> {
        self.get(SET_COOKIE)
            .into_iter()
            .flat_map(|value| value.split(COOKIE_LINE_SEPARATOR))
            .filter(|line| !line.is_empty())
    }

    /// Convert to an `http::HeaderMap`, one `set-cookie` entry per cookie.
    pub fn to_header_map(&self) -> Result<HeaderMap, CodecError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_str(name)?;
            if name.eq_ignore_ascii_case(SET_COOKIE) {
                for line in value.split(COOKIE_LINE_SEPARATOR).filter(|l| !l.is_empty()) {
                    map.append(header_name.clone(), HeaderValue::from_str(line)?);
                }
            } else {
                map.append(header_name, HeaderValue::from_str(value)?);
            }
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_insert() {
        let mut headers = HeaderCollection::new();
        headers.insert("Content-Type", "application/json");
        headers.insert("content-type", "text/html");

        assert_eq!(headers.get("CONTENT-TYPE"), Some("text/html"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_first_cookie_becomes_sole_value() {
        let mut headers = HeaderCollection::new();
        headers.set_cookie("foo", &CookieOptions::new("bar")).unwrap();
        assert_eq!(headers.get(SET_COOKIE), Some("foo=bar"));
    }

    #[test]
    fn test_append_preserves_existing() {
        let mut headers = HeaderCollection::new();
        headers.insert(SET_COOKIE, "one=two");
        headers.set_cookie("foo", &CookieOptions::new("bar")).unwrap();
        assert_eq!(headers.get(SET_COOKIE), Some("one=two\nfoo=bar"));
    }

    #[test]
    fn test_append_to_empty_value() {
        let mut headers = HeaderCollection::new();
        headers.insert(SET_COOKIE, "");
        headers.append_set_cookie("foo=bar");
        assert_eq!(headers.get(SET_COOKIE), Some("foo=bar"));
    }

    #[test]
    fn test_delete_with_surviving_cookie() {
        let mut headers = HeaderCollection::new();
        headers.insert(SET_COOKIE, "foo=bar\none=two");
        headers.delete_cookie("foo", &CookieOptions::default()).unwrap();

        let value = headers.get(SET_COOKIE).unwrap();
        assert!(value.starts_with("one=two\nfoo=; expires="), "{value}");
    }

    #[test]
    fn test_delete_without_surviving_cookie() {
        let mut headers = HeaderCollection::new();
        headers.insert(SET_COOKIE, "foo=bar");
        headers.delete_cookie("foo", &CookieOptions::default()).unwrap();

        let value = headers.get(SET_COOKIE).unwrap();
        assert!(value.starts_with("foo=; expires="), "{value}");
        assert_eq!(headers.set_cookie_lines().count(), 1);
    }

    #[test]
    fn test_delete_matching_domain() {
        let mut headers = HeaderCollection::new();
        headers.insert(SET_COOKIE, "foo=bar; domain=foo.com");
        headers.delete_cookie("foo", &CookieOptions::default().domain("foo.com")).unwrap();

        let value = headers.get(SET_COOKIE).unwrap();
        assert!(value.starts_with("foo=; domain=foo.com; expires="), "{value}");
    }

    #[test]
    fn test_delete_other_domain_keeps_original() {
        let mut headers = HeaderCollection::new();
        headers.insert(SET_COOKIE, "foo=bar; domain=foo.com");
        headers.delete_cookie("foo", &CookieOptions::default().domain("bar.com")).unwrap();

        let value = headers.get(SET_COOKIE).unwrap();
        assert!(
            value.starts_with("foo=bar; domain=foo.com\nfoo=; domain=bar.com"),
            "{value}"
        );
    }

    #[test]
    fn test_delete_ignores_name_prefixes() {
        let mut headers = HeaderCollection::new();
        headers.insert(SET_COOKIE, "foobar=1");
        headers.delete_cookie("foo", &CookieOptions::default()).unwrap();
        let lines: Vec<_> = headers.set_cookie_lines().collect();
        assert_eq!(lines[0], "foobar=1");
        assert!(lines[1].starts_with("foo=; expires="));
    }

    #[test]
    fn test_to_header_map_splits_cookies() {
        let mut headers = HeaderCollection::new();
        headers.insert("Content-Type", "text/html");
        headers.append_set_cookie("one=two");
        headers.append_set_cookie("foo=bar; path=/");

        let map = headers.to_header_map().unwrap();
        let cookies: Vec<_> = map
            .get_all(http::header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(cookies, vec!["one=two", "foo=bar; path=/"]);
        assert_eq!(map.get(http::header::CONTENT_TYPE).unwrap(), "text/html");
    }

    #[test]
    fn test_to_header_map_invalid_name() {
        let mut headers = HeaderCollection::new();
        headers.insert("Bad Header", "value");
        assert_eq!(headers.to_header_map(), Err(CodecError::InvalidHeader));
    }

    #[test]
    fn test_injected_path_leaves_headers_untouched() {
        let mut headers = HeaderCollection::new();
        headers.set_cookie("one", &CookieOptions::new("two")).unwrap();

        let injected = CookieOptions::new("bar").path("/\nadmin=1; domain=evil.com");
        assert!(headers.set_cookie("foo", &injected).is_err());
        assert!(headers.delete_cookie("one", &injected).is_err());

        let map = headers.to_header_map().unwrap();
        assert_eq!(map.get_all(http::header::SET_COOKIE).iter().count(), 1);
        assert_eq!(headers.get(SET_COOKIE), Some("one=two"));
    }
}
