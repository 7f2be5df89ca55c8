use crate::base::error::CodecError;
use crate::cookies::expiry::Expiry;
use time::OffsetDateTime;

/// Value and directives for one outgoing cookie.
///
/// Defaults: no domain, no path, session expiry, `secure = false`,
/// `http_only = false`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CookieOptions {
    pub value: String,
    pub domain: Option<String>,
    pub path: Option<String>,
    pub expires: Expiry,
    pub secure: bool,
    pub http_only: bool,
}

impl CookieOptions {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn expires(mut self, expires: impl Into<Expiry>) -> Self {
        self.expires = expires.into();
        self
    }

    /// Set expiry from epoch seconds; `0` keeps it a session cookie.
    pub fn expires_at(mut self, timestamp: i64) -> Result<Self, CodecError> {
        self.expires = Expiry::from_timestamp(timestamp)?;
        Ok(self)
    }

    /// Set expiry from a relative or absolute string, resolved now.
    pub fn expires_in(mut self, expires: &str) -> Result<Self, CodecError> {
        self.expires = Expiry::parse(expires)?;
        Ok(self)
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Domain directive, if one is set and non-empty.
    pub fn domain_directive(&self) -> Option<&str> {
        self.domain.as_deref().filter(|d| !d.is_empty())
    }

    /// Path directive, if one is set and non-empty.
    pub fn path_directive(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }

    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires.is_past(now)
    }
}

impl From<&str> for CookieOptions {
    fn from(value: &str) -> Self {
        CookieOptions::new(value)
    }
}

impl From<String> for CookieOptions {
    fn from(value: String) -> Self {
        CookieOptions::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_defaults() {
        let options = CookieOptions::new("bar");
        assert_eq!(options.value, "bar");
        assert!(options.domain.is_none());
        assert!(options.path.is_none());
        assert!(options.expires.is_session());
        assert!(!options.secure);
        assert!(!options.http_only);
    }

    #[test]
    fn test_builder_chain() {
        let options = CookieOptions::new("bar")
            .domain("foo.com")
            .path("/foo")
            .secure(true)
            .http_only(true);
        assert_eq!(options.domain_directive(), Some("foo.com"));
        assert_eq!(options.path_directive(), Some("/foo"));
        assert!(options.secure && options.http_only);
    }

    #[test]
    fn test_empty_directives_are_absent() {
        let options = CookieOptions::new("bar").domain("").path("");
        assert!(options.domain_directive().is_none());
        assert!(options.path_directive().is_none());
    }

    #[test]
    fn test_expires_at_zero_is_session() {
        let options = CookieOptions::new("bar").expires_at(0).unwrap();
        assert!(options.expires.is_session());
    }

    #[test]
    fn test_expires_in_resolves_immediately() {
        let options = CookieOptions::new("bar").expires_in("2 days").unwrap();
        assert!(options.expires.timestamp() > OffsetDateTime::now_utc().unix_timestamp());
        assert!(CookieOptions::new("bar").expires_in("soonish").is_err());
    }

    #[test]
    fn test_is_expired() {
        let now = datetime!(2026-10-17 12:00:00 UTC);
        let past = CookieOptions::new("bar").expires(datetime!(2026-10-16 12:00:00 UTC));
        assert!(past.is_expired(now));
        assert!(!CookieOptions::new("bar").is_expired(now));
    }
}
