//! Cookie expiry resolution and formatting.
//!
//! Expiry input arrives in several shapes (epoch seconds, absolute dates,
//! relative phrases like `"2 days"`). Everything is resolved to an absolute
//! [`Expiry`] up front so header formatting never has to interpret strings.

use crate::base::error::CodecError;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time};

/// Netscape cookie date, e.g. `Mon, 19-Oct-2026 12:00:00 GMT`.
const COOKIE_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day]-[month repr:short]-[year] [hour]:[minute]:[second] GMT"
);

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_WEEK: i64 = 604_800;

/// When a cookie stops being valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expiry {
    /// No `expires` directive; the cookie lives for the browser session.
    #[default]
    Session,
    /// Absolute expiry instant.
    At(OffsetDateTime),
}

impl Expiry {
    /// Build from epoch seconds. `0` means a session cookie.
    pub fn from_timestamp(seconds: i64) -> Result<Self, CodecError> {
        if seconds == 0 {
            return Ok(Expiry::Session);
        }
        OffsetDateTime::from_unix_timestamp(seconds)
            .map(Expiry::At)
            .map_err(|_| CodecError::TimestampOutOfRange(seconds))
    }

    /// Resolve an expiry string relative to the current time.
    pub fn parse(input: &str) -> Result<Self, CodecError> {
        Self::parse_at(input, OffsetDateTime::now_utc())
    }

    /// Resolve an expiry string relative to `now`.
    ///
    /// Accepts `""`/`"0"` (session), epoch seconds, RFC 3339, RFC 2822, the
    /// cookie date format, and relative phrases such as `"+1 week 2 days"`.
    pub fn parse_at(input: &str, now: OffsetDateTime) -> Result<Self, CodecError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Expiry::Session);
        }

        if let Ok(seconds) = trimmed.parse::<i64>() {
            return Self::from_timestamp(seconds);
        }

        if let Some(at) = parse_absolute(trimmed) {
            return Ok(Expiry::At(at));
        }

        match parse_relative(trimmed, now) {
            Some(at) => Ok(Expiry::At(at)),
            None => {
                tracing::debug!(input = %trimmed, "unrecognized cookie expiry");
                Err(CodecError::invalid_expiry(trimmed))
            }
        }
    }

    pub fn is_session(&self) -> bool {
        matches!(self, Expiry::Session)
    }

    pub fn datetime(&self) -> Option<OffsetDateTime> {
        match self {
            Expiry::Session => None,
            Expiry::At(at) => Some(*at),
        }
    }

    /// Epoch seconds, with `0` standing for a session cookie.
    pub fn timestamp(&self) -> i64 {
        self.datetime().map_or(0, OffsetDateTime::unix_timestamp)
    }

    /// Whether the expiry lies before `now`. Session cookies never expire here.
    pub fn is_past(&self, now: OffsetDateTime) -> bool {
        self.datetime().is_some_and(|at| at < now)
    }

    /// Format for the `expires` directive; `None` for session cookies.
    pub fn to_cookie_date(&self) -> Option<String> {
        let at = self.datetime()?;
        format_cookie_date(at)
    }
}

impl From<OffsetDateTime> for Expiry {
    fn from(at: OffsetDateTime) -> Self {
        Expiry::At(at)
    }
}

/// Format an instant as a cookie date in GMT.
pub fn format_cookie_date(at: OffsetDateTime) -> Option<String> {
    match at.to_offset(time::UtcOffset::UTC).format(COOKIE_DATE) {
        Ok(formatted) => Some(formatted),
        Err(e) => {
            tracing::warn!(error = %e, "cookie expiry cannot be formatted");
            None
        }
    }
}

fn parse_absolute(input: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(input, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(input, &Rfc2822))
        .ok()
        .or_else(|| {
            PrimitiveDateTime::parse(input, COOKIE_DATE)
                .ok()
                .map(PrimitiveDateTime::assume_utc)
        })
}

/// Resolve phrases like `"2 days"`, `"+1 hour 30 minutes"`, `"-100 seconds"`,
/// `"now"`, `"tomorrow"`.
fn parse_relative(input: &str, now: OffsetDateTime) -> Option<OffsetDateTime> {
    let lower = input.to_ascii_lowercase();
    let mut tokens = lower.split_whitespace();
    let mut at = now;
    let mut matched = false;

    while let Some(token) = tokens.next() {
        match token {
            "now" => {}
            "today" | "midnight" => at = at.replace_time(Time::MIDNIGHT),
            "tomorrow" => at = at.replace_time(Time::MIDNIGHT).checked_add(Duration::DAY)?,
            "yesterday" => at = at.replace_time(Time::MIDNIGHT).checked_sub(Duration::DAY)?,
            _ => {
                let amount: i64 = token.parse().ok()?;
                let unit = tokens.next()?;
                at = shift(at, amount, unit)?;
            }
        }
        matched = true;
    }

    matched.then_some(at)
}

fn shift(at: OffsetDateTime, amount: i64, unit: &str) -> Option<OffsetDateTime> {
    let unit = unit.strip_suffix('s').unwrap_or(unit);
    let seconds_per = match unit {
        "sec" | "second" => 1,
        "min" | "minute" => SECONDS_PER_MINUTE,
        "hour" => SECONDS_PER_HOUR,
        "day" => SECONDS_PER_DAY,
        "week" => SECONDS_PER_WEEK,
        "fortnight" => 2 * SECONDS_PER_WEEK,
        "month" => return add_months(at, amount),
        "year" => return add_months(at, amount.checked_mul(12)?),
        _ => return None,
    };
    at.checked_add(Duration::seconds(amount.checked_mul(seconds_per)?))
}

/// Calendar month arithmetic. Days past the end of the target month roll
/// over into the next one (Jan 31 + 1 month = Mar 3 in a non-leap year).
fn add_months(at: OffsetDateTime, months: i64) -> Option<OffsetDateTime> {
    let index = i64::from(at.year()) * 12 + i64::from(u8::from(at.month())) - 1;
    let target = index.checked_add(months)?;
    let year = i32::try_from(target.div_euclid(12)).ok()?;
    let month = Month::try_from(u8::try_from(target.rem_euclid(12) + 1).ok()?).ok()?;
    let first = Date::from_calendar_date(year, month, 1).ok()?;
    let date = first.checked_add(Duration::days(i64::from(at.day()) - 1))?;
    Some(at.replace_date(date))
}
