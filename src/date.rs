//! Internet date parsing for feed timestamps.
//!
//! Feeds carry dates in two families: RFC 822 (`Sun, 19 May 2002 15:21:36 GMT`,
//! used by RSS `pubDate`) and RFC 3339 (`2002-05-19T15:21:36Z`, used by Atom
//! and Dublin Core). Each family is a fixed list of formats tried in order
//! against the uppercased input; the first format that consumes the whole
//! string wins. Written offsets are honoured, and a missing zone means UTC.
//!
//! Nothing here fails loudly: an unparsable string is simply `None`.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Which family to try first. Both are always tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormatHint {
    #[default]
    Unspecified,
    Rfc822,
    Rfc3339,
}

/// RFC 822 body formats after the optional `EEE,` prefix, most specific first.
const RFC822_FORMATS: &[(&str, bool)] = &[
    // 19 May 2002 15:21:36 GMT
    ("%d %b %Y %H:%M:%S", true),
    // 19 May 2002 15:21 GMT
    ("%d %b %Y %H:%M", true),
    // 19 May 2002 15:21:36
    ("%d %b %Y %H:%M:%S", false),
    // 19 May 2002 15:21
    ("%d %b %Y %H:%M", false),
];

/// RFC 3339 formats, applied after zone normalization.
const RFC3339_ZONED_FORMATS: &[&str] = &[
    // 1996-12-19T16:39:57-0800
    "%Y-%m-%dT%H:%M:%S%z",
    // 1937-01-01T12:00:27.87+0020
    "%Y-%m-%dT%H:%M:%S%.f%z",
];
// 1937-01-01T12:00:27
const RFC3339_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Offsets after this many characters have their colons stripped.
const RFC3339_OFFSET_START: usize = 20;

const WEEKDAYS: &[&str] = &["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

/// Parses a feed date, trying RFC 822 and RFC 3339 in the order `hint` prefers.
///
/// # Examples
///
/// ```
/// use feedkit::date::{parse_internet_date, DateFormatHint};
///
/// let date = parse_internet_date("Sun, 19 May 2002 15:21:36 GMT", DateFormatHint::Rfc822).unwrap();
/// assert_eq!(date.to_rfc3339(), "2002-05-19T15:21:36+00:00");
///
/// assert!(parse_internet_date("yesterday", DateFormatHint::Unspecified).is_none());
/// ```
pub fn parse_internet_date(text: &str, hint: DateFormatHint) -> Option<DateTime<Utc>> {
    match hint {
        DateFormatHint::Rfc3339 => parse_rfc3339(text).or_else(|| parse_rfc822(text)),
        DateFormatHint::Rfc822 | DateFormatHint::Unspecified => {
            parse_rfc822(text).or_else(|| parse_rfc3339(text))
        }
    }
}

/// Parses an RFC 822 date such as `Sun, 19 May 2002 15:21:36 GMT`.
///
/// The weekday prefix is optional, as are seconds and the zone. Zones may be
/// numeric (`-0800`) or one of the RFC 822 names (`GMT`, `UT`, `EST`, `PDT`, ...).
pub fn parse_rfc822(text: &str) -> Option<DateTime<Utc>> {
    let upper = text.trim().to_uppercase();

    let body = if upper.contains(',') {
        let (weekday, rest) = upper.split_once(',')?;
        if !WEEKDAYS.contains(&weekday.trim()) {
            return None;
        }
        rest.trim_start()
    } else {
        upper.as_str()
    };

    for &(format, zoned) in RFC822_FORMATS {
        let parsed = if zoned {
            let Some((stamp, zone)) = body.rsplit_once(' ') else {
                continue;
            };
            match zone_offset(zone) {
                Some(offset) => NaiveDateTime::parse_from_str(stamp, format)
                    .ok()
                    .and_then(|naive| offset.from_local_datetime(&naive).single())
                    .map(|dt| dt.with_timezone(&Utc)),
                None => None,
            }
        } else {
            NaiveDateTime::parse_from_str(body, format)
                .ok()
                .map(|naive| naive.and_utc())
        };

        if parsed.is_some() {
            return parsed;
        }
    }

    None
}

/// Parses an RFC 3339 date such as `1996-12-19T16:39:57-08:00`.
///
/// A `Z` suffix is read as `-0000`, colons inside the offset are dropped,
/// fractional seconds are optional and a missing offset means UTC.
pub fn parse_rfc3339(text: &str) -> Option<DateTime<Utc>> {
    let mut normalized = text.trim().to_uppercase().replace('Z', "-0000");

    if normalized.len() > RFC3339_OFFSET_START && normalized.is_char_boundary(RFC3339_OFFSET_START) {
        let tail = normalized.split_off(RFC3339_OFFSET_START);
        normalized.extend(tail.chars().filter(|&c| c != ':'));
    }

    RFC3339_ZONED_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&normalized, format).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NaiveDateTime::parse_from_str(&normalized, RFC3339_LOCAL_FORMAT)
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// Resolves an RFC 822 zone token to a fixed offset.
fn zone_offset(zone: &str) -> Option<FixedOffset> {
    let hours = match zone {
        "GMT" | "UT" | "UTC" | "Z" => 0,
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        _ => return numeric_offset(zone),
    };
    FixedOffset::east_opt(hours * 3600)
}

/// `+HHMM` / `-HHMM`, with an optional colon between hours and minutes.
fn numeric_offset(zone: &str) -> Option<FixedOffset> {
    let (sign, digits) = match zone.as_bytes().first()? {
        b'+' => (1, &zone[1..]),
        b'-' => (-1, &zone[1..]),
        _ => return None,
    };
    let digits: String = digits.chars().filter(|&c| c != ':').collect();
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
