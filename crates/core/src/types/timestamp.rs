//! Lenient timestamp decoding.
//!
//! The API emits RFC 3339 timestamps from its resource classes but plain
//! `YYYY-MM-DD HH:MM:SS` strings (UTC) when a model is serialized directly.
//! Both decode; anything else decodes as `None` instead of failing the whole
//! response.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Formats without an offset, read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a timestamp in any format the API is known to emit.
#[must_use]
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// `deserialize_with` helper for optional timestamps.
///
/// # Errors
///
/// Only fails if the input is not valid JSON at all.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(raw)) => parse(&raw),
        _ => None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_parse_rfc3339_with_fraction() {
        let ts = parse("2026-01-05T10:00:00.000000Z").unwrap();
        assert_eq!((ts.year(), ts.hour()), (2026, 10));
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let ts = parse("2026-01-05T12:00:00+02:00").unwrap();
        assert_eq!(ts.hour(), 10);
    }

    #[test]
    fn test_parse_plain_datetime_as_utc() {
        let ts = parse("2026-01-05 10:00:00").unwrap();
        assert_eq!(ts, parse("2026-01-05T10:00:00Z").unwrap());
    }

    #[test]
    fn test_unparseable_is_none() {
        assert!(parse("yesterday").is_none());
        assert!(parse("").is_none());
    }
}
