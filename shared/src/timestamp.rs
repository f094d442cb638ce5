//! Lenient ISO-8601 parsing shared by query parameters and the backing file.
//!
//! Timestamps carrying an offset are converted to UTC, naive ones are taken
//! as UTC, and a bare date means midnight.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
    "%Y-%m-%dT%H:%M%#z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some(time.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(time) = DateTime::parse_from_str(value, format) {
            return Some(time.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(time) = NaiveDateTime::parse_from_str(value, format) {
            return Some(time.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|time| time.and_utc())
}

/// `deserialize_with` adapter for fields parsed with [`parse`].
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid ISO-8601 datetime: '{}'", value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_parse_rfc3339() {
        assert_eq!(parse("2021-01-02T00:00:00Z"), Some(utc(2021, 1, 2, 0, 0)));
        assert_eq!(
            parse("2021-01-02T00:00:00.000Z"),
            Some(utc(2021, 1, 2, 0, 0))
        );
    }

    #[test]
    fn test_parse_converts_offset_to_utc() {
        assert_eq!(
            parse("2021-01-02T01:30:00+01:00"),
            Some(utc(2021, 1, 2, 0, 30))
        );
    }

    #[test]
    fn test_parse_space_separated_with_offset() {
        // Layout of the energy dataset `dtm` column
        assert_eq!(
            parse("2020-09-20 00:30:00+00:00"),
            Some(utc(2020, 9, 20, 0, 30))
        );
    }

    #[test]
    fn test_parse_naive_is_utc() {
        assert_eq!(parse("2021-01-02T00:00"), Some(utc(2021, 1, 2, 0, 0)));
        assert_eq!(parse("2021-01-02 06:15"), Some(utc(2021, 1, 2, 6, 15)));
        assert_eq!(parse("2021-01-02T06:15:00"), Some(utc(2021, 1, 2, 6, 15)));
        assert_eq!(
            parse("2021-01-02 06:15:00.250"),
            Some(Utc.with_ymd_and_hms(2021, 1, 2, 6, 15, 0).unwrap()
                + chrono::TimeDelta::milliseconds(250))
        );
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        assert_eq!(parse("2021-01-02"), Some(utc(2021, 1, 2, 0, 0)));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse("  2021-01-02T00:00  "), Some(utc(2021, 1, 2, 0, 0)));
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(parse("not-a-date").is_none());
        assert!(parse("").is_none());
        assert!(parse("2021-02-30T00:00").is_none());
        assert!(parse("2021-01-02T25:00").is_none());
    }
}
