//! Time utilities: projecting server timestamps onto the display timezone.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Display timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// Parse an IANA timezone name like "America/Sao_Paulo".
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {name}"))
}

/// Calendar date of a UTC instant as seen in `tz`.
pub fn local_date(created_at: DateTime<Utc>, tz: Tz) -> NaiveDate {
    created_at.with_timezone(&tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_local_date_crosses_midnight() {
        // 01:30 UTC is still the previous evening in Sao Paulo (UTC-3)
        let tz = parse_timezone(DEFAULT_TIMEZONE).unwrap();
        let at = Utc.with_ymd_and_hms(2020, 4, 18, 1, 30, 0).unwrap();
        assert_eq!(local_date(at, tz), NaiveDate::from_ymd_opt(2020, 4, 17).unwrap());
        assert_eq!(
            local_date(at, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2020, 4, 18).unwrap()
        );
    }

    #[test]
    fn test_parse_timezone_rejects_garbage() {
        assert!(parse_timezone("Mars/Olympus").is_err());
        assert!(parse_timezone(" UTC ").is_ok());
    }
}
