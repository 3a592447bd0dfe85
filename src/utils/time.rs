//! Time utilities
//!
//! Finish times and split times are elapsed durations written `HH:MM:SS`;
//! paces are `MM:SS` per kilometer. Ordering must always go through the
//! parsed seconds, never the strings.

use std::sync::LazyLock;

use regex::Regex;

static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3}):([0-5]\d):([0-5]\d)$").expect("valid regex"));

static PACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3}):([0-5]\d)$").expect("valid regex"));

/// Seconds in a day, the upper bound for wall-clock pass times
pub const SECONDS_PER_DAY: u32 = 24 * 3600;

/// Malformed time strings
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeFormatError {
    #[error("expected HH:MM:SS, got '{0}'")]
    Clock(String),

    #[error("expected MM:SS, got '{0}'")]
    Pace(String),
}

/// Parse an elapsed `HH:MM:SS` time into seconds
pub fn parse_hms(input: &str) -> Result<u32, TimeFormatError> {
    let trimmed = input.trim();
    let caps = CLOCK_RE
        .captures(trimmed)
        .ok_or_else(|| TimeFormatError::Clock(input.to_string()))?;

    let field = |i: usize| -> u32 { caps[i].parse().unwrap_or(0) };
    Ok(field(1) * 3600 + field(2) * 60 + field(3))
}

/// Format seconds as `HH:MM:SS`
pub fn format_hms(seconds: u32) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Parse a `MM:SS` pace into seconds per kilometer
pub fn parse_pace(input: &str) -> Result<u32, TimeFormatError> {
    let trimmed = input.trim();
    let caps = PACE_RE
        .captures(trimmed)
        .ok_or_else(|| TimeFormatError::Pace(input.to_string()))?;

    let field = |i: usize| -> u32 { caps[i].parse().unwrap_or(0) };
    Ok(field(1) * 60 + field(2))
}

/// Format seconds per kilometer as `MM:SS`
pub fn format_pace(seconds_per_km: u32) -> String {
    format!("{:02}:{:02}", seconds_per_km / 60, seconds_per_km % 60)
}

/// Convert a `MM:SS` pace into decimal minutes (e.g. `04:30` -> 4.5)
pub fn pace_to_minutes(input: &str) -> Result<f64, TimeFormatError> {
    parse_pace(input).map(|secs| f64::from(secs) / 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hms() {
        assert_eq!(parse_hms("01:02:03"), Ok(3723));
        assert_eq!(parse_hms("00:46:45"), Ok(2805));
        assert_eq!(parse_hms("0:32:53"), Ok(1973));
        assert_eq!(parse_hms(" 02:00:00 "), Ok(7200));
    }

    #[test]
    fn test_parse_hms_rejects_malformed() {
        assert!(parse_hms("").is_err());
        assert!(parse_hms("46:45").is_err());
        assert!(parse_hms("00:60:00").is_err());
        assert!(parse_hms("00:00:61").is_err());
        assert!(parse_hms("aa:bb:cc").is_err());
        assert!(parse_hms("-1:00:00").is_err());
    }

    #[test]
    fn test_hms_round_trip() {
        for t in ["00:00:01", "00:46:45", "01:02:03", "03:59:59", "12:00:00", "99:59:59"] {
            assert_eq!(format_hms(parse_hms(t).unwrap()), t);
        }
    }

    #[test]
    fn test_numeric_order_differs_from_lexical() {
        // "100:00:00" sorts before "99:00:00" lexically
        assert!("100:00:00" < "99:00:00");
        assert!(parse_hms("100:00:00").unwrap() > parse_hms("99:00:00").unwrap());
    }

    #[test]
    fn test_pace() {
        assert_eq!(parse_pace("04:40"), Ok(280));
        assert_eq!(format_pace(280), "04:40");
        assert_eq!(format_pace(59), "00:59");
        assert!(parse_pace("4:75").is_err());
        assert_eq!(pace_to_minutes("04:30"), Ok(4.5));
    }
}
