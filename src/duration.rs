//! Parsing for human-readable timeouts like "10s", "500ms", "2m".

use std::time::Duration;

use serde::{de, Deserialize, Deserializer};

use crate::{Error, Result};

/// Parse a duration string like "500ms", "10s", "2m", or "1h".
///
/// The input is case-insensitive and surrounding whitespace is trimmed.
///
/// # Examples
///
/// ```
/// use investment_report::duration::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
/// assert_eq!(parse_duration("10s").unwrap(), Duration::from_secs(10));
/// assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
/// ```
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim().to_lowercase();

    // "ms" must be checked before "m" and "s".
    let (num, millis_per_unit): (&str, u64) = if let Some(num) = s.strip_suffix("ms") {
        (num, 1)
    } else if let Some(num) = s.strip_suffix('s') {
        (num, 1_000)
    } else if let Some(num) = s.strip_suffix('m') {
        (num, 60 * 1_000)
    } else if let Some(num) = s.strip_suffix('h') {
        (num, 60 * 60 * 1_000)
    } else {
        return Err(Error::Config(format!(
            "duration {s:?} must end with ms, s, m, or h"
        )));
    };

    let num: u64 = num
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("invalid number in duration {s:?}")))?;

    let millis = num
        .checked_mul(millis_per_unit)
        .ok_or_else(|| Error::Config(format!("duration {s:?} is too large")))?;

    Ok(Duration::from_millis(millis))
}

/// Format a duration using the largest unit that divides it evenly.
pub fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();

    if millis >= 3_600_000 && millis % 3_600_000 == 0 {
        format!("{}h", millis / 3_600_000)
    } else if millis >= 60_000 && millis % 60_000 == 0 {
        format!("{}m", millis / 60_000)
    } else if millis >= 1_000 && millis % 1_000 == 0 {
        format!("{}s", millis / 1_000)
    } else {
        format!("{millis}ms")
    }
}

/// Serde deserializer for duration strings.
///
/// Use with `#[serde(deserialize_with = "deserialize_duration")]`.
pub fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(de::Error::custom)
}
