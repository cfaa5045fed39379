//! Lenient decoding for stored `created` timestamps.
//!
//! Older saves carry RFC 3339 strings or fractional numbers where current
//! saves write integer epoch milliseconds. Values that cannot be read decode
//! as `0` instead of rejecting the whole record.

use chrono::DateTime;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTimestamp {
    Millis(i64),
    Fractional(f64),
    Text(String),
}

/// `deserialize_with` target for epoch-millisecond fields.
pub(crate) fn epoch_ms<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Option::<StoredTimestamp>::deserialize(deserializer)?;
    Ok(match stored {
        None => 0,
        Some(StoredTimestamp::Millis(ms)) => ms,
        Some(StoredTimestamp::Fractional(ms)) if ms.is_finite() => ms as i64,
        Some(StoredTimestamp::Fractional(_)) => 0,
        Some(StoredTimestamp::Text(text)) => parse_text(&text),
    })
}

fn parse_text(text: &str) -> i64 {
    let trimmed = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.timestamp_millis();
    }
    trimmed.parse::<i64>().unwrap_or(0)
}
