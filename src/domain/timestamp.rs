//! Feed timestamp parsing.
//!
//! The feed serializes timestamps as `"yyyy-MM-dd HH:mm:ss"` wall-clock
//! strings in the America/New_York zone. Anything that does not match is a
//! decode error for the whole batch; there is no silent default.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::America::New_York;
use serde::{Deserialize, Deserializer};

pub const FEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a feed timestamp string into UTC.
///
/// Wall-clock times repeated by the DST fall-back hour are valid feed input
/// and resolve to the earlier instant; only times skipped by spring-forward
/// are rejected.
pub fn parse_feed_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let naive = NaiveDateTime::parse_from_str(raw, FEED_TIMESTAMP_FORMAT)
        .map_err(|e| format!("invalid feed timestamp {raw:?}: {e}"))?;
    let local = match New_York.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            return Err(format!(
                "timestamp {raw:?} does not exist in America/New_York"
            ));
        }
    };
    Ok(local.with_timezone(&Utc))
}

/// Serde adapter for [`parse_feed_timestamp`], used by `BetRecord`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_feed_timestamp(&raw).map_err(serde::de::Error::custom)
}
