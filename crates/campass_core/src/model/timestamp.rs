//! Zone-less timestamp codec used on the wire and in storage.
//!
//! The companion client sends local date-times with minute precision
//! (`2025-12-01T09:00`), while other callers send seconds and fractions.
//! Both are accepted, as is a trailing `Z` from `toISOString()`, whose UTC
//! wall time is kept as-is. JSON `null` decodes to the zero value, same as
//! an absent field. Output always carries seconds and a fraction only when
//! it is non-zero.

use chrono::NaiveDateTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

/// Canonical output format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const ACCEPTED_FORMATS: &[&str] = &[TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a local date-time in any accepted format.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_suffix(['Z', 'z']).unwrap_or(trimmed);
    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}

/// Formats a local date-time in the canonical format.
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// `#[serde(with = "timestamp")]` serializer.
pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(value))
}

/// `#[serde(with = "timestamp")]` deserializer.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(NaiveDateTime::default());
    };
    parse_timestamp(&raw).ok_or_else(|| {
        D::Error::custom(format!(
            "invalid timestamp `{raw}`; expected YYYY-MM-DDTHH:MM[:SS[.fff]]"
        ))
    })
}
