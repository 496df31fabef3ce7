//! Denormalization of the upstream `last status change` timestamp.
//!
//! The field is unreliable: it may be missing, `null`, an empty string, or a
//! zero-date sentinel that some upstream apps emit in place of `null`. Only
//! two sentinel spellings are recognised; any other unparseable string is an
//! error rather than a silent absence.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::NormalizeError;

/// Zero-date spellings the upstream API uses as a null marker.
const NULL_DATE_SENTINELS: [&str; 2] = ["0000-00-00 00:00:00", "0000-00-00T00:00:00Z"];

/// Local `YYYY-MM-DD HH:MM:SS` timestamps carry no offset and are read as UTC.
const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Interprets a raw `last status change` value.
///
/// `None`, `null`, `""` and the zero-date sentinels yield `Ok(None)`. Strings
/// in local or RFC 3339 form yield the instant they denote.
///
/// # Errors
///
/// Returns [`NormalizeError::MalformedPayload`] keyed by `key` for non-string
/// values (numbers included) and for strings that are not a recognised
/// timestamp.
pub fn denormalize_last_status_change(
    key: &str,
    value: Option<&Value>,
) -> Result<Option<DateTime<Utc>>, NormalizeError> {
    let raw = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s.as_str(),
        Some(other) => {
            return Err(NormalizeError::malformed(
                key,
                format!("expected a date string, found {other}"),
            ))
        }
    };

    if raw.is_empty() || NULL_DATE_SENTINELS.contains(&raw) {
        return Ok(None);
    }

    parse_timestamp(raw)
        .map(Some)
        .ok_or_else(|| NormalizeError::malformed(key, format!("\"{raw}\" is not a valid date")))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, LOCAL_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
