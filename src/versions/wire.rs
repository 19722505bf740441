use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

/// One raw version entry as both upstream sources emit it. Every field is
/// optional; projection into the public model decides what is usable.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawVersion {
    pub(crate) bundle_version: Option<String>,
    pub(crate) created_at: Option<String>,
    pub(crate) external_identifier: Option<RawId>,
    pub(crate) release_notes: Option<String>,
}

/// The sources disagree on whether the identifier is a JSON string or a
/// number; either way it is opaque to us.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    pub(crate) fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Parse the `created_at` shapes seen in the wild: RFC 3339, a bare
/// `YYYY-MM-DD HH:MM:SS`, or a date-only `YYYY-MM-DD`.
pub(crate) fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
