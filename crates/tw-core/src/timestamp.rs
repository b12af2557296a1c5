//! Persisted form of `fetched_at` and read-repair for rows that carry a
//! timestamp nobody can parse.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Serializes a snapshot time as RFC 3339 (ISO-8601 with offset).
pub fn format_fetched_at(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

/// Parses RFC 3339, then offset-less ISO-8601 (taken as UTC).
pub fn parse_fetched_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Like [`parse_fetched_at`] but never fails: an unreadable value is replaced
/// with the current time. The substituted value carries no information.
pub fn repair_fetched_at(raw: &str) -> DateTime<Utc> {
    parse_fetched_at(raw).unwrap_or_else(|| {
        tracing::info!(raw, "unparseable fetched_at, substituting current time");
        Utc::now()
    })
}
