//! Audit timestamp formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format an instant as an audit timestamp: RFC 3339, UTC, whole seconds,
/// `Z` suffix (e.g. `2024-03-01T09:30:00Z`). Sorts lexically by time.
pub fn format_audit_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The current time as an audit timestamp.
pub fn audit_now() -> String {
    format_audit_timestamp(Utc::now())
}
