use chrono::{DateTime, Utc};

/// Current UTC timestamp. All persisted and wire-level date-times flow
/// through here so they stay ISO-8601 UTC.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
