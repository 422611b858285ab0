use chrono::{DateTime, SecondsFormat, Utc};

// ISO-8601 with millisecond precision and a `Z` suffix, e.g. `2024-05-01T09:30:00.123Z`
pub fn iso_millis(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// Custom serializer for timestamps in the format produced by `iso_millis`
pub fn serialize_iso_millis<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&iso_millis(ts))
}
