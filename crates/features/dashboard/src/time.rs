use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parses backend timestamps: RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]` (taken as UTC),
/// or a bare date (midnight UTC).
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// UTC calendar day of a backend timestamp.
pub(crate) fn parse_day(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|ts| ts.date_naive())
}
