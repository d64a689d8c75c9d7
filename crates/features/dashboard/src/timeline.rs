use crate::time::parse_day;
use chrono::NaiveDate;
use evhub_domain::Rsvp;
use serde::Serialize;
use std::collections::BTreeMap;

/// One bar of the RSVP activity chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub count: u64,
}

/// RSVPs received per UTC day, oldest first. Days without RSVPs are absent; RSVPs without a
/// readable `created_date` are skipped.
#[must_use]
pub fn rsvp_timeline(rsvps: &[Rsvp]) -> Vec<TimelinePoint> {
    let mut days: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for day in rsvps.iter().filter_map(|r| r.created_date.as_deref().and_then(parse_day)) {
        *days.entry(day).or_default() += 1;
    }
    days.into_iter().map(|(date, count)| TimelinePoint { date, count }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn groups_by_day_ascending() {
        let rsvps: Vec<Rsvp> = serde_json::from_value(json!([
            {"event_id": 1, "guest_name": "a", "created_date": "2026-05-02T10:00:00Z"},
            {"event_id": 1, "guest_name": "b", "created_date": "2026-05-01T23:59:59Z"},
            {"event_id": 1, "guest_name": "c", "created_date": "2026-05-02T08:15:00.123"},
            {"event_id": 1, "guest_name": "d"},
            {"event_id": 1, "guest_name": "e", "created_date": "not a date"},
            {"event_id": 1, "guest_name": "f", "created_date": "2026-05-01T22:00:00-03:00"},
        ]))
        .unwrap();

        let series = rsvp_timeline(&rsvps);
        let rendered = serde_json::to_value(&series).unwrap();
        assert_eq!(
            rendered,
            json!([
                {"date": "2026-05-01", "count": 1},
                {"date": "2026-05-02", "count": 3},
            ])
        );
    }
}
