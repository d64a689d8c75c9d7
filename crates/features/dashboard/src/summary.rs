use crate::stats::EventStats;
use crate::time::parse_timestamp;
use chrono::{DateTime, Utc};
use evhub_domain::{Event, Media, MediaType, Rsvp};
use serde::Serialize;

/// Stat cards of the dashboard home.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_events: u64,
    /// Events dated today or later.
    pub upcoming_events: u64,
    pub past_events: u64,
    /// Events without a readable date, counted in neither bucket.
    pub undated_events: u64,
    pub total_rsvps: u64,
    pub total_media: u64,
    pub photos: u64,
    pub videos: u64,
    pub rsvps: EventStats,
}

impl DashboardSummary {
    /// Aggregates already-fetched records; `now` decides upcoming versus past.
    ///
    /// An event dated on `now`'s UTC day counts as upcoming even if its time has passed.
    #[must_use]
    pub fn build(events: &[Event], rsvps: &[Rsvp], media: &[Media], now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let mut summary = Self {
            total_events: events.len() as u64,
            total_rsvps: rsvps.len() as u64,
            total_media: media.len() as u64,
            rsvps: EventStats::from_rsvps(rsvps),
            ..Self::default()
        };

        for event in events {
            match event.date.as_deref().and_then(parse_timestamp) {
                Some(date) if date.date_naive() >= today => summary.upcoming_events += 1,
                Some(_) => summary.past_events += 1,
                None => summary.undated_events += 1,
            }
        }

        for item in media {
            match item.media_type {
                MediaType::Image => summary.photos += 1,
                MediaType::Video => summary.videos += 1,
                MediaType::Other => {},
            }
        }

        summary
    }
}
