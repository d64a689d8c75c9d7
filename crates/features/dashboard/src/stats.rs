use evhub_domain::{Rsvp, RsvpStatus};
use serde::Serialize;

/// RSVP breakdown for one event (or any set of RSVPs).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EventStats {
    pub total: u64,
    pub attending: u64,
    pub declined: u64,
    pub maybe: u64,
    pub pending: u64,
    /// Expected guests: the party sizes of attending RSVPs.
    pub headcount: u64,
    /// Share of RSVPs that answered (anything but pending), `0.0` without RSVPs.
    pub response_rate: f64,
}

impl EventStats {
    #[must_use]
    pub fn from_rsvps(rsvps: &[Rsvp]) -> Self {
        let mut stats = rsvps.iter().fold(Self::default(), |mut acc, rsvp| {
            acc.total += 1;
            match rsvp.status {
                RsvpStatus::Attending => {
                    acc.attending += 1;
                    acc.headcount += u64::from(rsvp.guest_count);
                },
                RsvpStatus::Declined => acc.declined += 1,
                RsvpStatus::Maybe => acc.maybe += 1,
                RsvpStatus::Pending => acc.pending += 1,
            }
            acc
        });
        stats.response_rate = ratio(stats.total - stats.pending, stats.total);
        stats
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 / whole as f64 }
}
