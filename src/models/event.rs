//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle status of an event.
///
/// `Cancelled` is terminal and is never recomputed from time; the other
/// three are a pure function of (start, end, now).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Scheduled,
    Active,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Scheduled => "scheduled",
            EventStatus::Active => "active",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, EventStatus::Completed | EventStatus::Cancelled)
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(EventStatus::Scheduled),
            "active" => Ok(EventStatus::Active),
            "completed" => Ok(EventStatus::Completed),
            "cancelled" => Ok(EventStatus::Cancelled),
            other => Err(format!("unknown event status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub name: String,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub place_id: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub venue_photo_url: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub deck_size: i32,
    pub max_matches_allowed: i32,
    pub event_type: String,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Live counters kept per event, seeded at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventStats {
    pub event_id: Uuid,
    pub active_males: i32,
    pub active_females: i32,
    pub total_matches_completed: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub place_id: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub venue_photo_url: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub deck_size: i32,
    pub max_matches_allowed: i32,
    pub event_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub place_id: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub venue_photo_url: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub deck_size: Option<i32>,
    pub max_matches_allowed: Option<i32>,
    pub event_type: Option<String>,
}

/// A scheduled event as shown on the upcoming list.
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingEvent {
    pub event: Event,
    pub starts_in: String,
}

/// An active event with its live counters.
#[derive(Debug, Clone, Serialize)]
pub struct LiveEvent {
    pub event: Event,
    pub time_remaining: String,
    pub active_users: i32,
    pub matches_completed: i32,
}

/// A completed or cancelled event with participation figures.
#[derive(Debug, Clone, Serialize)]
pub struct PastEvent {
    pub event: Event,
    pub total_participants: i64,
    pub successful_matches: i64,
    pub match_rate: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            EventStatus::Scheduled,
            EventStatus::Active,
            EventStatus::Completed,
            EventStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<EventStatus>(), Ok(status));
        }
    }

    #[test]
    fn terminal_statuses() {
        assert!(!EventStatus::Scheduled.is_terminal());
        assert!(!EventStatus::Active.is_terminal());
        assert!(EventStatus::Completed.is_terminal());
        assert!(EventStatus::Cancelled.is_terminal());
    }
}
