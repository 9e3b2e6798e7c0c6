//! Event repository implementation

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::lifecycle::{EventStore, LifecycleEvent};
use crate::models::event::{CreateEventRequest, Event, EventStats, EventStatus, UpdateEventRequest};
use crate::utils::errors::DeckMatchError;

const EVENT_COLUMNS: &str = "id, organizer_id, name, venue_name, venue_address, place_id, lat, lng, venue_photo_url, start_time, end_time, deck_size, max_matches_allowed, event_type, status, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event with status `scheduled`
    pub async fn create(&self, organizer_id: Uuid, request: CreateEventRequest) -> Result<Event, DeckMatchError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (id, organizer_id, name, venue_name, venue_address, place_id, lat, lng, venue_photo_url, start_time, end_time, deck_size, max_matches_allowed, event_type, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, 'scheduled', $15, $15)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(organizer_id)
        .bind(request.name)
        .bind(request.venue_name)
        .bind(request.venue_address)
        .bind(request.place_id)
        .bind(request.lat)
        .bind(request.lng)
        .bind(request.venue_photo_url)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.deck_size)
        .bind(request.max_matches_allowed)
        .bind(request.event_type)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Seed the card deck counters for a new event
    pub async fn seed_deck(&self, event_id: Uuid) -> Result<(), DeckMatchError> {
        sqlx::query(
            "INSERT INTO event_decks (event_id, male_cards_drawn, female_cards_drawn, universal_cards_drawn) VALUES ($1, 0, 0, 0)"
        )
        .bind(event_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Seed the live stats counters for a new event
    pub async fn seed_stats(&self, event_id: Uuid) -> Result<(), DeckMatchError> {
        sqlx::query(
            "INSERT INTO event_stats (event_id, active_males, active_females, total_matches_completed) VALUES ($1, 0, 0, 0)"
        )
        .bind(event_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, DeckMatchError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Update an event, scoped to its organizer
    pub async fn update(&self, id: Uuid, organizer_id: Uuid, request: UpdateEventRequest) -> Result<Event, DeckMatchError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET name = COALESCE($3, name),
                venue_name = COALESCE($4, venue_name),
                venue_address = COALESCE($5, venue_address),
                place_id = COALESCE($6, place_id),
                lat = COALESCE($7, lat),
                lng = COALESCE($8, lng),
                venue_photo_url = COALESCE($9, venue_photo_url),
                start_time = COALESCE($10, start_time),
                end_time = COALESCE($11, end_time),
                deck_size = COALESCE($12, deck_size),
                max_matches_allowed = COALESCE($13, max_matches_allowed),
                event_type = COALESCE($14, event_type),
                updated_at = $15
            WHERE id = $1 AND organizer_id = $2
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(organizer_id)
        .bind(request.name)
        .bind(request.venue_name)
        .bind(request.venue_address)
        .bind(request.place_id)
        .bind(request.lat)
        .bind(request.lng)
        .bind(request.venue_photo_url)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.deck_size)
        .bind(request.max_matches_allowed)
        .bind(request.event_type)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DeckMatchError::EventNotFound { event_id: id })?;

        Ok(event)
    }

    /// List an organizer's events in one status, earliest start first
    pub async fn list_by_status(&self, organizer_id: Uuid, status: EventStatus) -> Result<Vec<Event>, DeckMatchError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE organizer_id = $1 AND status = $2 ORDER BY start_time ASC"
        ))
        .bind(organizer_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// List an organizer's completed events, latest start first
    pub async fn list_completed(&self, organizer_id: Uuid) -> Result<Vec<Event>, DeckMatchError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE organizer_id = $1 AND status = 'completed' ORDER BY start_time DESC"
        ))
        .bind(organizer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// List an organizer's completed and cancelled events, latest start first
    pub async fn list_history(&self, organizer_id: Uuid) -> Result<Vec<Event>, DeckMatchError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE organizer_id = $1 AND status IN ('completed', 'cancelled') ORDER BY start_time DESC"
        ))
        .bind(organizer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Live stats counters for an event
    pub async fn stats_for(&self, event_id: Uuid) -> Result<Option<EventStats>, DeckMatchError> {
        let stats = sqlx::query_as::<_, EventStats>(
            "SELECT event_id, active_males, active_females, total_matches_completed FROM event_stats WHERE event_id = $1"
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Distinct users that drew cards at an event
    pub async fn participant_count(&self, event_id: Uuid) -> Result<i64, DeckMatchError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(DISTINCT user_id) FROM user_cards WHERE event_id = $1"
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Matches at an event that ran to completion
    pub async fn completed_match_count(&self, event_id: Uuid) -> Result<i64, DeckMatchError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM matches WHERE event_id = $1 AND match_completed_at IS NOT NULL"
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Organizers that still have events in a non-terminal status
    pub async fn organizers_with_open_events(&self) -> Result<Vec<Uuid>, DeckMatchError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT DISTINCT organizer_id FROM events WHERE status IN ('scheduled', 'active')"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Delete an event and everything hanging off it.
    ///
    /// Dependent rows go first, in foreign-key order. A failed dependent
    /// delete is logged and the cascade continues; only the final event
    /// delete is load-bearing.
    pub async fn delete_cascade(&self, event_id: Uuid, organizer_id: Uuid) -> Result<(), DeckMatchError> {
        for table in ["vouchers", "matches", "user_cards", "event_stats", "event_decks"] {
            let result = sqlx::query(&format!("DELETE FROM {table} WHERE event_id = $1"))
                .bind(event_id)
                .execute(&self.pool)
                .await;
            if let Err(e) = result {
                warn!(event_id = %event_id, table = table, error = %e, "Dependent delete failed during event cancellation");
            }
        }

        let result = sqlx::query("DELETE FROM events WHERE id = $1 AND organizer_id = $2")
            .bind(event_id)
            .bind(organizer_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DeckMatchError::EventNotFound { event_id });
        }

        Ok(())
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn lifecycle_events(&self, organizer_id: Uuid) -> Result<Vec<LifecycleEvent>, DeckMatchError> {
        let events = sqlx::query_as::<_, LifecycleEvent>(
            "SELECT id, start_time, end_time, status FROM events WHERE organizer_id = $1 AND status <> 'cancelled'"
        )
        .bind(organizer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn set_status(&self, event_id: Uuid, status: EventStatus) -> Result<(), DeckMatchError> {
        sqlx::query("UPDATE events SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(event_id)
            .bind(status)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
