//! Saved venue repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::venue::{CreateVenueRequest, Venue};
use crate::utils::errors::DeckMatchError;

const VENUE_COLUMNS: &str = "id, organizer_id, venue_name, venue_address, place_id, lat, lng, venue_photo_url, created_at";

#[derive(Debug, Clone)]
pub struct VenueRepository {
    pool: PgPool,
}

impl VenueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List an organizer's saved venues, newest first
    pub async fn list_by_organizer(&self, organizer_id: Uuid) -> Result<Vec<Venue>, DeckMatchError> {
        let venues = sqlx::query_as::<_, Venue>(&format!(
            "SELECT {VENUE_COLUMNS} FROM organizer_venues WHERE organizer_id = $1 ORDER BY created_at DESC"
        ))
        .bind(organizer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(venues)
    }

    /// Save a new venue
    pub async fn create(&self, organizer_id: Uuid, request: CreateVenueRequest) -> Result<Venue, DeckMatchError> {
        let venue = sqlx::query_as::<_, Venue>(&format!(
            r#"
            INSERT INTO organizer_venues (id, organizer_id, venue_name, venue_address, place_id, lat, lng, venue_photo_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {VENUE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(organizer_id)
        .bind(request.venue_name)
        .bind(request.venue_address)
        .bind(request.place_id)
        .bind(request.lat)
        .bind(request.lng)
        .bind(request.venue_photo_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(venue)
    }

    /// Remove a saved venue, scoped to its organizer
    pub async fn delete(&self, venue_id: Uuid, organizer_id: Uuid) -> Result<(), DeckMatchError> {
        let result = sqlx::query("DELETE FROM organizer_venues WHERE id = $1 AND organizer_id = $2")
            .bind(venue_id)
            .bind(organizer_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DeckMatchError::VenueNotFound { venue_id });
        }

        Ok(())
    }

    /// Count an organizer's saved venues
    pub async fn count_by_organizer(&self, organizer_id: Uuid) -> Result<i64, DeckMatchError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM organizer_venues WHERE organizer_id = $1"
        )
        .bind(organizer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
