//! Organizer repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::organizer::Organizer;
use crate::utils::errors::DeckMatchError;

const ORGANIZER_COLUMNS: &str = "id, subscription_tier, events_used_this_period, max_venues, current_period_end, contact_name, phone, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct OrganizerRepository {
    pool: PgPool,
}

impl OrganizerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find organizer by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Organizer>, DeckMatchError> {
        let organizer = sqlx::query_as::<_, Organizer>(&format!(
            "SELECT {ORGANIZER_COLUMNS} FROM organizers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(organizer)
    }

    /// Create a fresh free-tier profile for an account
    pub async fn create(&self, id: Uuid) -> Result<Organizer, DeckMatchError> {
        let organizer = sqlx::query_as::<_, Organizer>(&format!(
            r#"
            INSERT INTO organizers (id, subscription_tier, events_used_this_period, max_venues, created_at, updated_at)
            VALUES ($1, 'free', 0, 0, $2, $2)
            RETURNING {ORGANIZER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(organizer)
    }

    /// Update contact details
    pub async fn update_contact(&self, id: Uuid, contact_name: Option<String>, phone: Option<String>) -> Result<Organizer, DeckMatchError> {
        let organizer = sqlx::query_as::<_, Organizer>(&format!(
            r#"
            UPDATE organizers
            SET contact_name = COALESCE($2, contact_name),
                phone = COALESCE($3, phone),
                updated_at = $4
            WHERE id = $1
            RETURNING {ORGANIZER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(contact_name)
        .bind(phone)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DeckMatchError::OrganizerNotFound { organizer_id: id })?;

        Ok(organizer)
    }

    /// Bump the events-used counter after a successful creation
    pub async fn increment_events_used(&self, id: Uuid) -> Result<(), DeckMatchError> {
        sqlx::query(
            "UPDATE organizers SET events_used_this_period = events_used_this_period + 1, updated_at = $2 WHERE id = $1"
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
