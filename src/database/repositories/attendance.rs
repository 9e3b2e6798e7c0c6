//! Attendance repository implementation
//!
//! Reads the flattened `event_user_analytics` view and maps its raw rows
//! into `AttendanceRecord`s. The language preference column is classified
//! into its tagged variant here, once, at the ingestion boundary.

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::attendance::{AttendanceRecord, LanguagePreference};
use crate::utils::errors::DeckMatchError;

const VIEW_COLUMNS: &str = "event_id, user_id, matched, gender, preferred_drink, music_preference, age_group, language_preference";

/// Raw row shape of the `event_user_analytics` view.
#[derive(Debug, FromRow)]
struct AttendanceRow {
    event_id: Uuid,
    user_id: Uuid,
    matched: bool,
    gender: Option<String>,
    preferred_drink: Option<String>,
    music_preference: Option<String>,
    age_group: Option<String>,
    language_preference: Option<String>,
}

impl From<AttendanceRow> for AttendanceRecord {
    fn from(row: AttendanceRow) -> Self {
        AttendanceRecord {
            event_id: row.event_id,
            user_id: row.user_id,
            matched: row.matched,
            gender: row.gender,
            preferred_drink: row.preferred_drink,
            music_preference: row.music_preference,
            age_group: row.age_group,
            language_preference: row
                .language_preference
                .as_deref()
                .and_then(LanguagePreference::from_raw),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All attendance records across an organizer's completed events
    pub async fn for_completed_events(&self, organizer_id: Uuid) -> Result<Vec<AttendanceRecord>, DeckMatchError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(&format!(
            "SELECT {VIEW_COLUMNS} FROM event_user_analytics WHERE organizer_id = $1 AND event_status = 'completed'"
        ))
        .bind(organizer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AttendanceRecord::from).collect())
    }

    /// Attendance records for a single event
    pub async fn for_event(&self, event_id: Uuid) -> Result<Vec<AttendanceRecord>, DeckMatchError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(&format!(
            "SELECT {VIEW_COLUMNS} FROM event_user_analytics WHERE event_id = $1"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AttendanceRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_conversion_classifies_language() {
        let row = AttendanceRow {
            event_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            matched: true,
            gender: Some("F".to_string()),
            preferred_drink: None,
            music_preference: None,
            age_group: None,
            language_preference: Some(r#"["en","fr"]"#.to_string()),
        };

        let record = AttendanceRecord::from(row);
        assert_eq!(
            record.language_preference,
            Some(LanguagePreference::Encoded(r#"["en","fr"]"#.to_string()))
        );
    }

    #[test]
    fn row_conversion_drops_blank_language() {
        let row = AttendanceRow {
            event_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            matched: false,
            gender: None,
            preferred_drink: None,
            music_preference: None,
            age_group: None,
            language_preference: Some("  ".to_string()),
        };

        assert_eq!(AttendanceRecord::from(row).language_preference, None);
    }
}
