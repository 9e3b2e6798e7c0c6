//! Saved venue model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub venue_name: String,
    pub venue_address: Option<String>,
    pub place_id: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub venue_photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVenueRequest {
    pub venue_name: String,
    pub venue_address: Option<String>,
    pub place_id: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub venue_photo_url: Option<String>,
}
