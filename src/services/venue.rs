//! Venue service implementation
//!
//! Saved-venue management with subscription-tier limits.

use tracing::info;
use uuid::Uuid;

use crate::config::QuotaConfig;
use crate::database::repositories::{OrganizerRepository, VenueRepository};
use crate::models::organizer::{Organizer, SubscriptionTier};
use crate::models::venue::{CreateVenueRequest, Venue};
use crate::utils::errors::{DeckMatchError, Result};

#[derive(Clone)]
pub struct VenueService {
    venues: VenueRepository,
    organizers: OrganizerRepository,
    quotas: QuotaConfig,
}

impl VenueService {
    pub fn new(venues: VenueRepository, organizers: OrganizerRepository, quotas: QuotaConfig) -> Self {
        Self { venues, organizers, quotas }
    }

    /// An organizer's saved venues, newest first.
    pub async fn saved_venues(&self, organizer_id: Uuid) -> Result<Vec<Venue>> {
        self.venues.list_by_organizer(organizer_id).await
    }

    /// Save a venue for reuse, subject to the tier's venue allowance.
    pub async fn save_venue(&self, organizer_id: Uuid, request: CreateVenueRequest) -> Result<Venue> {
        let organizer = self
            .organizers
            .find_by_id(organizer_id)
            .await?
            .ok_or(DeckMatchError::OrganizerNotFound { organizer_id })?;

        let saved = self.venues.count_by_organizer(organizer_id).await?;
        check_venue_quota(&organizer, saved, &self.quotas)?;

        let venue = self.venues.create(organizer_id, request).await?;
        info!(venue_id = %venue.id, organizer_id = %organizer_id, "Venue saved");
        Ok(venue)
    }

    /// Remove a saved venue.
    pub async fn remove_venue(&self, organizer_id: Uuid, venue_id: Uuid) -> Result<()> {
        self.venues.delete(venue_id, organizer_id).await?;
        info!(venue_id = %venue_id, organizer_id = %organizer_id, "Venue removed");
        Ok(())
    }
}

/// Whether this organizer may save another venue.
pub fn check_venue_quota(organizer: &Organizer, saved: i64, quotas: &QuotaConfig) -> Result<()> {
    match organizer.subscription_tier {
        SubscriptionTier::Free => Err(DeckMatchError::TierLimit(
            "Free accounts cannot save venues".to_string(),
        )),
        SubscriptionTier::Basic => {
            if saved >= i64::from(quotas.basic_max_venues) {
                Err(DeckMatchError::TierLimit(format!(
                    "Basic tier limit reached: {} saved venue(s)",
                    quotas.basic_max_venues
                )))
            } else {
                Ok(())
            }
        }
        SubscriptionTier::Trial | SubscriptionTier::Premium => Ok(()),
    }
}
