//! Organizer service implementation
//!
//! Profile management and subscription-tier reporting for the dashboard.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::QuotaConfig;
use crate::database::repositories::OrganizerRepository;
use crate::lifecycle::Clock;
use crate::models::organizer::{Organizer, SubscriptionTier, TierStatus};
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct OrganizerService {
    organizers: OrganizerRepository,
    clock: Arc<dyn Clock>,
    quotas: QuotaConfig,
}

impl OrganizerService {
    pub fn new(organizers: OrganizerRepository, clock: Arc<dyn Clock>, quotas: QuotaConfig) -> Self {
        Self { organizers, clock, quotas }
    }

    /// Fetch the organizer profile, creating a fresh free-tier one on
    /// first touch.
    pub async fn get_or_create(&self, organizer_id: Uuid) -> Result<Organizer> {
        if let Some(existing) = self.organizers.find_by_id(organizer_id).await? {
            debug!(organizer_id = %organizer_id, "Organizer profile found");
            return Ok(existing);
        }

        let organizer = self.organizers.create(organizer_id).await?;
        info!(organizer_id = %organizer_id, "New organizer profile created");
        Ok(organizer)
    }

    /// Update contact details
    pub async fn update_contact(&self, organizer_id: Uuid, contact_name: Option<String>, phone: Option<String>) -> Result<Organizer> {
        let organizer = self.organizers.update_contact(organizer_id, contact_name, phone).await?;
        info!(organizer_id = %organizer_id, "Organizer contact details updated");
        Ok(organizer)
    }

    /// Tier report for the dashboard header.
    pub fn tier_status(&self, organizer: &Organizer) -> Vec<TierStatus> {
        tier_status(organizer, self.clock.now(), &self.quotas)
    }
}

/// Subscription status messages, most pressing last.
pub fn tier_status(organizer: &Organizer, now: DateTime<Utc>, quotas: &QuotaConfig) -> Vec<TierStatus> {
    let mut statuses = Vec::new();

    match organizer.subscription_tier {
        SubscriptionTier::Free => statuses.push(TierStatus::UpgradeRequired),
        SubscriptionTier::Trial => {
            let remaining = quotas.trial_events - organizer.events_used_this_period;
            if remaining <= 0 {
                statuses.push(TierStatus::LimitReached);
            } else {
                statuses.push(TierStatus::EventsRemaining { remaining });
            }
        }
        SubscriptionTier::Basic => {
            let remaining = quotas.basic_events_per_period - organizer.events_used_this_period;
            if remaining <= 0 {
                statuses.push(TierStatus::LimitReached);
            } else {
                statuses.push(TierStatus::EventsRemaining { remaining });
            }
        }
        SubscriptionTier::Premium => statuses.push(TierStatus::Unlimited),
    }

    if organizer.subscription_tier.is_paid() {
        if let Some(period_end) = organizer.current_period_end {
            let days_remaining = period_end.signed_duration_since(now).num_days();
            if period_end <= now {
                statuses.push(TierStatus::Expired);
            } else if days_remaining <= 7 {
                statuses.push(TierStatus::ExpiringSoon { days_remaining });
            }
        }
    }

    statuses
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn organizer(tier: SubscriptionTier, used: i32, period_end: Option<DateTime<Utc>>) -> Organizer {
        Organizer {
            id: Uuid::new_v4(),
            subscription_tier: tier,
            events_used_this_period: used,
            max_venues: 0,
            current_period_end: period_end,
            contact_name: None,
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn quotas() -> QuotaConfig {
        QuotaConfig {
            trial_events: 1,
            basic_events_per_period: 4,
            basic_max_venues: 1,
        }
    }

    #[test]
    fn free_tier_requires_upgrade() {
        let now = Utc::now();
        let statuses = tier_status(&organizer(SubscriptionTier::Free, 0, None), now, &quotas());
        assert_eq!(statuses, vec![TierStatus::UpgradeRequired]);
    }

    #[test]
    fn trial_tier_is_one_shot() {
        let now = Utc::now();
        assert_eq!(
            tier_status(&organizer(SubscriptionTier::Trial, 0, None), now, &quotas()),
            vec![TierStatus::EventsRemaining { remaining: 1 }]
        );
        assert_eq!(
            tier_status(&organizer(SubscriptionTier::Trial, 1, None), now, &quotas()),
            vec![TierStatus::LimitReached]
        );
    }

    #[test]
    fn basic_tier_reports_monthly_allowance() {
        let now = Utc::now();
        let end = Some(now + Duration::days(20));
        assert_eq!(
            tier_status(&organizer(SubscriptionTier::Basic, 1, end), now, &quotas()),
            vec![TierStatus::EventsRemaining { remaining: 3 }]
        );
    }

    #[test]
    fn expired_paid_subscription_is_flagged() {
        let now = Utc::now();
        let end = Some(now - Duration::days(1));
        let statuses = tier_status(&organizer(SubscriptionTier::Premium, 0, end), now, &quotas());
        assert!(statuses.contains(&TierStatus::Expired));
    }

    #[test]
    fn expiring_soon_is_flagged_within_a_week() {
        let now = Utc::now();
        let end = Some(now + Duration::days(3));
        let statuses = tier_status(&organizer(SubscriptionTier::Basic, 0, end), now, &quotas());
        assert!(statuses.iter().any(|s| matches!(s, TierStatus::ExpiringSoon { .. })));
    }
}
