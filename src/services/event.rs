//! Event service implementation
//!
//! Quota-gated event creation, updates, cascading cancellation, and the
//! three dashboard listings (upcoming, live, history).

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::QuotaConfig;
use crate::database::repositories::{EventRepository, OrganizerRepository};
use crate::lifecycle::{Clock, LifecycleEngine};
use crate::models::event::{CreateEventRequest, Event, EventStatus, LiveEvent, PastEvent, UpcomingEvent, UpdateEventRequest};
use crate::models::organizer::{Organizer, SubscriptionTier};
use crate::utils::errors::{DeckMatchError, Result};
use crate::utils::helpers::{format_time_remaining, format_time_until};
use crate::utils::logging;

#[derive(Clone)]
pub struct EventService {
    events: EventRepository,
    organizers: OrganizerRepository,
    engine: Arc<LifecycleEngine>,
    clock: Arc<dyn Clock>,
    quotas: QuotaConfig,
}

impl EventService {
    pub fn new(
        events: EventRepository,
        organizers: OrganizerRepository,
        engine: Arc<LifecycleEngine>,
        clock: Arc<dyn Clock>,
        quotas: QuotaConfig,
    ) -> Self {
        Self { events, organizers, engine, clock, quotas }
    }

    /// Create a new event for the organizer.
    ///
    /// The tier quota is checked first; on success the deck and stats
    /// rows are seeded, the usage counter bumped, and transition timers
    /// re-armed. A stats-seed failure is logged but does not fail the
    /// creation.
    pub async fn create_event(&self, organizer_id: Uuid, request: CreateEventRequest) -> Result<Event> {
        if request.end_time <= request.start_time {
            return Err(DeckMatchError::InvalidInput(
                "Event end time must be after its start time".to_string(),
            ));
        }

        let organizer = self
            .organizers
            .find_by_id(organizer_id)
            .await?
            .ok_or(DeckMatchError::OrganizerNotFound { organizer_id })?;

        let now = self.clock.now();
        if let Err(e) = check_event_quota(&organizer, now, &self.quotas) {
            logging::log_quota_check(organizer_id, organizer.subscription_tier.as_str(), false, Some(&e.to_string()));
            return Err(e);
        }
        logging::log_quota_check(organizer_id, organizer.subscription_tier.as_str(), true, None);

        let event = self.events.create(organizer_id, request).await?;

        self.events.seed_deck(event.id).await?;
        if let Err(e) = self.events.seed_stats(event.id).await {
            warn!(event_id = %event.id, error = %e, "Failed to seed event stats");
        }
        self.organizers.increment_events_used(organizer_id).await?;

        // Pick up the new event's start/end timers right away.
        self.engine.schedule_transitions(organizer_id).await?;

        info!(event_id = %event.id, organizer_id = %organizer_id, "Event created");
        Ok(event)
    }

    /// Update an event's details, scoped to its organizer.
    pub async fn update_event(&self, organizer_id: Uuid, event_id: Uuid, request: UpdateEventRequest) -> Result<Event> {
        if let (Some(start), Some(end)) = (request.start_time, request.end_time) {
            if end <= start {
                return Err(DeckMatchError::InvalidInput(
                    "Event end time must be after its start time".to_string(),
                ));
            }
        }

        let event = self.events.update(event_id, organizer_id, request).await?;

        // Times may have moved; rebuild the timers.
        self.engine.schedule_transitions(organizer_id).await?;

        info!(event_id = %event_id, organizer_id = %organizer_id, "Event updated");
        Ok(event)
    }

    /// Cancel an event, permanently deleting it and all dependent data.
    pub async fn cancel_event(&self, organizer_id: Uuid, event_id: Uuid) -> Result<()> {
        self.events.delete_cascade(event_id, organizer_id).await?;
        self.engine.schedule_transitions(organizer_id).await?;

        info!(event_id = %event_id, organizer_id = %organizer_id, "Event cancelled and deleted");
        Ok(())
    }

    /// Scheduled events, earliest first, with countdown text.
    pub async fn upcoming_events(&self, organizer_id: Uuid) -> Result<Vec<UpcomingEvent>> {
        let events = self.events.list_by_status(organizer_id, EventStatus::Scheduled).await?;
        let now = self.clock.now();

        Ok(events
            .into_iter()
            .map(|event| {
                let starts_in = format_time_until(event.start_time, now);
                UpcomingEvent { event, starts_in }
            })
            .collect())
    }

    /// Active events with their live counters.
    pub async fn live_events(&self, organizer_id: Uuid) -> Result<Vec<LiveEvent>> {
        let events = self.events.list_by_status(organizer_id, EventStatus::Active).await?;
        let now = self.clock.now();

        let mut live = Vec::with_capacity(events.len());
        for event in events {
            let stats = self.events.stats_for(event.id).await?;
            let (active_users, matches_completed) = stats
                .map(|s| (s.active_males + s.active_females, s.total_matches_completed))
                .unwrap_or((0, 0));
            let time_remaining = format_time_remaining(event.end_time, now);
            live.push(LiveEvent { event, time_remaining, active_users, matches_completed });
        }

        Ok(live)
    }

    /// Completed and cancelled events with participation figures.
    ///
    /// The match rate counts both halves of a pair: one completed match
    /// accounts for two matched participants.
    pub async fn event_history(&self, organizer_id: Uuid) -> Result<Vec<PastEvent>> {
        let events = self.events.list_history(organizer_id).await?;

        let mut history = Vec::with_capacity(events.len());
        for event in events {
            let total_participants = self.events.participant_count(event.id).await?;
            let successful_matches = self.events.completed_match_count(event.id).await?;
            let match_rate = if total_participants > 0 {
                ((successful_matches * 2) as f64 / total_participants as f64 * 100.0).round() as u32
            } else {
                0
            };
            history.push(PastEvent { event, total_participants, successful_matches, match_rate });
        }

        Ok(history)
    }
}

/// Whether this organizer may create another event right now.
pub fn check_event_quota(organizer: &Organizer, now: DateTime<Utc>, quotas: &QuotaConfig) -> Result<()> {
    if organizer.subscription_tier.is_paid() {
        if let Some(period_end) = organizer.current_period_end {
            if period_end <= now {
                return Err(DeckMatchError::SubscriptionExpired);
            }
        }
    }

    match organizer.subscription_tier {
        SubscriptionTier::Free => Err(DeckMatchError::TierLimit(
            "Free accounts cannot create events".to_string(),
        )),
        SubscriptionTier::Trial => {
            if organizer.events_used_this_period >= quotas.trial_events {
                Err(DeckMatchError::TierLimit(
                    "Trial limit reached: the trial event has already been used".to_string(),
                ))
            } else {
                Ok(())
            }
        }
        SubscriptionTier::Basic => {
            if organizer.events_used_this_period >= quotas.basic_events_per_period {
                Err(DeckMatchError::TierLimit(format!(
                    "Basic tier limit reached: {} events this period",
                    quotas.basic_events_per_period
                )))
            } else {
                Ok(())
            }
        }
        SubscriptionTier::Premium => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
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
    fn free_tier_cannot_create_events() {
        let now = Utc::now();
        let result = check_event_quota(&organizer(SubscriptionTier::Free, 0, None), now, &quotas());
        assert_matches!(result, Err(DeckMatchError::TierLimit(_)));
    }

    #[test]
    fn trial_tier_allows_exactly_one_event() {
        let now = Utc::now();
        assert!(check_event_quota(&organizer(SubscriptionTier::Trial, 0, None), now, &quotas()).is_ok());
        assert_matches!(
            check_event_quota(&organizer(SubscriptionTier::Trial, 1, None), now, &quotas()),
            Err(DeckMatchError::TierLimit(_))
        );
    }

    #[test]
    fn basic_tier_stops_at_period_allowance() {
        let now = Utc::now();
        let end = Some(now + Duration::days(10));
        assert!(check_event_quota(&organizer(SubscriptionTier::Basic, 3, end), now, &quotas()).is_ok());
        assert_matches!(
            check_event_quota(&organizer(SubscriptionTier::Basic, 4, end), now, &quotas()),
            Err(DeckMatchError::TierLimit(_))
        );
    }

    #[test]
    fn expired_paid_subscription_blocks_creation() {
        let now = Utc::now();
        let end = Some(now - Duration::seconds(1));
        assert_matches!(
            check_event_quota(&organizer(SubscriptionTier::Premium, 0, end), now, &quotas()),
            Err(DeckMatchError::SubscriptionExpired)
        );
        assert_matches!(
            check_event_quota(&organizer(SubscriptionTier::Basic, 0, end), now, &quotas()),
            Err(DeckMatchError::SubscriptionExpired)
        );
    }

    #[test]
    fn premium_tier_is_unlimited() {
        let now = Utc::now();
        let end = Some(now + Duration::days(10));
        assert!(check_event_quota(&organizer(SubscriptionTier::Premium, 999, end), now, &quotas()).is_ok());
    }
}
