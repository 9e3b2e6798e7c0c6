//! Status derivation and reconciliation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use crate::models::EventStatus;
use crate::utils::errors::Result;
use crate::utils::logging;
use super::clock::Clock;
use super::scheduler::{TransitionPhase, TransitionScheduler};

/// The slice of an event the engine needs to drive transitions.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LifecycleEvent {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: EventStatus,
}

/// Persistence seam for the engine. The event repository implements this;
/// tests substitute an in-memory store.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// All non-cancelled events owned by the organizer.
    async fn lifecycle_events(&self, organizer_id: Uuid) -> Result<Vec<LifecycleEvent>>;

    /// Persist a single event's status. Idempotent.
    async fn set_status(&self, event_id: Uuid, status: EventStatus) -> Result<()>;
}

/// Emitted after every applied transition so list views can refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub event_id: Uuid,
    pub status: EventStatus,
}

/// Derive the status an event should have at `now`.
///
/// `cancelled` is sticky and wins unconditionally. Boundary instants
/// belong to the later state: `active` at exactly `start`, `completed`
/// at exactly `end`.
pub fn derive_status(
    now: DateTime<Utc>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    stored: EventStatus,
) -> EventStatus {
    if stored == EventStatus::Cancelled {
        return EventStatus::Cancelled;
    }
    if now < start {
        EventStatus::Scheduled
    } else if now < end {
        EventStatus::Active
    } else {
        EventStatus::Completed
    }
}

pub struct LifecycleEngine {
    store: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
    scheduler: TransitionScheduler,
    changes: broadcast::Sender<StatusChange>,
}

impl LifecycleEngine {
    pub fn new(store: Arc<dyn EventStore>, clock: Arc<dyn Clock>, max_timer_delay: Duration) -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            store,
            clock,
            scheduler: TransitionScheduler::new(max_timer_delay),
            changes,
        }
    }

    /// Subscribe to applied status changes.
    pub fn subscribe(&self) -> broadcast::Receiver<StatusChange> {
        self.changes.subscribe()
    }

    /// Bring stored statuses in line with the clock.
    ///
    /// Persists only events whose derived status differs, one independent
    /// write per event. A failed write is logged and skipped; the next
    /// pass retries it. Returns the number of events updated.
    pub async fn reconcile(&self, organizer_id: Uuid) -> Result<usize> {
        let events = self.store.lifecycle_events(organizer_id).await?;
        let now = self.clock.now();

        let mut updated = 0;
        for event in events {
            let derived = derive_status(now, event.start_time, event.end_time, event.status);
            if derived == event.status {
                continue;
            }
            match self.store.set_status(event.id, derived).await {
                Ok(()) => {
                    logging::log_status_transition(event.id, event.status, derived, "reconcile");
                    let _ = self.changes.send(StatusChange { event_id: event.id, status: derived });
                    updated += 1;
                }
                Err(e) => logging::log_reconcile_failure(event.id, &e.to_string()),
            }
        }

        debug!(organizer_id = %organizer_id, updated = updated, "Reconciliation pass finished");
        Ok(updated)
    }

    /// Re-arm transition timers for the organizer's events.
    ///
    /// All previously armed timers for this organizer are disarmed first,
    /// then a timer is armed at every future start (forcing `active`) and
    /// end (forcing `completed`). Delays beyond the configured maximum are
    /// skipped; the fallback pass picks those transitions up. Returns the
    /// number of timers armed.
    pub async fn schedule_transitions(&self, organizer_id: Uuid) -> Result<usize> {
        self.scheduler.cancel_all(organizer_id);

        let events = self.store.lifecycle_events(organizer_id).await?;
        let now = self.clock.now();

        let mut armed = 0;
        for event in &events {
            if event.start_time > now
                && self.arm(organizer_id, event.id, TransitionPhase::Start, event.start_time - now, EventStatus::Active)
            {
                armed += 1;
            }
            if event.end_time > now
                && self.arm(organizer_id, event.id, TransitionPhase::End, event.end_time - now, EventStatus::Completed)
            {
                armed += 1;
            }
        }

        debug!(organizer_id = %organizer_id, armed = armed, "Transition timers scheduled");
        Ok(armed)
    }

    /// Full fallback pass: reconcile, then rebuild the timers.
    pub async fn fallback_pass(&self, organizer_id: Uuid) -> Result<(usize, usize)> {
        let updated = self.reconcile(organizer_id).await?;
        let armed = self.schedule_transitions(organizer_id).await?;
        Ok((updated, armed))
    }

    /// Timers currently armed for an organizer.
    pub fn armed_timers(&self, organizer_id: Uuid) -> usize {
        self.scheduler.armed(organizer_id)
    }

    fn arm(
        &self,
        organizer_id: Uuid,
        event_id: Uuid,
        phase: TransitionPhase,
        delay: chrono::Duration,
        target: EventStatus,
    ) -> bool {
        let delay = delay.to_std().unwrap_or_default();
        let store = Arc::clone(&self.store);
        let changes = self.changes.clone();

        // A firing timer writes one event's status and signals a refresh;
        // it does not re-run the full reconciliation pass.
        let armed = self.scheduler.schedule(organizer_id, event_id, phase, delay, async move {
            match store.set_status(event_id, target).await {
                Ok(()) => {
                    debug!(event_id = %event_id, status = %target, "Transition timer fired");
                    let _ = changes.send(StatusChange { event_id, status: target });
                }
                Err(e) => logging::log_reconcile_failure(event_id, &e.to_string()),
            }
        });

        if armed {
            logging::log_timer_armed(organizer_id, event_id, phase.as_str(), delay.as_millis());
        }
        armed
    }
}
