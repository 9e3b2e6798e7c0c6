//! Services module
//!
//! This module contains business logic services

pub mod analytics;
pub mod event;
pub mod organizer;
pub mod venue;

// Re-export commonly used services
pub use analytics::AnalyticsService;
pub use event::{EventService, check_event_quota};
pub use organizer::{OrganizerService, tier_status};
pub use venue::{VenueService, check_venue_quota};

use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::lifecycle::{Clock, EventStore, LifecycleEngine, SystemClock};

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub organizer_service: OrganizerService,
    pub event_service: EventService,
    pub venue_service: VenueService,
    pub analytics_service: AnalyticsService,
    pub lifecycle: Arc<LifecycleEngine>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(database: DatabaseService, settings: Settings) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let store: Arc<dyn EventStore> = Arc::new(database.events.clone());
        let lifecycle = Arc::new(LifecycleEngine::new(
            store,
            Arc::clone(&clock),
            Duration::from_millis(settings.scheduler.max_timer_delay_ms),
        ));

        let organizer_service = OrganizerService::new(
            database.organizers.clone(),
            Arc::clone(&clock),
            settings.quotas.clone(),
        );
        let event_service = EventService::new(
            database.events.clone(),
            database.organizers.clone(),
            Arc::clone(&lifecycle),
            Arc::clone(&clock),
            settings.quotas.clone(),
        );
        let venue_service = VenueService::new(
            database.venues.clone(),
            database.organizers.clone(),
            settings.quotas.clone(),
        );
        let analytics_service = AnalyticsService::new(
            database.attendance.clone(),
            database.events.clone(),
        );

        Self {
            organizer_service,
            event_service,
            venue_service,
            analytics_service,
            lifecycle,
        }
    }
}
