//! Analytics service implementation
//!
//! Read-only: fetches attendance-level rows for completed events, folds
//! them into summaries, and hands them to the rendering layer. Nothing
//! here mutates stored data.

use tracing::debug;
use uuid::Uuid;

use crate::analytics::{aggregate, event_summary};
use crate::database::repositories::{AttendanceRepository, EventRepository};
use crate::models::analytics::{EventOverview, EventSummary, Summary};
use crate::utils::errors::Result;
use crate::utils::logging;

#[derive(Clone)]
pub struct AnalyticsService {
    attendance: AttendanceRepository,
    events: EventRepository,
}

impl AnalyticsService {
    pub fn new(attendance: AttendanceRepository, events: EventRepository) -> Self {
        Self { attendance, events }
    }

    /// Cross-event insights over all of an organizer's completed events.
    pub async fn overall_insights(&self, organizer_id: Uuid) -> Result<Summary> {
        let records = self.attendance.for_completed_events(organizer_id).await?;
        let summary = aggregate(&records);
        logging::log_aggregation(organizer_id, records.len(), summary.total_users, summary.event_count);
        Ok(summary)
    }

    /// Drill-down summary for one event.
    pub async fn event_insights(&self, event_id: Uuid) -> Result<EventSummary> {
        let records = self.attendance.for_event(event_id).await?;
        debug!(event_id = %event_id, records = records.len(), "Event attendance fetched");
        Ok(event_summary(&records))
    }

    /// Completed events with their headline figures, latest first.
    pub async fn completed_events_overview(&self, organizer_id: Uuid) -> Result<Vec<EventOverview>> {
        let events = self.events.list_completed(organizer_id).await?;

        let mut overview = Vec::with_capacity(events.len());
        for event in events {
            let records = self.attendance.for_event(event.id).await?;
            let summary = event_summary(&records);
            overview.push(EventOverview {
                event_id: event.id,
                name: event.name,
                venue_name: event.venue_name,
                start_time: event.start_time,
                participant_count: summary.unique_users,
                matched_count: summary.matched_users,
                match_rate: summary.match_rate,
            });
        }

        Ok(overview)
    }
}
