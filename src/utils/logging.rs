//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the DeckMatch application.

use tracing::{info, warn, debug};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use crate::config::LoggingConfig;
use crate::models::EventStatus;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// Returns the appender guard; dropping it stops the background writer.
pub fn init_logging(config: &LoggingConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "deckmatch.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a lifecycle status transition
pub fn log_status_transition(event_id: Uuid, from: EventStatus, to: EventStatus, source: &str) {
    info!(
        event_id = %event_id,
        from = %from,
        to = %to,
        source = source,
        "Event status transition applied"
    );
}

/// Log a skipped or failed single-event update during reconciliation
pub fn log_reconcile_failure(event_id: Uuid, error: &str) {
    warn!(
        event_id = %event_id,
        error = error,
        "Status update failed, next reconciliation pass will retry"
    );
}

/// Log timer arming decisions
pub fn log_timer_armed(organizer_id: Uuid, event_id: Uuid, phase: &str, delay_ms: u128) {
    debug!(
        organizer_id = %organizer_id,
        event_id = %event_id,
        phase = phase,
        delay_ms = delay_ms,
        "Transition timer armed"
    );
}

/// Log quota gate outcomes
pub fn log_quota_check(organizer_id: Uuid, tier: &str, allowed: bool, reason: Option<&str>) {
    if allowed {
        debug!(organizer_id = %organizer_id, tier = tier, "Quota check passed");
    } else {
        warn!(
            organizer_id = %organizer_id,
            tier = tier,
            reason = reason,
            "Quota check rejected"
        );
    }
}

/// Log an analytics aggregation pass
pub fn log_aggregation(organizer_id: Uuid, records: usize, unique_users: usize, events: usize) {
    debug!(
        organizer_id = %organizer_id,
        records = records,
        unique_users = unique_users,
        events = events,
        "Attendance records aggregated"
    );
}
