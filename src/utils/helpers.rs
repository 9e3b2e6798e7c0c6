//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Duration, Utc};

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Countdown text for a scheduled event, e.g. "Starts in 2 days, 3h".
pub fn format_time_until(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let until = start.signed_duration_since(now);
    if until <= Duration::zero() {
        return "Starting now".to_string();
    }

    let days = until.num_days();
    let hours = (until - Duration::days(days)).num_hours();
    if days > 0 {
        let plural = if days > 1 { "s" } else { "" };
        format!("Starts in {days} day{plural}, {hours}h")
    } else if hours > 0 {
        format!("Starts in {hours}h")
    } else {
        format!("Starts in {}m", until.num_minutes())
    }
}

/// Remaining-time text for a live event, e.g. "1h 30m remaining".
pub fn format_time_remaining(end: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = end.signed_duration_since(now);
    if remaining <= Duration::zero() {
        return "Ended".to_string();
    }

    let hours = remaining.num_hours();
    let minutes = (remaining - Duration::hours(hours)).num_minutes();
    format!("{hours}h {minutes}m remaining")
}
