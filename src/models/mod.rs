//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod organizer;
pub mod event;
pub mod venue;
pub mod attendance;
pub mod analytics;

// Re-export commonly used models
pub use organizer::{Organizer, SubscriptionTier, TierStatus};
pub use event::{Event, EventStatus, EventStats, CreateEventRequest, UpdateEventRequest, UpcomingEvent, LiveEvent, PastEvent};
pub use venue::{Venue, CreateVenueRequest};
pub use attendance::{AttendanceRecord, LanguagePreference};
pub use analytics::{Summary, EventSummary, PreferenceBreakdown, GenderSplit, LabelCount, EventOverview};
