//! Aggregate summary models
//!
//! Derived, ephemeral structures: recomputed on each view, never persisted.

use serde::Serialize;
use uuid::Uuid;

/// One (label, count) entry of a top-N distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: u32,
}

impl LabelCount {
    pub fn new(label: impl Into<String>, count: u32) -> Self {
        Self { label: label.into(), count }
    }
}

/// Gender distribution over exactly three buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderSplit {
    pub male: u32,
    pub female: u32,
    pub other: u32,
}

impl GenderSplit {
    pub fn total(&self) -> u32 {
        self.male + self.female + self.other
    }
}

/// Preference distributions over a deduplicated user set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PreferenceBreakdown {
    pub gender_split: GenderSplit,
    pub age_groups: Vec<LabelCount>,
    pub top_drinks: Vec<LabelCount>,
    pub top_music: Vec<LabelCount>,
    pub top_languages: Vec<LabelCount>,
}

/// Cross-event summary for an organizer's completed events.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_users: usize,
    /// Event-weighted mean of per-event match rates, integer percent.
    pub avg_match_rate: u32,
    /// Events that contributed to the average (at least one unique user).
    pub event_count: usize,
    pub preferences: PreferenceBreakdown,
}

/// Single-event drill-down summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventSummary {
    pub unique_users: usize,
    pub matched_users: usize,
    /// matched / unique-users as integer percent, 0 when no users.
    pub match_rate: u32,
    pub preferences: PreferenceBreakdown,
}

/// Row of the completed-events overview list.
#[derive(Debug, Clone, Serialize)]
pub struct EventOverview {
    pub event_id: Uuid,
    pub name: String,
    pub venue_name: Option<String>,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub participant_count: usize,
    pub matched_count: usize,
    pub match_rate: u32,
}
