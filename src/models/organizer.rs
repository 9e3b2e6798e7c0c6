//! Organizer model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Subscription level gating event and venue quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Free,
    Trial,
    Basic,
    Premium,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Trial => "trial",
            SubscriptionTier::Basic => "basic",
            SubscriptionTier::Premium => "premium",
        }
    }

    /// Paid tiers carry a billing period that can expire.
    pub fn is_paid(&self) -> bool {
        matches!(self, SubscriptionTier::Basic | SubscriptionTier::Premium)
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Organizer {
    pub id: Uuid,
    pub subscription_tier: SubscriptionTier,
    pub events_used_this_period: i32,
    pub max_venues: i32,
    pub current_period_end: Option<DateTime<Utc>>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organizer {
    /// Profile is complete once contact details are filled in.
    pub fn profile_complete(&self) -> bool {
        self.contact_name.is_some() && self.phone.is_some()
    }
}

/// Dashboard-facing report of what the current tier still allows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TierStatus {
    /// Free accounts cannot create events at all.
    UpgradeRequired,
    /// Trial or monthly allowance still has room.
    EventsRemaining { remaining: i32 },
    /// Allowance for the period is used up.
    LimitReached,
    /// Premium: no event limit.
    Unlimited,
    /// Paid subscription ran out.
    Expired,
    /// Paid subscription ends within a week.
    ExpiringSoon { days_remaining: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paid_tiers() {
        assert!(!SubscriptionTier::Free.is_paid());
        assert!(!SubscriptionTier::Trial.is_paid());
        assert!(SubscriptionTier::Basic.is_paid());
        assert!(SubscriptionTier::Premium.is_paid());
    }

    #[test]
    fn profile_completeness_requires_both_fields() {
        let organizer = Organizer {
            id: Uuid::new_v4(),
            subscription_tier: SubscriptionTier::Free,
            events_used_this_period: 0,
            max_venues: 0,
            current_period_end: None,
            contact_name: Some("Dana".to_string()),
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(!organizer.profile_complete());
    }
}
