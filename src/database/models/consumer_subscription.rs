use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::SubscriptionStatus;

/// A consumer's paid entitlement to one organization's gated content.
///
/// Backed by `consumer_subscriptions`; `status` is stored as text exactly as
/// the billing provider reported it. Rows are never deleted, cancellation is
/// a status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerSubscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub organization_id: Uuid,
    pub stripe_subscription_id: String,
    pub status: SubscriptionStatus,
    pub current_period_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ConsumerSubscription {
    /// True when the period end is known and already behind `now`.
    pub fn period_ended(&self, now: DateTime<Utc>) -> bool {
        self.current_period_end.map_or(false, |end| end < now)
    }
}
