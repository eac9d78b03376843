use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::role::Role;
use super::subscription::SubscriptionFreshness;
use crate::database::manager::DatabaseError;
use crate::database::models::ConsumerSubscription;
use crate::database::traits::{MembershipStore, SubscriptionStore};

/// Outcome of the staff-or-subscriber gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatedAccess {
    /// `staff_manager` or above; subscriptions are not consulted.
    Staff,
    /// Member with an active consumer subscription.
    Subscriber,
    /// Member without an active subscription.
    SubscriptionRequired,
    /// No membership in the organization.
    NotMember,
}

impl GatedAccess {
    pub fn is_granted(&self) -> bool {
        matches!(self, GatedAccess::Staff | GatedAccess::Subscriber)
    }
}

/// Answers role and entitlement questions for a (user, organization) pair.
///
/// Every call reads current stored state; nothing is cached, so a demotion
/// or cancellation takes effect on the next request. A `false` answer is a
/// denial. Only store failures surface as `Err`.
#[derive(Clone)]
pub struct AccessEvaluator {
    memberships: Arc<dyn MembershipStore>,
    subscriptions: Arc<dyn SubscriptionStore>,
    freshness: SubscriptionFreshness,
}

impl AccessEvaluator {
    pub fn new(memberships: Arc<dyn MembershipStore>, subscriptions: Arc<dyn SubscriptionStore>) -> Self {
        Self {
            memberships,
            subscriptions,
            freshness: SubscriptionFreshness::default(),
        }
    }

    pub fn with_freshness(mut self, freshness: SubscriptionFreshness) -> Self {
        self.freshness = freshness;
        self
    }

    pub fn freshness(&self) -> SubscriptionFreshness {
        self.freshness
    }

    /// The member's role, or `None` when there is no membership.
    pub async fn role_of(&self, user_id: Uuid, organization_id: Uuid) -> Result<Option<Role>, DatabaseError> {
        self.memberships.find_role(user_id, organization_id).await
    }

    pub async fn has_role(&self, user_id: Uuid, organization_id: Uuid, required: Role) -> Result<bool, DatabaseError> {
        let granted = match self.role_of(user_id, organization_id).await? {
            Some(actual) => actual.satisfies(required),
            None => false,
        };
        debug!(%user_id, %organization_id, %required, granted, "role check");
        Ok(granted)
    }

    /// True when the member satisfies at least one of `required`.
    pub async fn has_any_role(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
        required: &[Role],
    ) -> Result<bool, DatabaseError> {
        if required.is_empty() {
            return Ok(false);
        }
        // One lookup serves every candidate; the membership row cannot change mid-call.
        let Some(actual) = self.role_of(user_id, organization_id).await? else {
            return Ok(false);
        };
        Ok(required.iter().any(|role| actual.satisfies(*role)))
    }

    /// The subscription row the gate would judge, if any.
    pub async fn subscription_of(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<ConsumerSubscription>, DatabaseError> {
        self.subscriptions.find_subscription(user_id, organization_id).await
    }

    pub async fn has_active_subscription(&self, user_id: Uuid, organization_id: Uuid) -> Result<bool, DatabaseError> {
        let subscription = self.subscription_of(user_id, organization_id).await?;
        let active = subscription.as_ref().map_or(false, |s| self.is_entitled(s));
        debug!(%user_id, %organization_id, active, "subscription check");
        Ok(active)
    }

    /// Staff-or-subscriber gate used by content handlers.
    pub async fn check_gated_access(&self, user_id: Uuid, organization_id: Uuid) -> Result<GatedAccess, DatabaseError> {
        let decision = match self.role_of(user_id, organization_id).await? {
            None => GatedAccess::NotMember,
            Some(role) if role.is_staff() => GatedAccess::Staff,
            Some(_) => {
                if self.has_active_subscription(user_id, organization_id).await? {
                    GatedAccess::Subscriber
                } else {
                    GatedAccess::SubscriptionRequired
                }
            }
        };
        debug!(%user_id, %organization_id, ?decision, "gated access");
        Ok(decision)
    }

    pub async fn can_access_gated(&self, user_id: Uuid, organization_id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.check_gated_access(user_id, organization_id).await?.is_granted())
    }

    fn is_entitled(&self, subscription: &ConsumerSubscription) -> bool {
        if !subscription.status.is_active() {
            return false;
        }
        match self.freshness {
            SubscriptionFreshness::StatusOnly => true,
            SubscriptionFreshness::EnforcePeriodEnd => !subscription.period_ended(Utc::now()),
        }
    }
}
