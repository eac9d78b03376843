use std::sync::Arc;

use crate::access::{AccessEvaluator, SubscriptionFreshness};
use crate::auth::JwtKeys;
use crate::database::traits::{ContentStore, MembershipStore, OrganizationStore, SubscriptionStore};

/// Shared handler state: the evaluator plus the stores handlers read directly.
#[derive(Clone)]
pub struct AppState {
    pub evaluator: AccessEvaluator,
    pub memberships: Arc<dyn MembershipStore>,
    pub organizations: Arc<dyn OrganizationStore>,
    pub content: Arc<dyn ContentStore>,
    pub keys: JwtKeys,
}

impl AppState {
    /// Wire every store role to the same backing store.
    pub fn new<S>(store: Arc<S>, keys: JwtKeys, freshness: SubscriptionFreshness) -> Self
    where
        S: MembershipStore + SubscriptionStore + OrganizationStore + ContentStore + 'static,
    {
        let memberships: Arc<dyn MembershipStore> = store.clone();
        let subscriptions: Arc<dyn SubscriptionStore> = store.clone();
        let organizations: Arc<dyn OrganizationStore> = store.clone();
        let content: Arc<dyn ContentStore> = store;

        Self {
            evaluator: AccessEvaluator::new(memberships.clone(), subscriptions).with_freshness(freshness),
            memberships,
            organizations,
            content,
            keys,
        }
    }
}
