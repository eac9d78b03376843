use async_trait::async_trait;
use uuid::Uuid;

use crate::access::Role;
use crate::database::manager::DatabaseError;
use crate::database::models::{Collection, ConsumerSubscription, Event, Item, Membership, Organization, UserOrganization};

/// Membership lookups and mutations.
///
/// Implementations must keep (user, organization) unique so that
/// [`MembershipStore::find_role`] returns at most one role.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Point lookup of a member's role.
    async fn find_role(&self, user_id: Uuid, organization_id: Uuid) -> Result<Option<Role>, DatabaseError>;

    async fn list_members(&self, organization_id: Uuid) -> Result<Vec<Membership>, DatabaseError>;

    /// Returns the updated membership, or `None` when no row matched.
    async fn update_role(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
        role: Role,
    ) -> Result<Option<Membership>, DatabaseError>;

    /// Returns `false` when no row matched.
    async fn remove_member(&self, user_id: Uuid, organization_id: Uuid) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// The most relevant subscription for the pair: an `active` row when one
    /// exists, otherwise the most recently created row. Among several
    /// `active` rows the one with the latest period end wins, an open-ended
    /// row (no period end) ahead of all.
    async fn find_subscription(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<ConsumerSubscription>, DatabaseError>;
}

#[async_trait]
pub trait OrganizationStore: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Organization>, DatabaseError>;

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<UserOrganization>, DatabaseError>;

    /// Verify the backing store answers.
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// Gated library content. Every lookup is scoped to the organization so an
/// id from another organization reads as absent.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn list_collections(&self, organization_id: Uuid) -> Result<Vec<Collection>, DatabaseError>;

    async fn find_collection(
        &self,
        organization_id: Uuid,
        collection_id: Uuid,
    ) -> Result<Option<Collection>, DatabaseError>;

    /// Favorites first, then `order_index`, then oldest.
    async fn list_items(&self, organization_id: Uuid, collection_id: Uuid) -> Result<Vec<Item>, DatabaseError>;

    async fn find_item(
        &self,
        organization_id: Uuid,
        collection_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<Item>, DatabaseError>;

    /// Ordered by event date.
    async fn list_events(&self, organization_id: Uuid) -> Result<Vec<Event>, DatabaseError>;
}
