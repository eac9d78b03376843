//! In-memory stores for tests and local experiments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::access::{Role, SubscriptionStatus};
use crate::database::manager::DatabaseError;
use crate::database::models::{
    Collection, ConsumerSubscription, Event, Item, ItemType, Membership, Organization, UserOrganization,
};
use crate::database::traits::{ContentStore, MembershipStore, OrganizationStore, SubscriptionStore};

#[derive(Default)]
struct Tables {
    organizations: Vec<Organization>,
    memberships: Vec<Membership>,
    subscriptions: Vec<ConsumerSubscription>,
    collections: Vec<Collection>,
    items: Vec<Item>,
    events: Vec<Event>,
}

/// Implements every store trait over plain vectors.
///
/// `set_unavailable(true)` makes every call fail with
/// [`DatabaseError::Unavailable`] to exercise fault paths.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DatabaseError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DatabaseError::Unavailable("memory store switched off".to_string()));
        }
        Ok(())
    }

    pub async fn add_organization(&self, name: &str, slug: &str, owner_user_id: Uuid) -> Organization {
        let organization = Organization {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
            logo_url: None,
            primary_color: None,
            secondary_color: None,
            accent_color: None,
            owner_user_id,
            created_at: Utc::now(),
        };
        self.tables.write().await.organizations.push(organization.clone());
        organization
    }

    /// Insert or replace the membership for (user, organization).
    pub async fn add_member(&self, user_id: Uuid, organization_id: Uuid, role: Role) -> Membership {
        let mut tables = self.tables.write().await;
        tables
            .memberships
            .retain(|m| !(m.user_id == user_id && m.organization_id == organization_id));
        let membership = Membership {
            id: Uuid::new_v4(),
            user_id,
            organization_id,
            role,
        };
        tables.memberships.push(membership.clone());
        membership
    }

    pub async fn add_subscription(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
        status: &str,
        current_period_end: Option<DateTime<Utc>>,
    ) -> ConsumerSubscription {
        let subscription = ConsumerSubscription {
            id: Uuid::new_v4(),
            user_id,
            organization_id,
            stripe_subscription_id: format!("sub_{}", Uuid::new_v4().simple()),
            status: SubscriptionStatus::from(status),
            current_period_end,
            created_at: Utc::now(),
        };
        self.tables.write().await.subscriptions.push(subscription.clone());
        subscription
    }

    /// Apply a billing status change to an existing subscription row.
    pub async fn set_subscription_status(&self, subscription_id: Uuid, status: &str) -> bool {
        let mut tables = self.tables.write().await;
        match tables.subscriptions.iter_mut().find(|s| s.id == subscription_id) {
            Some(subscription) => {
                subscription.status = SubscriptionStatus::from(status);
                true
            }
            None => false,
        }
    }

    pub async fn add_collection(&self, organization_id: Uuid, name: &str) -> Collection {
        let collection = Collection {
            id: Uuid::new_v4(),
            organization_id,
            name: name.to_string(),
            description: None,
            created_by: None,
            created_at: Utc::now(),
        };
        self.tables.write().await.collections.push(collection.clone());
        collection
    }

    pub async fn add_item(
        &self,
        organization_id: Uuid,
        collection_id: Uuid,
        title: &str,
        item_type: ItemType,
        order_index: i32,
    ) -> Item {
        let item = Item {
            id: Uuid::new_v4(),
            organization_id,
            collection_id: Some(collection_id),
            title: title.to_string(),
            description: None,
            item_type,
            content_url: None,
            article_content: None,
            thumbnail_url: None,
            is_favorite: Some(false),
            order_index: Some(order_index),
            created_by: None,
            created_at: Utc::now(),
        };
        self.tables.write().await.items.push(item.clone());
        item
    }

    pub async fn set_item_favorite(&self, item_id: Uuid, favorite: bool) -> bool {
        let mut tables = self.tables.write().await;
        match tables.items.iter_mut().find(|i| i.id == item_id) {
            Some(item) => {
                item.is_favorite = Some(favorite);
                true
            }
            None => false,
        }
    }

    pub async fn add_event(&self, organization_id: Uuid, name: &str, date: DateTime<Utc>) -> Event {
        let event = Event {
            id: Uuid::new_v4(),
            organization_id,
            name: name.to_string(),
            description: None,
            date,
            zoom_link: None,
            created_by: None,
            created_at: Utc::now(),
        };
        self.tables.write().await.events.push(event.clone());
        event
    }
}

#[async_trait]
impl MembershipStore for MemoryStore {
    async fn find_role(&self, user_id: Uuid, organization_id: Uuid) -> Result<Option<Role>, DatabaseError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .memberships
            .iter()
            .find(|m| m.user_id == user_id && m.organization_id == organization_id)
            .map(|m| m.role))
    }

    async fn list_members(&self, organization_id: Uuid) -> Result<Vec<Membership>, DatabaseError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut members: Vec<Membership> = tables
            .memberships
            .iter()
            .filter(|m| m.organization_id == organization_id)
            .cloned()
            .collect();
        members.sort_by(|a, b| b.role.cmp(&a.role).then(a.user_id.cmp(&b.user_id)));
        Ok(members)
    }

    async fn update_role(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
        role: Role,
    ) -> Result<Option<Membership>, DatabaseError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        Ok(tables
            .memberships
            .iter_mut()
            .find(|m| m.user_id == user_id && m.organization_id == organization_id)
            .map(|m| {
                m.role = role;
                m.clone()
            }))
    }

    async fn remove_member(&self, user_id: Uuid, organization_id: Uuid) -> Result<bool, DatabaseError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let before = tables.memberships.len();
        tables
            .memberships
            .retain(|m| !(m.user_id == user_id && m.organization_id == organization_id));
        Ok(tables.memberships.len() < before)
    }
}

#[async_trait]
impl SubscriptionStore for MemoryStore {
    async fn find_subscription(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<ConsumerSubscription>, DatabaseError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        // Same ordering as the Postgres query: active rows first, among them the
        // latest period end (open-ended highest), then newest.
        Ok(tables
            .subscriptions
            .iter()
            .filter(|s| s.user_id == user_id && s.organization_id == organization_id)
            .max_by_key(|s| {
                let active = s.status.is_active();
                let period_end = match (active, s.current_period_end) {
                    (true, Some(end)) => end,
                    (true, None) => DateTime::<Utc>::MAX_UTC,
                    (false, _) => DateTime::<Utc>::MIN_UTC,
                };
                (active, period_end, s.created_at)
            })
            .cloned())
    }
}

#[async_trait]
impl OrganizationStore for MemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Organization>, DatabaseError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.organizations.iter().find(|o| o.slug == slug).cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<UserOrganization>, DatabaseError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut organizations: Vec<UserOrganization> = tables
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id)
            .filter_map(|m| {
                tables
                    .organizations
                    .iter()
                    .find(|o| o.id == m.organization_id)
                    .map(|o| UserOrganization {
                        id: o.id,
                        name: o.name.clone(),
                        slug: o.slug.clone(),
                        logo_url: o.logo_url.clone(),
                        primary_color: o.primary_color.clone(),
                        secondary_color: o.secondary_color.clone(),
                        accent_color: o.accent_color.clone(),
                        role: m.role,
                    })
            })
            .collect();
        organizations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(organizations)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.check_available()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list_collections(&self, organization_id: Uuid) -> Result<Vec<Collection>, DatabaseError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .collections
            .iter()
            .filter(|c| c.organization_id == organization_id)
            .cloned()
            .collect())
    }

    async fn find_collection(
        &self,
        organization_id: Uuid,
        collection_id: Uuid,
    ) -> Result<Option<Collection>, DatabaseError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .collections
            .iter()
            .find(|c| c.id == collection_id && c.organization_id == organization_id)
            .cloned())
    }

    async fn list_items(&self, organization_id: Uuid, collection_id: Uuid) -> Result<Vec<Item>, DatabaseError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut items: Vec<Item> = tables
            .items
            .iter()
            .filter(|i| i.organization_id == organization_id && i.collection_id == Some(collection_id))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            b.is_favorite
                .unwrap_or(false)
                .cmp(&a.is_favorite.unwrap_or(false))
                .then(a.order_index.cmp(&b.order_index))
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(items)
    }

    async fn find_item(
        &self,
        organization_id: Uuid,
        collection_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<Item>, DatabaseError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .iter()
            .find(|i| {
                i.id == item_id && i.collection_id == Some(collection_id) && i.organization_id == organization_id
            })
            .cloned())
    }

    async fn list_events(&self, organization_id: Uuid) -> Result<Vec<Event>, DatabaseError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut events: Vec<Event> = tables
            .events
            .iter()
            .filter(|e| e.organization_id == organization_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.date);
        Ok(events)
    }
}
