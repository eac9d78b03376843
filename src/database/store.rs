use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::access::Role;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{
    Collection, ConsumerSubscription, Event, Item, Membership, Organization, UserOrganization,
};
use crate::database::traits::{ContentStore, MembershipStore, OrganizationStore, SubscriptionStore};

// Timestamp columns are `timestamp` (no time zone) holding UTC. Each select
// reads them `AT TIME ZONE 'UTC'` so they decode as `DateTime<Utc>`.

const SUBSCRIPTION_COLUMNS: &str = "s.id, s.user_id, s.organization_id, s.stripe_subscription_id, s.status,
     s.current_period_end AT TIME ZONE 'UTC' AS current_period_end,
     s.created_at AT TIME ZONE 'UTC' AS created_at";

const ORGANIZATION_COLUMNS: &str = "o.id, o.name, o.slug, o.logo_url, o.primary_color, o.secondary_color,
     o.accent_color, o.owner_user_id, o.created_at AT TIME ZONE 'UTC' AS created_at";

const COLLECTION_COLUMNS: &str = "c.id, c.organization_id, c.name, c.description, c.created_by,
     c.created_at AT TIME ZONE 'UTC' AS created_at";

const ITEM_COLUMNS: &str = "i.id, i.organization_id, i.collection_id, i.title, i.description, i.type,
     i.content_url, i.article_content, i.thumbnail_url, i.is_favorite, i.order_index, i.created_by,
     i.created_at AT TIME ZONE 'UTC' AS created_at";

const EVENT_COLUMNS: &str = "e.id, e.organization_id, e.name, e.description,
     e.date AT TIME ZONE 'UTC' AS date, e.zoom_link, e.created_by,
     e.created_at AT TIME ZONE 'UTC' AS created_at";

/// Postgres implementation of every store trait
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a store on the shared main pool
    pub async fn connect() -> Result<Self, DatabaseError> {
        Ok(Self::new(DatabaseManager::main_pool().await?))
    }
}

#[derive(FromRow)]
struct SubscriptionRow {
    id: Uuid,
    user_id: Uuid,
    organization_id: Uuid,
    stripe_subscription_id: String,
    status: String,
    current_period_end: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<SubscriptionRow> for ConsumerSubscription {
    fn from(row: SubscriptionRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            organization_id: row.organization_id,
            stripe_subscription_id: row.stripe_subscription_id,
            status: row.status.into(),
            current_period_end: row.current_period_end,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl MembershipStore for PgStore {
    async fn find_role(&self, user_id: Uuid, organization_id: Uuid) -> Result<Option<Role>, DatabaseError> {
        let role = sqlx::query_scalar::<_, Role>(
            "SELECT role FROM memberships WHERE user_id = $1 AND organization_id = $2",
        )
        .bind(user_id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(role)
    }

    async fn list_members(&self, organization_id: Uuid) -> Result<Vec<Membership>, DatabaseError> {
        let members = sqlx::query_as::<_, Membership>(
            "SELECT id, user_id, organization_id, role
             FROM memberships
             WHERE organization_id = $1
             ORDER BY role, user_id",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn update_role(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
        role: Role,
    ) -> Result<Option<Membership>, DatabaseError> {
        let membership = sqlx::query_as::<_, Membership>(
            "UPDATE memberships SET role = $3
             WHERE user_id = $1 AND organization_id = $2
             RETURNING id, user_id, organization_id, role",
        )
        .bind(user_id)
        .bind(organization_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(membership)
    }

    async fn remove_member(&self, user_id: Uuid, organization_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM memberships WHERE user_id = $1 AND organization_id = $2")
            .bind(user_id)
            .bind(organization_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SubscriptionStore for PgStore {
    async fn find_subscription(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> Result<Option<ConsumerSubscription>, DatabaseError> {
        let sql = format!(
            "SELECT {SUBSCRIPTION_COLUMNS}
             FROM consumer_subscriptions s
             WHERE s.user_id = $1 AND s.organization_id = $2
             ORDER BY (s.status = 'active') DESC,
                      CASE WHEN s.status = 'active' THEN s.current_period_end END DESC NULLS FIRST,
                      s.created_at DESC
             LIMIT 1"
        );
        let row = sqlx::query_as::<_, SubscriptionRow>(&sql)
            .bind(user_id)
            .bind(organization_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ConsumerSubscription::from))
    }
}

#[async_trait]
impl OrganizationStore for PgStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Organization>, DatabaseError> {
        let sql = format!("SELECT {ORGANIZATION_COLUMNS} FROM organizations o WHERE o.slug = $1");
        let organization = sqlx::query_as::<_, Organization>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(organization)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<UserOrganization>, DatabaseError> {
        let organizations = sqlx::query_as::<_, UserOrganization>(
            "SELECT o.id, o.name, o.slug, o.logo_url, o.primary_color, o.secondary_color,
                    o.accent_color, m.role
             FROM memberships m
             INNER JOIN organizations o ON o.id = m.organization_id
             WHERE m.user_id = $1
             ORDER BY o.name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(organizations)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ContentStore for PgStore {
    async fn list_collections(&self, organization_id: Uuid) -> Result<Vec<Collection>, DatabaseError> {
        let sql = format!(
            "SELECT {COLLECTION_COLUMNS} FROM collections c
             WHERE c.organization_id = $1
             ORDER BY c.created_at"
        );
        let collections = sqlx::query_as::<_, Collection>(&sql)
            .bind(organization_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(collections)
    }

    async fn find_collection(
        &self,
        organization_id: Uuid,
        collection_id: Uuid,
    ) -> Result<Option<Collection>, DatabaseError> {
        let sql = format!(
            "SELECT {COLLECTION_COLUMNS} FROM collections c
             WHERE c.id = $1 AND c.organization_id = $2"
        );
        let collection = sqlx::query_as::<_, Collection>(&sql)
            .bind(collection_id)
            .bind(organization_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(collection)
    }

    async fn list_items(&self, organization_id: Uuid, collection_id: Uuid) -> Result<Vec<Item>, DatabaseError> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM items i
             WHERE i.organization_id = $1 AND i.collection_id = $2
             ORDER BY i.is_favorite DESC NULLS LAST, i.order_index ASC, i.created_at ASC"
        );
        let items = sqlx::query_as::<_, Item>(&sql)
            .bind(organization_id)
            .bind(collection_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn find_item(
        &self,
        organization_id: Uuid,
        collection_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<Item>, DatabaseError> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM items i
             WHERE i.id = $1 AND i.collection_id = $2 AND i.organization_id = $3"
        );
        let item = sqlx::query_as::<_, Item>(&sql)
            .bind(item_id)
            .bind(collection_id)
            .bind(organization_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    async fn list_events(&self, organization_id: Uuid) -> Result<Vec<Event>, DatabaseError> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events e
             WHERE e.organization_id = $1
             ORDER BY e.date"
        );
        let events = sqlx::query_as::<_, Event>(&sql)
            .bind(organization_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }
}
