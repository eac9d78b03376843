use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Postgres `item_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "item_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Video,
    Pdf,
    Article,
    Embed,
    Link,
}

/// A piece of library content inside a collection.
///
/// `article_content` carries the editor document for `article` items;
/// the other kinds point at `content_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub collection_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub item_type: ItemType,
    pub content_url: Option<String>,
    pub article_content: Option<serde_json::Value>,
    pub thumbnail_url: Option<String>,
    pub is_favorite: Option<bool>,
    pub order_index: Option<i32>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
